//! List handler.
//!
//! `GET /api/person/list?page=&items=`

use axum::{extract::State, http::StatusCode, response::Response};
use roster_persistence::core::PersonStorage;
use roster_persistence::types::Person;
use tracing::debug;

use crate::error::CollectionError;
use crate::extractors::ListParams;
use crate::responses::{Envelope, messages};
use crate::state::AppState;

/// Handler for listing persons, newest first.
///
/// The page and the total count are fetched concurrently, so they may
/// disagree if the collection changes in between.
///
/// # Response
///
/// - `200 OK` - The page with `pagination` metadata
/// - `203 Non-Authoritative Information` - The collection is empty
/// - `500 Internal Server Error` - Storage failure (`result: []`)
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    ListParams(page): ListParams,
) -> Result<Response, CollectionError>
where
    S: PersonStorage + Send + Sync,
{
    debug!(page = page.page(), limit = page.limit(), "Processing list request");

    let storage = state.storage();
    let (persons, count) = tokio::try_join!(storage.list_persons(&page), storage.count_persons())?;

    let info = page.info(count);

    if count == 0 {
        return Ok(Envelope::failure(Vec::<Person>::new(), messages::COLLECTION_EMPTY)
            .with_pagination(info)
            .with_status(StatusCode::NON_AUTHORITATIVE_INFORMATION));
    }

    Ok(Envelope::ok(persons, messages::FOUND_ALL)
        .with_pagination(info)
        .with_status(StatusCode::OK))
}
