//! Search handler.
//!
//! `GET /api/person/search?q=&fields=`

use axum::{extract::State, http::StatusCode, response::Response};
use roster_persistence::core::PersonStorage;
use roster_persistence::types::Person;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::SearchParams;
use crate::responses::{Envelope, messages};
use crate::state::AppState;

fn no_match() -> Response {
    Envelope::failure(Vec::<Person>::new(), messages::NO_MATCH).with_status(StatusCode::ACCEPTED)
}

/// Handler for free-text search.
///
/// A blank `q` is answered without touching the store.
///
/// # Response
///
/// - `200 OK` - Matching documents, ascending by name
/// - `202 Accepted` - Blank query or no match
/// - `500 Internal Server Error` - Storage failure
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    SearchParams(query): SearchParams,
) -> RestResult<Response>
where
    S: PersonStorage + Send + Sync,
{
    let Some(query) = query else {
        debug!("Search query is blank");
        return Ok(no_match());
    };

    debug!(text = %query.text(), fields = ?query.fields(), "Processing search request");

    let found = state.storage().search_persons(&query).await?;
    if found.is_empty() {
        return Ok(no_match());
    }

    Ok(Envelope::ok(found, messages::FOUND_ALL).with_status(StatusCode::OK))
}
