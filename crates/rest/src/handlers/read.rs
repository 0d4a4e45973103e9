//! Read handler.
//!
//! `GET /api/person/read/{id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use roster_persistence::core::PersonStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::responses::{Envelope, messages};
use crate::state::AppState;

/// Handler for reading a person with its company.
///
/// The result is a one-element array; the element's `company` field is an
/// array holding the matched company, or empty if none matched.
///
/// # Response
///
/// - `200 OK` - The person was found
/// - `404 Not Found` - No person has this id
/// - `500 Internal Server Error` - Malformed id or `companyId`, or storage failure
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: PersonStorage + Send + Sync,
{
    debug!(id = %id, "Processing read request");

    let found = state.storage().read_person_with_company(&id).await?;
    if found.is_empty() {
        return Err(RestError::NotFound { id });
    }

    let message = messages::found(&id);
    Ok(Envelope::ok(found, message).with_status(StatusCode::OK))
}
