//! Delete handler.
//!
//! `DELETE /api/person/delete/{id}`

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

/// Handler for deleting a person.
///
/// # Response
///
/// - `200 OK` - The removed document's prior state
/// - `404 Not Found` - No person has this id
/// - `500 Internal Server Error` - Malformed id or storage failure
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: PersonStorage + Send + Sync,
{
    debug!(id = %id, "Processing delete request");

    let Some(deleted) = state.storage().delete_person(&id).await? else {
        return Err(RestError::NotFound { id });
    };

    debug!(id = %id, "Person deleted");

    let message = messages::deleted(&id);
    Ok(Envelope::ok(deleted, message).with_status(StatusCode::OK))
}
