//! Update handler.
//!
//! `PATCH /api/person/update/{id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use roster_persistence::core::PersonStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::PersonBody;
use crate::responses::{Envelope, messages};
use crate::state::AppState;

/// Handler for a partial update.
///
/// Fields in the body are merged into the stored document; fields not
/// mentioned are left alone. Returns the post-update state.
///
/// # Response
///
/// - `200 OK` - The updated document
/// - `400 Bad Request` - The patch fails the schema
/// - `404 Not Found` - No person has this id
/// - `500 Internal Server Error` - Malformed id or storage failure
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    PersonBody(patch): PersonBody,
) -> RestResult<Response>
where
    S: PersonStorage + Send + Sync,
{
    debug!(id = %id, "Processing update request");

    let Some(updated) = state.storage().update_person(&id, patch).await? else {
        return Err(RestError::NotFound { id });
    };

    let message = messages::updated(&id);
    Ok(Envelope::ok(updated, message).with_status(StatusCode::OK))
}
