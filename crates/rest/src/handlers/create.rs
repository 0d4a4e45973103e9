//! Create handler.
//!
//! `POST /api/person/create`

use axum::{extract::State, http::StatusCode, response::Response};
use roster_persistence::core::PersonStorage;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::PersonBody;
use crate::responses::{Envelope, messages};
use crate::state::AppState;

/// Handler for creating a person.
///
/// # Response
///
/// - `200 OK` - The stored document
/// - `400 Bad Request` - The body is not a JSON object or fails the schema
/// - `500 Internal Server Error` - Storage failure
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    PersonBody(body): PersonBody,
) -> RestResult<Response>
where
    S: PersonStorage + Send + Sync,
{
    debug!("Processing create request");

    let person = state.storage().create_person(body).await?;

    debug!(id = %person.id(), "Person created");

    Ok(Envelope::ok(person, messages::CREATED).with_status(StatusCode::OK))
}
