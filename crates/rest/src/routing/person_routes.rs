//! Person route configuration.

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use roster_persistence::core::PersonStorage;

use crate::handlers;
use crate::state::AppState;

/// Path prefix of the person resource.
pub const PERSON_BASE: &str = "/api/person";

/// Creates all routes.
///
/// # Routes
///
/// ## Person
/// - `POST /api/person/create` - Create
/// - `GET /api/person/read/{id}` - Read with company
/// - `PATCH /api/person/update/{id}` - Partial update
/// - `DELETE /api/person/delete/{id}` - Delete
/// - `GET /api/person/list` - Paginated list
/// - `GET /api/person/search` - Free-text search
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness check
/// - `GET /_readiness` - Readiness check
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: PersonStorage + Send + Sync + 'static,
{
    Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::health::liveness_handler))
        .route("/_readiness", get(handlers::health::readiness_handler::<S>))
        // Person routes
        .nest(PERSON_BASE, person_router::<S>())
        // State
        .with_state(state)
}

fn person_router<S>() -> Router<AppState<S>>
where
    S: PersonStorage + Send + Sync + 'static,
{
    Router::new()
        .route("/create", post(handlers::create_handler::<S>))
        .route("/read/{id}", get(handlers::read_handler::<S>))
        .route("/update/{id}", patch(handlers::update_handler::<S>))
        .route("/delete/{id}", delete(handlers::delete_handler::<S>))
        .route("/list", get(handlers::list_handler::<S>))
        .route("/search", get(handlers::search_handler::<S>))
}
