//! # roster-rest - Person resource HTTP API
//!
//! This crate exposes person documents over HTTP. Every response, success or
//! failure, uses the same JSON envelope:
//!
//! ```json
//! { "success": true, "result": { ... }, "message": "...", "pagination": { ... } }
//! ```
//!
//! ## Backend Support
//!
//! Storage backends are configured through feature flags:
//!
//! - `sqlite` - SQLite backend (default)
//! - `mongodb` - MongoDB backend
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster_rest::{create_app, ServerConfig};
//! use roster_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("roster.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern | Success |
//! |-----------|-------------|-------------|---------|
//! | create | POST | `/api/person/create` | 200 |
//! | read | GET | `/api/person/read/{id}` | 200 |
//! | update | PATCH | `/api/person/update/{id}` | 200 |
//! | delete | DELETE | `/api/person/delete/{id}` | 200 |
//! | list | GET | `/api/person/list?page=&items=` | 200, 203 when empty |
//! | search | GET | `/api/person/search?q=&fields=` | 200, 202 when nothing matched |
//!
//! ## Error Handling
//!
//! | HTTP Status | Message |
//! |-------------|---------|
//! | 400 | Required fields are not supplied |
//! | 404 | No document found by this id: {id} |
//! | 500 | Oops there is an Error |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their envelopes
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Body, pagination, and search extractors
//! - [`responses`] - The response envelope and messages
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackend};
pub use error::{CollectionError, RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{BoxError, Router, error_handling::HandleErrorLayer, extract::DefaultBodyLimit};
use roster_persistence::core::PersonStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: PersonStorage + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use roster_rest::{create_app_with_config, ServerConfig};
/// use roster_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let config = ServerConfig {
///     max_page_size: 50,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: PersonStorage + Send + Sync + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        storage.backend_name()
    );

    // Create application state
    let state = AppState::new(Arc::new(storage), config.clone());

    let router = routing::create_routes(state).layer(DefaultBodyLimit::max(config.max_body_size));

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(std::time::Duration::from_secs(config.request_timeout));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    let router = router.layer(service_builder);

    // Outermost: the id is set before the request reaches any other layer
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Renders errors raised by tower middleware as envelopes.
async fn handle_middleware_error(err: BoxError) -> RestError {
    if err.is::<tower::timeout::error::Elapsed>() {
        RestError::Timeout
    } else {
        RestError::Internal {
            message: format!("Unhandled middleware error: {}", err),
        }
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "roster={level},roster_rest={level},roster_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
