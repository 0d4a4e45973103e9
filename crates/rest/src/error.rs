//! Error types for the person API.
//!
//! Storage errors from the persistence layer are classified into two tiers at
//! the HTTP boundary, plus the not-found outcome:
//!
//! | Storage Error | HTTP Status | Message |
//! |--------------|-------------|---------|
//! | Validation | 400 | Required fields are not supplied |
//! | (no match) | 404 | No document found by this id: {id} |
//! | Identifier, Backend | 500 | Oops there is an Error |
//!
//! Requests cut short by the HTTP layer (an oversized body, a timeout) use the
//! same envelope.
//!
//! Details never reach the caller; internal errors are logged instead.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_persistence::error::StorageError;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::responses::{Envelope, messages};

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// The payload was rejected (HTTP 400).
    Validation {
        /// Diagnostic detail, logged but not returned.
        message: String,
    },

    /// No document has the requested id (HTTP 404).
    NotFound {
        /// The requested id.
        id: String,
    },

    /// The request body exceeded the configured limit (HTTP 413).
    PayloadTooLarge,

    /// The request did not complete within the configured timeout (HTTP 408).
    Timeout,

    /// Anything else (HTTP 500).
    Internal {
        /// Diagnostic detail, logged but not returned.
        message: String,
    },
}

/// Result type for REST operations.
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Validation { .. } => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::Timeout => StatusCode::REQUEST_TIMEOUT,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to the caller.
    pub fn public_message(&self) -> String {
        match self {
            RestError::Validation { .. } => messages::VALIDATION_FAILED.to_string(),
            RestError::NotFound { id } => messages::not_found(id),
            RestError::PayloadTooLarge => messages::PAYLOAD_TOO_LARGE.to_string(),
            RestError::Timeout => messages::TIMED_OUT.to_string(),
            RestError::Internal { .. } => messages::INTERNAL_ERROR.to_string(),
        }
    }

    /// Renders the error envelope with the given `result` value.
    fn respond(self, result: Value) -> Response {
        match &self {
            RestError::Internal { message } => error!(error = %message, "Request failed"),
            RestError::Validation { message } => warn!(error = %message, "Rejected payload"),
            RestError::PayloadTooLarge => warn!("Rejected oversized body"),
            RestError::Timeout => warn!("Request timed out"),
            RestError::NotFound { .. } => {}
        }

        Envelope::failure(result, self.public_message()).with_status(self.status_code())
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::Validation { message } => write!(f, "Validation failed: {}", message),
            RestError::NotFound { id } => write!(f, "Document not found: {}", id),
            RestError::PayloadTooLarge => write!(f, "Request body too large"),
            RestError::Timeout => write!(f, "Request timed out"),
            RestError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        self.respond(Value::Null)
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => RestError::Validation {
                message: e.to_string(),
            },
            StorageError::Identifier(e) => RestError::Internal {
                message: e.to_string(),
            },
            StorageError::Backend(e) => RestError::Internal {
                message: e.to_string(),
            },
        }
    }
}

/// An error from the list endpoint.
///
/// Renders like [`RestError`] but with `result: []`.
#[derive(Debug)]
pub struct CollectionError(pub RestError);

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for CollectionError {}

impl IntoResponse for CollectionError {
    fn into_response(self) -> Response {
        self.0.respond(json!([]))
    }
}

impl From<StorageError> for CollectionError {
    fn from(err: StorageError) -> Self {
        CollectionError(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_persistence::error::{BackendError, IdentifierError, ValidationError};

    #[test]
    fn test_not_found_display() {
        let err = RestError::NotFound {
            id: "123".to_string(),
        };
        assert_eq!(err.to_string(), "Document not found: 123");
        assert_eq!(err.public_message(), "No document found by this id: 123");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err: RestError = StorageError::Validation(ValidationError::MissingRequiredField {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Required fields are not supplied");
    }

    #[test]
    fn test_identifier_maps_to_500() {
        let err: RestError = StorageError::Identifier(IdentifierError::Malformed {
            value: "abc".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Oops there is an Error");
    }

    #[test]
    fn test_backend_maps_to_500() {
        let err: RestError = StorageError::Backend(BackendError::QueryError {
            message: "boom".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_transport_errors() {
        assert_eq!(
            RestError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(RestError::Timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(RestError::Timeout.public_message(), "Request timed out");
    }

    #[test]
    fn test_into_response_status() {
        let response = RestError::NotFound {
            id: "x".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = CollectionError(RestError::Internal {
            message: "down".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
