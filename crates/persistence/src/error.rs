//! Error types for the persistence layer.
//!
//! Errors are grouped by category so the HTTP layer can classify them into
//! client errors (schema validation) and everything else.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Schema validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Identifier parsing errors
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns `true` if this error was raised by the person schema.
    pub fn is_validation(&self) -> bool {
        matches!(self, StorageError::Validation(_))
    }
}

/// Errors raised when a document does not satisfy the person schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload is not a JSON object.
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    /// A required field is absent, null, or blank.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A field holds a value of the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    InvalidFieldType { field: String, expected: String },
}

/// Errors raised when an identifier cannot be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The value is not 24 hexadecimal characters.
    #[error("malformed identifier: {value:?}")]
    Malformed { value: String },

    /// A stored foreign key cannot be used for a join.
    #[error("malformed {field} on {id}: {value:?}")]
    MalformedReference {
        id: String,
        field: String,
        value: String,
    },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for StorageError {
    fn from(err: mongodb::error::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "mongodb".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = StorageError::Validation(ValidationError::MissingRequiredField {
            field: "companyId".to_string(),
        });
        assert_eq!(err.to_string(), "missing required field: companyId");
        assert!(err.is_validation());
    }

    #[test]
    fn test_identifier_error_display() {
        let err = IdentifierError::Malformed {
            value: "xyz".to_string(),
        };
        assert_eq!(err.to_string(), "malformed identifier: \"xyz\"");

        let storage: StorageError = err.into();
        assert!(!storage.is_validation());
    }

    #[test]
    fn test_invalid_field_type_display() {
        let err = ValidationError::InvalidFieldType {
            field: "name".to_string(),
            expected: "a string".to_string(),
        };
        assert_eq!(err.to_string(), "field 'name' must be a string");
    }

    #[test]
    fn test_serde_error_is_backend() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let storage: StorageError = err.into();
        assert!(matches!(
            storage,
            StorageError::Backend(BackendError::SerializationError { .. })
        ));
    }
}
