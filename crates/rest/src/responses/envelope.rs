//! The uniform response envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_persistence::types::PageInfo;
use serde::{Deserialize, Serialize};

/// The body of every API response.
///
/// # Example
///
/// ```
/// use roster_rest::responses::Envelope;
///
/// let body = serde_json::to_value(Envelope::ok(vec![1, 2], "done")).unwrap();
/// assert_eq!(body["success"], true);
/// assert!(body.get("pagination").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the operation produced a result.
    pub success: bool,

    /// The entity, entity list, or `null`.
    pub result: T,

    /// Human-readable outcome.
    pub message: String,

    /// Page metadata for list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl<T> Envelope<T> {
    /// Creates a successful envelope.
    pub fn ok(result: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            result,
            message: message.into(),
            pagination: None,
        }
    }

    /// Creates an unsuccessful envelope.
    pub fn failure(result: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            result,
            message: message.into(),
            pagination: None,
        }
    }

    /// Attaches page metadata.
    pub fn with_pagination(mut self, pagination: PageInfo) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl<T: Serialize> Envelope<T> {
    /// Renders this envelope with the given status code.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        self.with_status(StatusCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_failure_envelope() {
        let body = serde_json::to_value(Envelope::failure(Value::Null, "nope")).unwrap();
        assert_eq!(body, json!({"success": false, "result": null, "message": "nope"}));
    }

    #[test]
    fn test_pagination_serialized() {
        let envelope = Envelope::ok(json!([]), "page").with_pagination(PageInfo {
            page: 2,
            pages: 3,
            count: 25,
        });
        let body = serde_json::to_value(envelope).unwrap();
        assert_eq!(body["pagination"], json!({"page": 2, "pages": 3, "count": 25}));
    }

    #[test]
    fn test_with_status() {
        let response = Envelope::ok(Value::Null, "accepted").with_status(StatusCode::ACCEPTED);
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
