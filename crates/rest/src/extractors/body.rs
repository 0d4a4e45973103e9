//! Request body extractor.
//!
//! Extracts a JSON object from the request body.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::RestError;

/// Axum extractor for a person payload.
///
/// The body must parse as JSON and be an object. Field-level checks are left
/// to the storage layer's schema.
///
/// # Example
///
/// ```rust,ignore
/// use roster_rest::extractors::PersonBody;
///
/// async fn create_handler(PersonBody(body): PersonBody) {
///     println!("name: {}", body["name"]);
/// }
/// ```
#[derive(Debug)]
pub struct PersonBody(pub Value);

/// Error type for body extraction failures.
#[derive(Debug)]
pub enum PersonBodyRejection {
    /// The body could not be read. An oversized body renders as 413, any
    /// other read failure as 400.
    Body(BytesRejection),
    /// JSON parsing failed.
    InvalidJson(String),
    /// The body is valid JSON but not an object.
    NotAnObject,
}

impl IntoResponse for PersonBodyRejection {
    fn into_response(self) -> Response {
        match self {
            PersonBodyRejection::Body(rejection)
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                RestError::PayloadTooLarge.into_response()
            }
            PersonBodyRejection::Body(rejection) => RestError::Validation {
                message: rejection.body_text(),
            }
            .into_response(),
            PersonBodyRejection::InvalidJson(msg) => RestError::Validation {
                message: format!("Invalid JSON: {}", msg),
            }
            .into_response(),
            PersonBodyRejection::NotAnObject => RestError::Validation {
                message: "Body must be a JSON object".to_string(),
            }
            .into_response(),
        }
    }
}

impl<S> FromRequest<S> for PersonBody
where
    S: Send + Sync,
{
    type Rejection = PersonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(PersonBodyRejection::Body)?;

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| PersonBodyRejection::InvalidJson(e.to_string()))?;

        if !value.is_object() {
            return Err(PersonBodyRejection::NotAnObject);
        }

        Ok(PersonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(body: &'static str) -> Result<PersonBody, PersonBodyRejection> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        PersonBody::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_object_body() {
        let PersonBody(value) = extract(r#"{"name":"Alice"}"#).await.unwrap();
        assert_eq!(value["name"], "Alice");
    }

    #[tokio::test]
    async fn test_invalid_json_is_400() {
        let rejection = extract("{not json").await.unwrap_err();
        assert!(matches!(rejection, PersonBodyRejection::InvalidJson(_)));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_array_body_is_400() {
        let rejection = extract("[1, 2]").await.unwrap_err();
        assert!(matches!(rejection, PersonBodyRejection::NotAnObject));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_body_is_413_envelope() {
        use axum::extract::DefaultBodyLimit;
        use axum::{Router, routing::post};
        use tower::ServiceExt;

        let app = Router::new()
            .route("/", post(|PersonBody(_): PersonBody| async {}))
            .layer(DefaultBodyLimit::max(8));

        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"a long name"}"#))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["result"], Value::Null);
        assert_eq!(body["message"], "Request body is too large");
    }
}
