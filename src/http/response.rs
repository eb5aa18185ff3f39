//! Response handling.
//!
//! # Responsibilities
//! - Render forwarder failures as a JSON error envelope
//! - Map each failure kind to its HTTP status code
//!
//! # Design Decisions
//! - Envelope text is static per failure kind; upstream detail stays in logs
//! - `NoResults` uses a `message` field, every other failure an `error` field

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::forwarder::ForwardError;

/// Body of every non-2xx JSON response: `{"error": ...}` or `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorEnvelope {
    Error(String),
    Message(String),
}

impl From<&ForwardError> for ErrorEnvelope {
    fn from(err: &ForwardError) -> Self {
        match err {
            ForwardError::NoResults => ErrorEnvelope::Message(err.to_string()),
            ForwardError::MissingParameter(_) | ForwardError::Upstream { .. } => {
                ErrorEnvelope::Error(err.to_string())
            }
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorEnvelope::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forwarder::error::{UpstreamFailure, QUERY_REQUIRED};
    use crate::forwarder::Route;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn render(err: ForwardError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_missing_parameter_envelope() {
        let (status, body) = render(ForwardError::MissingParameter(QUERY_REQUIRED)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Query parameter is required" }));
    }

    #[tokio::test]
    async fn test_no_results_envelope() {
        let (status, body) = render(ForwardError::NoResults).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "No results found for your query." }));
    }

    #[tokio::test]
    async fn test_upstream_envelope() {
        let err = ForwardError::Upstream {
            route: Route::EpicSnapshots,
            source: UpstreamFailure::InvalidTarget,
        };
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch EPIC data" }));
    }

    #[test]
    fn test_envelope_serializes_as_single_field() {
        assert_eq!(
            serde_json::to_value(ErrorEnvelope::Error("boom".into())).unwrap(),
            json!({ "error": "boom" })
        );
        assert_eq!(
            serde_json::to_value(ErrorEnvelope::Message("none".into())).unwrap(),
            json!({ "message": "none" })
        );
    }
}
