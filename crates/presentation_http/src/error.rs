//! API error handling
//!
//! Maps rejected input and internal failures to JSON error responses.
//! Simulated faults are not errors; see `handlers::faults`.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// A query parameter was rejected
    #[error("{message}")]
    Validation {
        /// Human readable reason
        message: String,
        /// Offending query parameter, when known
        field: Option<String>,
    },

    /// No route matches the requested path
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected server-side failure; details stay in the logs
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Query parameter that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match self {
            Self::Validation { message, field } => {
                debug!(?field, %message, "Rejected request parameters");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation_error",
                    message,
                    field,
                )
            },
            Self::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("No route for {path}"),
                None,
            ),
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidConfiguration(msg) => Self::Internal(msg),
            other => Self::Validation {
                field: other.field().map(ToString::to_string),
                message: other.to_string(),
            },
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => e.into(),
            ApplicationError::Configuration(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn out_of_range_becomes_validation() {
        let err: ApiError = DomainError::out_of_range("levels", 9, 1, 5).into();
        let ApiError::Validation { message, field } = err else {
            unreachable!("Expected Validation");
        };
        assert_eq!(field.as_deref(), Some("levels"));
        assert!(message.contains("between 1 and 5"));
    }

    #[test]
    fn invalid_range_names_lower_field() {
        let err: ApiError = DomainError::invalid_range("min_delay", 5.0, "max_delay", 1.0).into();
        assert!(matches!(
            err,
            ApiError::Validation { field: Some(ref f), .. } if f == "min_delay"
        ));
    }

    #[test]
    fn invalid_configuration_is_internal() {
        let err: ApiError = DomainError::InvalidConfiguration("broken".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn application_configuration_is_internal() {
        let err: ApiError = ApplicationError::Configuration("bad".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn validation_response_is_422() {
        let err: ApiError = DomainError::malformed("delay", "abc").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["code"], "validation_error");
        assert_eq!(body["field"], "delay");
    }

    #[tokio::test]
    async fn internal_response_hides_details() {
        let response = ApiError::Internal("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "internal_error");
        assert!(!body.to_string().contains("secret detail"));
    }

    #[tokio::test]
    async fn not_found_response() {
        let response = ApiError::NotFound("/nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body.get("field").is_none());
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            error: "bad".to_string(),
            code: "validation_error".to_string(),
            field: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("code"));
        assert!(!json.contains("field"));
    }
}
