//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps catalog, object-store and database errors to HTTP status codes in a
//! single table ([`AppError::status_and_code`]) consulted only at the
//! boundary. Internal and upload failures are logged but never echoed.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced entity does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Input failed domain validation (400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body, multipart stream or query could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Natural key already taken (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Request body exceeded the configured limit (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Object store rejected or failed the write (502). Message is logged only.
    #[error("upload failed: {0}")]
    Upload(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::Upload(_) => (StatusCode::BAD_GATEWAY, "UPLOAD_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Shorthand for a missing entity of `kind`.
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} {id} not found"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upload(_) => "Failed to store the uploaded file".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upload(_) => tracing::error!(error = %self, "object store upload failed"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert pnr-core validation errors to API errors.
impl From<pnr_core::ValidationError> for AppError {
    fn from(err: pnr_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Any object store failure is an upload error; the record is never persisted.
impl From<pnr_object_store::ObjectStoreError> for AppError {
    fn from(err: pnr_object_store::ObjectStoreError) -> Self {
        Self::Upload(err.to_string())
    }
}

/// Unique violations become conflicts; everything else is internal.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db) if db.is_unique_violation() => Self::Conflict(
                db.constraint()
                    .map(|c| format!("duplicate value violates {c}"))
                    .unwrap_or_else(|| "duplicate value".to_string()),
            ),
            _ => Self::Internal(err.to_string()),
        }
    }
}

/// Malformed multipart bodies are client errors; oversized ones are 413.
impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(err.body_text())
        } else {
            Self::BadRequest(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::PayloadTooLarge("x".into()),
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
            ),
            (AppError::Upload("x".into()), StatusCode::BAD_GATEWAY, "UPLOAD_ERROR"),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err}");
        }
    }

    #[test]
    fn not_found_names_kind_and_id() {
        let err = AppError::not_found("branch", "42");
        assert_eq!(err.to_string(), "not found: branch 42 not found");
    }

    #[test]
    fn validation_error_from_pnr_core() {
        let core_err = pnr_core::ValidationError::EmptyField { field: "name" };
        match AppError::from(core_err) {
            AppError::Validation(msg) => assert!(msg.contains("name"), "got: {msg}"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn object_store_error_becomes_upload() {
        let store_err = pnr_object_store::ObjectStoreError::ApiError {
            endpoint: "POST /raw/upload".into(),
            status: 500,
            body: "boom".into(),
        };
        assert!(matches!(AppError::from(store_err), AppError::Upload(_)));
    }

    #[test]
    fn non_database_sqlx_error_is_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn error_body_serializes_code_and_message() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: "TEST".to_string(),
                message: "test message".to_string(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": {"code": "TEST", "message": "test message"}})
        );
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_conflict() {
        let (status, body) = response_parts(AppError::Conflict("code R22 exists".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error.code, "CONFLICT");
        assert!(body.error.message.contains("R22"));
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("db connection failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
    }

    #[tokio::test]
    async fn into_response_upload_hides_details() {
        let (status, body) =
            response_parts(AppError::Upload("401 Invalid Signature".into())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error.code, "UPLOAD_ERROR");
        assert!(!body.error.message.contains("Signature"));
    }
}
