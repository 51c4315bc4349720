//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers that turn
//! axum rejections into [`AppError::BadRequest`] so every failure carries the
//! standard error body.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::error::AppError;

/// Trait for request types that can validate their business rules
/// beyond what serde deserialization checks.
pub trait Validate {
    /// Validate business rules.
    fn validate(&self) -> Result<(), pnr_core::ValidationError>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate()?;
    Ok(value)
}

/// Extract query parameters, mapping malformed values (e.g. a non-UUID id)
/// to [`AppError::BadRequest`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
