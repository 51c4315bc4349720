//! # Regulations
//!
//! Routes:
//! - GET  /api/regulations: List regulations
//! - GET  /api/regulations/{id}: Get a regulation
//! - GET  /api/regulations/code/{code}: Get a regulation by its code
//! - POST /api/regulations: Create a regulation and provision the
//!   year/semester lattice

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use pnr_core::{required_text, RegulationCode, ValidationError};

use crate::catalog::curriculum;
use crate::catalog::provisioning::{self, NewRegulation, MAX_REGULATION_NAME_LEN};
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::{AppState, RegulationRecord};

/// Request to create a regulation.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegulationRequest {
    pub name: String,
    /// Case-sensitive, unique.
    pub code: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub description: Option<String>,
}

impl Validate for CreateRegulationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("name", &self.name, MAX_REGULATION_NAME_LEN)?;
        RegulationCode::new(&self.code)?;
        match self.end_year {
            Some(end) if end < self.start_year => Err(ValidationError::InvalidYearRange {
                start: self.start_year,
                end,
            }),
            _ => Ok(()),
        }
    }
}

/// Build the regulations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/regulations", get(list_regulations).post(create_regulation))
        .route("/regulations/:id", get(get_regulation))
        .route("/regulations/code/:code", get(get_regulation_by_code))
}

/// GET /api/regulations: List regulations, newest first.
#[utoipa::path(
    get,
    path = "/api/regulations",
    responses(
        (status = 200, description = "All regulations", body = Vec<RegulationRecord>),
    ),
    tag = "curriculum"
)]
async fn list_regulations(State(state): State<AppState>) -> Json<Vec<RegulationRecord>> {
    Json(curriculum::list_regulations(&state))
}

/// GET /api/regulations/:id: Get a regulation.
#[utoipa::path(
    get,
    path = "/api/regulations/{id}",
    params(("id" = Uuid, Path, description = "Regulation ID")),
    responses(
        (status = 200, description = "Regulation found", body = RegulationRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn get_regulation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegulationRecord>, AppError> {
    curriculum::get_regulation(&state, id).map(Json)
}

/// GET /api/regulations/code/:code: Get a regulation by code.
#[utoipa::path(
    get,
    path = "/api/regulations/code/{code}",
    params(("code" = String, Path, description = "Regulation code, e.g. R22")),
    responses(
        (status = 200, description = "Regulation found", body = RegulationRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn get_regulation_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<RegulationRecord>, AppError> {
    curriculum::get_regulation_by_code(&state, &code).map(Json)
}

/// POST /api/regulations: Create a regulation.
///
/// Also ensures year levels 1–4 and semesters 1–8 exist.
#[utoipa::path(
    post,
    path = "/api/regulations",
    request_body = CreateRegulationRequest,
    responses(
        (status = 201, description = "Regulation created", body = RegulationRecord),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody),
        (status = 409, description = "Code already in use", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn create_regulation(
    State(state): State<AppState>,
    body: Result<Json<CreateRegulationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegulationRecord>), AppError> {
    let req = extract_validated_json(body)?;
    let record = provisioning::create_regulation(
        &state,
        NewRegulation {
            name: req.name,
            code: req.code,
            start_year: req.start_year,
            end_year: req.end_year,
            description: req.description,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}
