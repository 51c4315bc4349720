//! # Branches
//!
//! Routes:
//! - GET  /api/branches: List branches
//! - GET  /api/branches/{id}: Get a branch
//! - POST /api/branches: Create a branch

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use pnr_core::{required_text, BranchCode};

use crate::catalog::curriculum::{self, MAX_BRANCH_NAME_LEN};
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::{AppState, BranchRecord};

/// Request to create a branch.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    pub name: String,
    /// Stored upper-cased.
    pub code: String,
}

impl Validate for CreateBranchRequest {
    fn validate(&self) -> Result<(), pnr_core::ValidationError> {
        required_text("name", &self.name, MAX_BRANCH_NAME_LEN)?;
        BranchCode::new(&self.code)?;
        Ok(())
    }
}

/// Build the branches router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/branches", get(list_branches).post(create_branch))
        .route("/branches/:id", get(get_branch))
}

/// GET /api/branches: List branches, sorted by code.
#[utoipa::path(
    get,
    path = "/api/branches",
    responses(
        (status = 200, description = "All branches", body = Vec<BranchRecord>),
    ),
    tag = "curriculum"
)]
async fn list_branches(State(state): State<AppState>) -> Json<Vec<BranchRecord>> {
    Json(curriculum::list_branches(&state))
}

/// GET /api/branches/:id: Get a branch.
#[utoipa::path(
    get,
    path = "/api/branches/{id}",
    params(("id" = Uuid, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch found", body = BranchRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BranchRecord>, AppError> {
    curriculum::get_branch(&state, id).map(Json)
}

/// POST /api/branches: Create a branch.
#[utoipa::path(
    post,
    path = "/api/branches",
    request_body = CreateBranchRequest,
    responses(
        (status = 201, description = "Branch created", body = BranchRecord),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody),
        (status = 409, description = "Code already in use", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn create_branch(
    State(state): State<AppState>,
    body: Result<Json<CreateBranchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BranchRecord>), AppError> {
    let req = extract_validated_json(body)?;
    let record = curriculum::create_branch(&state, &req.name, &req.code).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
