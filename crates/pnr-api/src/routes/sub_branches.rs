//! # Sub-branches
//!
//! Routes:
//! - GET  /api/sub-branches?branchId=: List sub-branches
//! - GET  /api/sub-branches/{id}: Get a sub-branch
//! - POST /api/sub-branches: Create a sub-branch

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use pnr_core::{required_text, BranchCode};

use crate::catalog::curriculum::{self, MAX_BRANCH_NAME_LEN};
use crate::catalog::views::SubBranchView;
use crate::error::AppError;
use crate::extractors::{extract_query, extract_validated_json, Validate};
use crate::state::AppState;

/// Request to create a sub-branch.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubBranchRequest {
    pub name: String,
    pub code: String,
    pub branch_id: Uuid,
}

impl Validate for CreateSubBranchRequest {
    fn validate(&self) -> Result<(), pnr_core::ValidationError> {
        required_text("name", &self.name, MAX_BRANCH_NAME_LEN)?;
        BranchCode::new(&self.code)?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubBranchQuery {
    pub branch_id: Option<Uuid>,
}

/// Build the sub-branches router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sub-branches", get(list_sub_branches).post(create_sub_branch))
        .route("/sub-branches/:id", get(get_sub_branch))
}

/// GET /api/sub-branches: List sub-branches, optionally for one branch.
#[utoipa::path(
    get,
    path = "/api/sub-branches",
    params(("branchId" = Option<Uuid>, Query, description = "Restrict to one branch")),
    responses(
        (status = 200, description = "Sub-branches", body = Vec<SubBranchView>),
        (status = 400, description = "Malformed query", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn list_sub_branches(
    State(state): State<AppState>,
    query: Result<Query<SubBranchQuery>, QueryRejection>,
) -> Result<Json<Vec<SubBranchView>>, AppError> {
    let query = extract_query(query)?;
    curriculum::list_sub_branches(&state, query.branch_id).map(Json)
}

/// GET /api/sub-branches/:id: Get a sub-branch.
#[utoipa::path(
    get,
    path = "/api/sub-branches/{id}",
    params(("id" = Uuid, Path, description = "Sub-branch ID")),
    responses(
        (status = 200, description = "Sub-branch found", body = SubBranchView),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn get_sub_branch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubBranchView>, AppError> {
    curriculum::get_sub_branch(&state, id).map(Json)
}

/// POST /api/sub-branches: Create a sub-branch.
#[utoipa::path(
    post,
    path = "/api/sub-branches",
    request_body = CreateSubBranchRequest,
    responses(
        (status = 201, description = "Sub-branch created", body = SubBranchView),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody),
        (status = 404, description = "Branch not found", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn create_sub_branch(
    State(state): State<AppState>,
    body: Result<Json<CreateSubBranchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubBranchView>), AppError> {
    let req = extract_validated_json(body)?;
    let view = curriculum::create_sub_branch(&state, &req.name, &req.code, req.branch_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}
