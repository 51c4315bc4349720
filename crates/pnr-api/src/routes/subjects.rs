//! # Subjects
//!
//! Routes:
//! - GET  /api/subjects?branchId&regulationId&subBranchId&yearId&semesterId:
//!   Filtered subject listing; absent parameters do not constrain
//! - GET  /api/subjects/{id}: Get a subject
//! - POST /api/subjects: Create a subject

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use pnr_core::{required_text, SubjectFilter, ValidationError};

use crate::catalog::subjects::{self, NewSubject, MAX_SUBJECT_CODE_LEN, MAX_SUBJECT_NAME_LEN};
use crate::catalog::views::SubjectView;
use crate::error::AppError;
use crate::extractors::{extract_query, extract_validated_json, Validate};
use crate::state::AppState;

/// Request to create a subject.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: Option<String>,
    pub branch_id: Uuid,
    pub regulation_id: Uuid,
    pub year_id: Uuid,
    pub semester_id: Uuid,
    pub sub_branch_id: Option<Uuid>,
}

impl Validate for CreateSubjectRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("name", &self.name, MAX_SUBJECT_NAME_LEN)?;
        if let Some(code) = self.code.as_deref().filter(|c| !c.trim().is_empty()) {
            required_text("code", code, MAX_SUBJECT_CODE_LEN)?;
        }
        Ok(())
    }
}

/// Subject listing filter. Every parameter is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectQuery {
    pub branch_id: Option<Uuid>,
    pub regulation_id: Option<Uuid>,
    pub sub_branch_id: Option<Uuid>,
    pub year_id: Option<Uuid>,
    pub semester_id: Option<Uuid>,
}

impl From<SubjectQuery> for SubjectFilter {
    fn from(q: SubjectQuery) -> Self {
        SubjectFilter {
            branch_id: q.branch_id,
            regulation_id: q.regulation_id,
            sub_branch_id: q.sub_branch_id,
            year_id: q.year_id,
            semester_id: q.semester_id,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(list_subjects).post(create_subject))
        .route("/subjects/:id", get(get_subject))
}

/// GET /api/subjects: Filtered subject listing.
#[utoipa::path(
    get,
    path = "/api/subjects",
    params(
        ("branchId" = Option<Uuid>, Query, description = "Branch filter"),
        ("regulationId" = Option<Uuid>, Query, description = "Regulation filter"),
        ("subBranchId" = Option<Uuid>, Query, description = "Sub-branch filter"),
        ("yearId" = Option<Uuid>, Query, description = "Year level filter"),
        ("semesterId" = Option<Uuid>, Query, description = "Semester filter"),
    ),
    responses(
        (status = 200, description = "Matching subjects, by name", body = Vec<SubjectView>),
        (status = 400, description = "Malformed query", body = crate::error::ErrorBody),
    ),
    tag = "subjects"
)]
async fn list_subjects(
    State(state): State<AppState>,
    query: Result<Query<SubjectQuery>, QueryRejection>,
) -> Result<Json<Vec<SubjectView>>, AppError> {
    let filter = SubjectFilter::from(extract_query(query)?);
    subjects::list_subjects(&state, &filter).map(Json)
}

/// GET /api/subjects/:id: Get a subject.
#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject found", body = SubjectView),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "subjects"
)]
async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubjectView>, AppError> {
    subjects::get_subject(&state, id).map(Json)
}

/// POST /api/subjects: Create a subject.
#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = SubjectView),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody),
        (status = 404, description = "A referenced entity does not exist", body = crate::error::ErrorBody),
    ),
    tag = "subjects"
)]
async fn create_subject(
    State(state): State<AppState>,
    body: Result<Json<CreateSubjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubjectView>), AppError> {
    let req = extract_validated_json(body)?;
    let view = subjects::create_subject(
        &state,
        NewSubject {
            name: req.name,
            code: req.code,
            branch_id: req.branch_id,
            regulation_id: req.regulation_id,
            year_id: req.year_id,
            semester_id: req.semester_id,
            sub_branch_id: req.sub_branch_id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(view)))
}
