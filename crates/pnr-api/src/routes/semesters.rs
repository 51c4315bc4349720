//! # Semesters
//!
//! Routes:
//! - GET /api/semesters: List semesters
//! - GET /api/semesters/{id}: Get a semester
//! - GET /api/semesters/year/{yearId}: Semesters of a year level
//! - GET /api/semesters/year-number/{yearNumber}: Semesters of year N

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::catalog::curriculum;
use crate::catalog::views::SemesterView;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/semesters", get(list_semesters))
        .route("/semesters/:id", get(get_semester))
        .route("/semesters/year/:year_id", get(list_by_year))
        .route("/semesters/year-number/:year_number", get(list_by_year_number))
}

/// GET /api/semesters: List semesters by number.
#[utoipa::path(
    get,
    path = "/api/semesters",
    responses(
        (status = 200, description = "All semesters", body = Vec<SemesterView>),
    ),
    tag = "curriculum"
)]
async fn list_semesters(State(state): State<AppState>) -> Result<Json<Vec<SemesterView>>, AppError> {
    curriculum::list_semesters(&state).map(Json)
}

/// GET /api/semesters/:id: Get a semester.
#[utoipa::path(
    get,
    path = "/api/semesters/{id}",
    params(("id" = Uuid, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester found", body = SemesterView),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn get_semester(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SemesterView>, AppError> {
    curriculum::get_semester(&state, id).map(Json)
}

/// GET /api/semesters/year/:yearId: Semesters of one year level.
///
/// An unknown year returns an empty list.
#[utoipa::path(
    get,
    path = "/api/semesters/year/{yearId}",
    params(("yearId" = Uuid, Path, description = "Year level ID")),
    responses(
        (status = 200, description = "Semesters of the year", body = Vec<SemesterView>),
    ),
    tag = "curriculum"
)]
async fn list_by_year(
    State(state): State<AppState>,
    Path(year_id): Path<Uuid>,
) -> Result<Json<Vec<SemesterView>>, AppError> {
    curriculum::list_semesters_by_year(&state, year_id).map(Json)
}

/// GET /api/semesters/year-number/:yearNumber: Semesters of year N.
#[utoipa::path(
    get,
    path = "/api/semesters/year-number/{yearNumber}",
    params(("yearNumber" = i32, Path, description = "Year number, 1 to 4")),
    responses(
        (status = 200, description = "Semesters of the year", body = Vec<SemesterView>),
    ),
    tag = "curriculum"
)]
async fn list_by_year_number(
    State(state): State<AppState>,
    Path(year_number): Path<i32>,
) -> Result<Json<Vec<SemesterView>>, AppError> {
    curriculum::list_semesters_by_year_number(&state, year_number).map(Json)
}
