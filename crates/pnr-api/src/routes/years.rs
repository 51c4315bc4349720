//! Year levels. Read-only; the lattice is provisioned with regulations.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::catalog::curriculum;
use crate::error::AppError;
use crate::state::{AppState, YearLevelRecord};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/years", get(list_years))
        .route("/years/:id", get(get_year))
}

/// GET /api/years: List year levels.
#[utoipa::path(
    get,
    path = "/api/years",
    responses(
        (status = 200, description = "Year levels by number", body = Vec<YearLevelRecord>),
    ),
    tag = "curriculum"
)]
async fn list_years(State(state): State<AppState>) -> Json<Vec<YearLevelRecord>> {
    Json(curriculum::list_years(&state))
}

/// GET /api/years/:id: Get a year level.
#[utoipa::path(
    get,
    path = "/api/years/{id}",
    params(("id" = Uuid, Path, description = "Year level ID")),
    responses(
        (status = 200, description = "Year level found", body = YearLevelRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "curriculum"
)]
async fn get_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<YearLevelRecord>, AppError> {
    curriculum::get_year(&state, id).map(Json)
}
