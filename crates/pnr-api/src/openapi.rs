//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Print & Read Catalog API",
        version = "0.1.0",
        description = "Academic catalog for Print & Read: branches, sub-branches, regulations, year levels and semesters; filtered subject listings; PDF material uploads to an object store; free-text search.\n\nAll catalog routes live under `/api`. Health probes (`/health/*`) and this document are served at the root."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Curriculum ───────────────────────────────────────────────────
        crate::routes::branches::list_branches,
        crate::routes::branches::get_branch,
        crate::routes::branches::create_branch,
        crate::routes::sub_branches::list_sub_branches,
        crate::routes::sub_branches::get_sub_branch,
        crate::routes::sub_branches::create_sub_branch,
        crate::routes::regulations::list_regulations,
        crate::routes::regulations::get_regulation,
        crate::routes::regulations::get_regulation_by_code,
        crate::routes::regulations::create_regulation,
        crate::routes::years::list_years,
        crate::routes::years::get_year,
        crate::routes::semesters::list_semesters,
        crate::routes::semesters::get_semester,
        crate::routes::semesters::list_by_year,
        crate::routes::semesters::list_by_year_number,
        // ── Subjects ─────────────────────────────────────────────────────
        crate::routes::subjects::list_subjects,
        crate::routes::subjects::get_subject,
        crate::routes::subjects::create_subject,
        // ── Materials ────────────────────────────────────────────────────
        crate::routes::materials::list_materials,
        crate::routes::materials::recent_materials,
        crate::routes::materials::get_material,
        crate::routes::materials::upload_material,
        // ── Search ───────────────────────────────────────────────────────
        crate::routes::search::search_catalog,
    ),
    components(
        schemas(
            // ── Records ─────────────────────────────────────────────────
            crate::state::BranchRecord,
            crate::state::RegulationRecord,
            crate::state::YearLevelRecord,
            // ── Views ───────────────────────────────────────────────────
            crate::catalog::views::SubBranchView,
            crate::catalog::views::SemesterView,
            crate::catalog::views::SubjectView,
            crate::catalog::views::MaterialView,
            crate::catalog::views::SearchResults,
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── Request DTOs ────────────────────────────────────────────
            crate::routes::branches::CreateBranchRequest,
            crate::routes::sub_branches::CreateSubBranchRequest,
            crate::routes::regulations::CreateRegulationRequest,
            crate::routes::subjects::CreateSubjectRequest,
            crate::routes::materials::UploadMaterialRequest,
            crate::routes::materials::UploadMaterialForm,
        )
    ),
    tags(
        (name = "curriculum", description = "Branches, sub-branches, regulations, years and semesters"),
        (name = "subjects", description = "Subject catalog and filtering"),
        (name = "materials", description = "Material uploads and listings"),
        (name = "search", description = "Free-text search"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
