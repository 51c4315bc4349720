//! # pnr-api: Axum API Service for the Print & Read Catalog
//!
//! Serves the academic catalog: the curriculum hierarchy (branches,
//! sub-branches, regulations, year levels, semesters), filtered subject
//! listings, PDF material uploads and free-text search.
//!
//! ## API Surface
//!
//! | Prefix                  | Module                        | Domain            |
//! |-------------------------|-------------------------------|-------------------|
//! | `/api/branches/*`       | [`routes::branches`]          | Curriculum        |
//! | `/api/sub-branches/*`   | [`routes::sub_branches`]      | Curriculum        |
//! | `/api/regulations/*`    | [`routes::regulations`]       | Provisioning      |
//! | `/api/years/*`          | [`routes::years`]             | Curriculum        |
//! | `/api/semesters/*`      | [`routes::semesters`]         | Curriculum        |
//! | `/api/subjects/*`       | [`routes::subjects`]          | Subject catalog   |
//! | `/api/materials/*`      | [`routes::materials`]         | Ingestion         |
//! | `/api/search`           | [`routes::search`]            | Search            |
//!
//! `/`, `/health/*` and `/openapi.json` are served at the root.
//!
//! ## Storage
//!
//! The catalog is served from in-memory stores. With `DATABASE_URL` set,
//! writes go to Postgres first and the stores are hydrated on startup.
//! Material files go to the configured [`object_store::ObjectStore`].

pub mod catalog;
pub mod db;
pub mod error;
pub mod extractors;
pub mod object_store;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router.
///
/// Catalog routes are nested under `/api` and share the upload-sized body
/// limit. Health probes and the OpenAPI document sit at the root.
pub fn app(state: AppState) -> Router {
    let api = routes::api_router()
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    Router::new()
        .route("/", axum::routing::get(service_info))
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .merge(openapi::router())
        .nest("/api", api)
        .with_state(state)
}

/// GET /: Service descriptor.
async fn service_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": "pnr-api",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "objectStore": state.object_store.backend(),
        "database": state.db_pool.is_some(),
        "endpoints": [
            "/api/branches",
            "/api/sub-branches",
            "/api/regulations",
            "/api/years",
            "/api/semesters",
            "/api/subjects",
            "/api/materials",
            "/api/search",
        ],
    }))
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 "ready", or 503 when the database is unreachable.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    // Read locks acquirable.
    let _ = state.branches.len();
    let _ = state.materials.len();

    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}
