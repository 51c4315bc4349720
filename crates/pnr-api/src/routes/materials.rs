//! # Materials
//!
//! Routes:
//! - GET  /api/materials?subjectId=: List materials, newest first
//! - GET  /api/materials/recent?limit=: Most recent uploads
//! - GET  /api/materials/{id}: Get a material
//! - POST /api/materials/upload: Multipart upload: a `data` part carrying
//!   `{subjectId, materialType, title}` as JSON and a `file` part with the PDF

use axum::extract::multipart::Field;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use pnr_core::{required_text, ValidationError};

use crate::catalog::ingestion::{
    self, UploadMaterial, MAX_MATERIAL_TITLE_LEN, MAX_MATERIAL_TYPE_LEN,
};
use crate::catalog::views::MaterialView;
use crate::error::AppError;
use crate::extractors::{extract_query, Validate};
use crate::state::AppState;

/// JSON metadata sent in the `data` part of an upload.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadMaterialRequest {
    pub subject_id: Uuid,
    /// Free-form category, e.g. "notes" or "question papers".
    pub material_type: String,
    pub title: String,
}

impl Validate for UploadMaterialRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("materialType", &self.material_type, MAX_MATERIAL_TYPE_LEN)?;
        required_text("title", &self.title, MAX_MATERIAL_TITLE_LEN)?;
        Ok(())
    }
}

/// Multipart body of `POST /api/materials/upload`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadMaterialForm {
    data: UploadMaterialRequest,
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialQuery {
    pub subject_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/materials", get(list_materials))
        .route("/materials/recent", get(recent_materials))
        .route("/materials/upload", post(upload_material))
        .route("/materials/:id", get(get_material))
}

/// GET /api/materials: List materials, optionally for one subject.
#[utoipa::path(
    get,
    path = "/api/materials",
    params(("subjectId" = Option<Uuid>, Query, description = "Restrict to one subject")),
    responses(
        (status = 200, description = "Materials, newest first", body = Vec<MaterialView>),
        (status = 400, description = "Malformed query", body = crate::error::ErrorBody),
    ),
    tag = "materials"
)]
async fn list_materials(
    State(state): State<AppState>,
    query: Result<Query<MaterialQuery>, QueryRejection>,
) -> Result<Json<Vec<MaterialView>>, AppError> {
    let query = extract_query(query)?;
    Ok(Json(ingestion::list_materials(&state, query.subject_id)))
}

/// GET /api/materials/recent: Most recently uploaded materials.
#[utoipa::path(
    get,
    path = "/api/materials/recent",
    params(("limit" = Option<usize>, Query, description = "Max items (default 10, max 100)")),
    responses(
        (status = 200, description = "Recent materials", body = Vec<MaterialView>),
        (status = 400, description = "Malformed query", body = crate::error::ErrorBody),
    ),
    tag = "materials"
)]
async fn recent_materials(
    State(state): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<Vec<MaterialView>>, AppError> {
    let query = extract_query(query)?;
    Ok(Json(ingestion::recent_materials(&state, query.limit)))
}

/// GET /api/materials/:id: Get a material.
#[utoipa::path(
    get,
    path = "/api/materials/{id}",
    params(("id" = Uuid, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material found", body = MaterialView),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "materials"
)]
async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaterialView>, AppError> {
    ingestion::get_material(&state, id).map(Json)
}

/// POST /api/materials/upload: Upload a material file.
///
/// The file is stored before the material is recorded; a store failure
/// returns 502 and records nothing.
#[utoipa::path(
    post,
    path = "/api/materials/upload",
    request_body(content = UploadMaterialForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Material uploaded", body = MaterialView),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody),
        (status = 404, description = "Subject not found", body = crate::error::ErrorBody),
        (status = 413, description = "Upload too large", body = crate::error::ErrorBody),
        (status = 502, description = "Object store failure", body = crate::error::ErrorBody),
    ),
    tag = "materials"
)]
async fn upload_material(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<MaterialView>), AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut data: Option<UploadMaterialRequest> = None;
    let mut file: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("data") => data = Some(parse_data_part(field).await?),
            Some("file") => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((bytes.to_vec(), filename));
            }
            other => {
                tracing::debug!(part = ?other, "ignoring unexpected multipart part");
            }
        }
    }

    let data = data.ok_or_else(|| AppError::BadRequest("missing multipart part `data`".into()))?;
    data.validate()?;
    let (bytes, original_filename) = file.unwrap_or_default();

    let view = ingestion::upload_material(
        &state,
        UploadMaterial {
            subject_id: data.subject_id,
            material_type: data.material_type,
            title: data.title,
            bytes,
            original_filename,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn parse_data_part(field: Field<'_>) -> Result<UploadMaterialRequest, AppError> {
    let text = field.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::BadRequest(format!("invalid `data` part: {e}")))
}
