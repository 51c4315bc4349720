//! # Material Ingestion Pipeline
//!
//! Validate, resolve the subject's place in the curriculum, write the file to
//! the object store, then persist the material. A material row only exists
//! for a file the store has confirmed.
//!
//! The object-store call runs outside the catalog writer lock and is not
//! retried; the client's configured timeout is its deadline.

use chrono::Utc;
use uuid::Uuid;

use pnr_core::{required_text, MaterialLocation, ValidationError};

use crate::catalog::views::{project_materials, sort_materials_recent_first, MaterialView};
use crate::db::materials::NewMaterial;
use crate::error::AppError;
use crate::state::AppState;

/// Maximum material type length.
pub const MAX_MATERIAL_TYPE_LEN: usize = 50;
/// Maximum material title length.
pub const MAX_MATERIAL_TITLE_LEN: usize = 200;
/// Default number of materials returned by [`recent_materials`].
pub const DEFAULT_RECENT_LIMIT: usize = 10;
/// Upper bound on the recent-materials limit.
pub const MAX_RECENT_LIMIT: usize = 100;

/// Every stored material is a PDF.
const FILE_TYPE_PDF: &str = "pdf";

/// Input for [`upload_material`].
#[derive(Debug, Clone)]
pub struct UploadMaterial {
    pub subject_id: Uuid,
    pub material_type: String,
    pub title: String,
    pub bytes: Vec<u8>,
    pub original_filename: Option<String>,
}

/// Store a material file and record it against its subject.
pub async fn upload_material(state: &AppState, input: UploadMaterial) -> Result<MaterialView, AppError> {
    let material_type = required_text("materialType", &input.material_type, MAX_MATERIAL_TYPE_LEN)?;
    let title = required_text("title", &input.title, MAX_MATERIAL_TITLE_LEN)?;
    if input.bytes.is_empty() {
        return Err(ValidationError::EmptyFile.into());
    }

    let subject = state
        .subjects
        .get(&input.subject_id)
        .ok_or_else(|| AppError::not_found("subject", input.subject_id))?;
    let branch = state
        .branches
        .get(&subject.branch_id)
        .ok_or_else(|| AppError::not_found("branch", subject.branch_id))?;
    let year = state
        .years
        .get(&subject.year_id)
        .ok_or_else(|| AppError::not_found("year", subject.year_id))?;

    let location = MaterialLocation::new(
        &branch.code,
        year.year_number,
        &subject.name,
        &material_type,
        input.original_filename.as_deref(),
        Utc::now().timestamp_millis(),
    );

    let size = input.bytes.len();
    let stored = state
        .object_store
        .put(input.bytes, &location.folder, &location.object_key)
        .await
        .map_err(|e| {
            tracing::warn!(
                subject_id = %subject.id,
                location = %location,
                backend = state.object_store.backend(),
                error = %e,
                "material upload rejected by object store"
            );
            AppError::from(e)
        })?;

    let new = NewMaterial {
        id: Uuid::new_v4(),
        subject_id: subject.id,
        material_type,
        title,
        storage_url: stored.secure_url,
        storage_id: stored.public_id,
        file_type: FILE_TYPE_PDF.to_string(),
    };

    let record = {
        let _guard = state.writer.lock().await;
        let record = match &state.db_pool {
            Some(pool) => {
                let record = crate::db::materials::insert(pool, new).await?;
                state.clock.observe(record.uploaded_on);
                record
            }
            None => new.into_record(state.clock.stamp()),
        };
        state.materials.insert(record.id, record.clone());
        record
    };

    tracing::info!(
        material_id = %record.id,
        subject_id = %subject.id,
        storage_id = %record.storage_id,
        bytes = size,
        "material uploaded"
    );
    Ok(MaterialView::project(record, &subject.name))
}

/// Materials, optionally restricted to one subject, newest first.
pub fn list_materials(state: &AppState, subject_id: Option<Uuid>) -> Vec<MaterialView> {
    let mut materials = state
        .materials
        .filter(|m| subject_id.map_or(true, |s| m.subject_id == s));
    sort_materials_recent_first(&mut materials);
    project_materials(state, materials)
}

pub fn get_material(state: &AppState, id: Uuid) -> Result<MaterialView, AppError> {
    let record = state
        .materials
        .get(&id)
        .ok_or_else(|| AppError::not_found("material", id))?;
    let subject_name = state
        .subjects
        .get(&record.subject_id)
        .map(|s| s.name)
        .unwrap_or_default();
    Ok(MaterialView::project(record, &subject_name))
}

/// The `limit` most recently uploaded materials. `limit` is clamped to
/// `1..=MAX_RECENT_LIMIT`.
pub fn recent_materials(state: &AppState, limit: Option<usize>) -> Vec<MaterialView> {
    let limit = limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);
    let mut materials = state.materials.list();
    sort_materials_recent_first(&mut materials);
    materials.truncate(limit);
    project_materials(state, materials)
}
