//! Material persistence operations.
//!
//! `uploaded_on` is never bound by the caller: the column default assigns it
//! and the insert returns it.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::state::MaterialRecord;

/// Fields of a material known before it is persisted.
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub material_type: String,
    pub title: String,
    pub storage_url: String,
    pub storage_id: String,
    pub file_type: String,
}

impl NewMaterial {
    /// Attach the persist timestamp.
    pub fn into_record(self, uploaded_on: DateTime<Utc>) -> MaterialRecord {
        MaterialRecord {
            id: self.id,
            subject_id: self.subject_id,
            material_type: self.material_type,
            title: self.title,
            storage_url: self.storage_url,
            storage_id: self.storage_id,
            file_type: self.file_type,
            uploaded_on,
        }
    }
}

/// Insert a material and return the stored record with its `uploaded_on`.
pub async fn insert(pool: &PgPool, material: NewMaterial) -> Result<MaterialRecord, sqlx::Error> {
    let uploaded_on: DateTime<Utc> = sqlx::query_scalar(
        "INSERT INTO materials (id, subject_id, material_type, title, storage_url,
         storage_id, file_type)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING uploaded_on",
    )
    .bind(material.id)
    .bind(material.subject_id)
    .bind(&material.material_type)
    .bind(&material.title)
    .bind(&material.storage_url)
    .bind(&material.storage_id)
    .bind(&material.file_type)
    .fetch_one(pool)
    .await?;

    Ok(material.into_record(uploaded_on))
}

/// Load all materials for hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<MaterialRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MaterialRow>(
        "SELECT id, subject_id, material_type, title, storage_url, storage_id,
         file_type, uploaded_on
         FROM materials ORDER BY uploaded_on",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MaterialRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct MaterialRow {
    id: Uuid,
    subject_id: Uuid,
    material_type: String,
    title: String,
    storage_url: String,
    storage_id: String,
    file_type: String,
    uploaded_on: DateTime<Utc>,
}

impl MaterialRow {
    fn into_record(self) -> MaterialRecord {
        MaterialRecord {
            id: self.id,
            subject_id: self.subject_id,
            material_type: self.material_type,
            title: self.title,
            storage_url: self.storage_url,
            storage_id: self.storage_id,
            file_type: self.file_type,
            uploaded_on: self.uploaded_on,
        }
    }
}
