//! Regulation persistence operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::state::RegulationRecord;

/// Insert a new regulation. A duplicate code surfaces as a unique violation.
pub async fn insert(
    conn: &mut PgConnection,
    record: &RegulationRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO regulations (id, name, code, start_year, end_year, description)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.code)
    .bind(record.start_year)
    .bind(record.end_year)
    .bind(&record.description)
    .execute(conn)
    .await?;

    Ok(())
}

/// Load all regulations for hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<RegulationRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, RegulationRow>(
        "SELECT id, name, code, start_year, end_year, description FROM regulations",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(RegulationRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct RegulationRow {
    id: Uuid,
    name: String,
    code: String,
    start_year: i32,
    end_year: Option<i32>,
    description: Option<String>,
}

impl RegulationRow {
    fn into_record(self) -> RegulationRecord {
        RegulationRecord {
            id: self.id,
            name: self.name,
            code: self.code,
            start_year: self.start_year,
            end_year: self.end_year,
            description: self.description,
        }
    }
}
