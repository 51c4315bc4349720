//! Branch persistence operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::state::BranchRecord;

/// Insert a new branch. A duplicate code surfaces as a unique violation.
pub async fn insert(pool: &PgPool, record: &BranchRecord) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO branches (id, name, code) VALUES ($1, $2, $3)")
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.code)
        .execute(pool)
        .await?;

    Ok(())
}

/// Load all branches for hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<BranchRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, BranchRow>("SELECT id, name, code FROM branches ORDER BY code")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(BranchRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct BranchRow {
    id: Uuid,
    name: String,
    code: String,
}

impl BranchRow {
    fn into_record(self) -> BranchRecord {
        BranchRecord {
            id: self.id,
            name: self.name,
            code: self.code,
        }
    }
}
