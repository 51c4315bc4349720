//! Sub-branch persistence operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::state::SubBranchRecord;

/// Insert a new sub-branch.
pub async fn insert(pool: &PgPool, record: &SubBranchRecord) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO sub_branches (id, name, code, branch_id) VALUES ($1, $2, $3, $4)")
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.code)
        .bind(record.branch_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Load all sub-branches for hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<SubBranchRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SubBranchRow>(
        "SELECT id, name, code, branch_id FROM sub_branches",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(SubBranchRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct SubBranchRow {
    id: Uuid,
    name: String,
    code: String,
    branch_id: Uuid,
}

impl SubBranchRow {
    fn into_record(self) -> SubBranchRecord {
        SubBranchRecord {
            id: self.id,
            name: self.name,
            code: self.code,
            branch_id: self.branch_id,
        }
    }
}
