//! Subject persistence operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::state::SubjectRecord;

/// Insert a new subject.
pub async fn insert(pool: &PgPool, record: &SubjectRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO subjects (id, name, code, branch_id, regulation_id, year_id,
         semester_id, sub_branch_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.code)
    .bind(record.branch_id)
    .bind(record.regulation_id)
    .bind(record.year_id)
    .bind(record.semester_id)
    .bind(record.sub_branch_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all subjects for hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<SubjectRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SubjectRow>(
        "SELECT id, name, code, branch_id, regulation_id, year_id, semester_id, sub_branch_id
         FROM subjects",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(SubjectRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct SubjectRow {
    id: Uuid,
    name: String,
    code: Option<String>,
    branch_id: Uuid,
    regulation_id: Uuid,
    year_id: Uuid,
    semester_id: Uuid,
    sub_branch_id: Option<Uuid>,
}

impl SubjectRow {
    fn into_record(self) -> SubjectRecord {
        SubjectRecord {
            id: self.id,
            name: self.name,
            code: self.code,
            branch_id: self.branch_id,
            regulation_id: self.regulation_id,
            year_id: self.year_id,
            semester_id: self.semester_id,
            sub_branch_id: self.sub_branch_id,
        }
    }
}
