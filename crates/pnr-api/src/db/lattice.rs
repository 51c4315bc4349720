//! Year level and semester persistence.
//!
//! Both inserts are `ON CONFLICT DO NOTHING` followed by a read of the
//! canonical row, so a concurrent provisioner that won the race is reused
//! rather than reported as an error.
//!
//! The `ensure_*` functions take a connection so provisioning can run them
//! inside the same transaction as the regulation that triggered it.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::state::{SemesterRecord, YearLevelRecord};

/// Ensure a year level exists, returning the stored row.
///
/// `candidate.id` is used only if no row for the year number exists yet.
pub async fn ensure_year(
    conn: &mut PgConnection,
    candidate: &YearLevelRecord,
) -> Result<YearLevelRecord, sqlx::Error> {
    let inserted = sqlx::query(
        "INSERT INTO year_levels (id, year_number) VALUES ($1, $2)
         ON CONFLICT (year_number) DO NOTHING",
    )
    .bind(candidate.id)
    .bind(candidate.year_number)
    .execute(&mut *conn)
    .await?;

    if inserted.rows_affected() == 0 {
        tracing::debug!(year_number = candidate.year_number, "year level already present");
    }

    let row = sqlx::query_as::<_, YearRow>(
        "SELECT id, year_number FROM year_levels WHERE year_number = $1",
    )
    .bind(candidate.year_number)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.into_record())
}

/// Ensure a semester exists for `(year_id, sem_number)`, returning the stored row.
pub async fn ensure_semester(
    conn: &mut PgConnection,
    candidate: &SemesterRecord,
) -> Result<SemesterRecord, sqlx::Error> {
    let inserted = sqlx::query(
        "INSERT INTO semesters (id, sem_number, year_id) VALUES ($1, $2, $3)
         ON CONFLICT (year_id, sem_number) DO NOTHING",
    )
    .bind(candidate.id)
    .bind(candidate.sem_number)
    .bind(candidate.year_id)
    .execute(&mut *conn)
    .await?;

    if inserted.rows_affected() == 0 {
        tracing::debug!(sem_number = candidate.sem_number, "semester already present");
    }

    let row = sqlx::query_as::<_, SemesterRow>(
        "SELECT id, sem_number, year_id FROM semesters WHERE year_id = $1 AND sem_number = $2",
    )
    .bind(candidate.year_id)
    .bind(candidate.sem_number)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.into_record())
}

/// Load all year levels for hydration.
pub async fn load_years(pool: &PgPool) -> Result<Vec<YearLevelRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, YearRow>(
        "SELECT id, year_number FROM year_levels ORDER BY year_number",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(YearRow::into_record).collect())
}

/// Load all semesters for hydration.
pub async fn load_semesters(pool: &PgPool) -> Result<Vec<SemesterRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SemesterRow>(
        "SELECT id, sem_number, year_id FROM semesters ORDER BY sem_number",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(SemesterRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct YearRow {
    id: Uuid,
    year_number: i32,
}

impl YearRow {
    fn into_record(self) -> YearLevelRecord {
        YearLevelRecord {
            id: self.id,
            year_number: self.year_number,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SemesterRow {
    id: Uuid,
    sem_number: i32,
    year_id: Uuid,
}

impl SemesterRow {
    fn into_record(self) -> SemesterRecord {
        SemesterRecord {
            id: self.id,
            sem_number: self.sem_number,
            year_id: self.year_id,
        }
    }
}
