//! # Provisioning Engine
//!
//! Creating a regulation also guarantees the shared year/semester lattice:
//! year levels 1–4, each with its two semesters. Provisioning is idempotent,
//! so repeated calls converge to exactly four years and eight semesters.
//!
//! Provisioning runs under the catalog writer lock in two phases. Staging
//! computes the missing rows and, with Postgres, writes them inside one
//! transaction together with the new regulation. Publishing copies the staged
//! rows into the in-memory stores, and only happens after the commit, so a
//! failed insert leaves neither the database nor memory half provisioned.
//!
//! Database inserts are `ON CONFLICT DO NOTHING` against unique constraints
//! and the canonical row is read back, so another instance that provisioned
//! first is reused rather than treated as an error.

use sqlx::PgConnection;
use uuid::Uuid;

use pnr_core::lattice::plan;
use pnr_core::{required_text, RegulationCode, ValidationError};

use crate::error::AppError;
use crate::state::{AppState, RegulationRecord, SemesterRecord, YearLevelRecord};

/// Maximum regulation name length.
pub const MAX_REGULATION_NAME_LEN: usize = 100;

/// Input for [`create_regulation`].
#[derive(Debug, Clone)]
pub struct NewRegulation {
    pub name: String,
    pub code: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub description: Option<String>,
}

/// What one provisioning pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatticeReport {
    pub years_created: usize,
    pub semesters_created: usize,
}

/// Create a regulation and ensure the year/semester lattice in one step.
///
/// A duplicate code fails with [`AppError::Conflict`] before the lattice step.
/// If any insert fails, the regulation is not created either.
pub async fn create_regulation(
    state: &AppState,
    input: NewRegulation,
) -> Result<RegulationRecord, AppError> {
    let name = required_text("name", &input.name, MAX_REGULATION_NAME_LEN)?;
    let code = RegulationCode::new(&input.code)?;
    if let Some(end) = input.end_year {
        if end < input.start_year {
            return Err(ValidationError::InvalidYearRange {
                start: input.start_year,
                end,
            }
            .into());
        }
    }
    let description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let _guard = state.writer.lock().await;

    if state.regulations.find(|r| r.code == code.as_str()).is_some() {
        return Err(AppError::Conflict(format!(
            "regulation with code {code} already exists"
        )));
    }

    let record = RegulationRecord {
        id: Uuid::new_v4(),
        name,
        code: code.into_string(),
        start_year: input.start_year,
        end_year: input.end_year,
        description,
    };

    let staged = match &state.db_pool {
        Some(pool) => {
            let mut tx = pool.begin().await?;
            crate::db::regulations::insert(&mut *tx, &record).await?;
            let staged = stage_lattice(state, Some(&mut *tx)).await?;
            tx.commit().await?;
            staged
        }
        None => stage_lattice(state, None).await?,
    };

    state.regulations.insert(record.id, record.clone());
    tracing::info!(regulation_id = %record.id, code = %record.code, "regulation created");

    let report = staged.publish(state);
    if report != LatticeReport::default() {
        tracing::info!(
            years_created = report.years_created,
            semesters_created = report.semesters_created,
            "lattice provisioned for new regulation"
        );
    }

    Ok(record)
}

/// Ensure year levels 1–4 and their semesters exist.
pub async fn ensure_year_semester_lattice(state: &AppState) -> Result<LatticeReport, AppError> {
    let _guard = state.writer.lock().await;
    let staged = match &state.db_pool {
        Some(pool) => {
            let mut tx = pool.begin().await?;
            let staged = stage_lattice(state, Some(&mut *tx)).await?;
            tx.commit().await?;
            staged
        }
        None => stage_lattice(state, None).await?,
    };
    Ok(staged.publish(state))
}

/// Lattice rows that are missing from memory, not yet published.
#[derive(Debug, Default)]
struct StagedLattice {
    years: Vec<YearLevelRecord>,
    semesters: Vec<SemesterRecord>,
    report: LatticeReport,
}

impl StagedLattice {
    /// Make the staged rows visible to readers.
    fn publish(self, state: &AppState) -> LatticeReport {
        for year in self.years {
            state.years.insert(year.id, year);
        }
        for semester in self.semesters {
            state.semesters.insert(semester.id, semester);
        }
        self.report
    }
}

/// Work out, and persist through `conn` if given, the rows the lattice lacks.
///
/// The caller must hold `state.writer`. Nothing is written to memory here.
async fn stage_lattice(
    state: &AppState,
    mut conn: Option<&mut PgConnection>,
) -> Result<StagedLattice, AppError> {
    let mut staged = StagedLattice::default();

    for slot in plan() {
        let year = match state.years.find(|y| y.year_number == slot.year_number) {
            Some(existing) => existing,
            None => {
                let candidate = YearLevelRecord {
                    id: Uuid::new_v4(),
                    year_number: slot.year_number,
                };
                let stored = match conn.as_deref_mut() {
                    Some(c) => crate::db::lattice::ensure_year(c, &candidate).await?,
                    None => candidate.clone(),
                };
                if stored.id == candidate.id {
                    staged.report.years_created += 1;
                    tracing::info!(year_number = stored.year_number, "year level created");
                } else {
                    tracing::debug!(year_number = stored.year_number, "reusing stored year level");
                }
                staged.years.push(stored.clone());
                stored
            }
        };

        for sem_number in slot.sem_numbers {
            let exists = state
                .semesters
                .find(|s| s.year_id == year.id && s.sem_number == sem_number)
                .is_some();
            if exists {
                continue;
            }

            let candidate = SemesterRecord {
                id: Uuid::new_v4(),
                sem_number,
                year_id: year.id,
            };
            let stored = match conn.as_deref_mut() {
                Some(c) => crate::db::lattice::ensure_semester(c, &candidate).await?,
                None => candidate.clone(),
            };
            if stored.id == candidate.id {
                staged.report.semesters_created += 1;
                tracing::info!(sem_number, year_number = year.year_number, "semester created");
            } else {
                tracing::debug!(sem_number, "reusing stored semester");
            }
            staged.semesters.push(stored);
        }
    }

    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r22() -> NewRegulation {
        NewRegulation {
            name: "Regulation 2022".into(),
            code: "R22".into(),
            start_year: 2022,
            end_year: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn lattice_is_idempotent() {
        let state = AppState::new();
        let first = ensure_year_semester_lattice(&state).await.unwrap();
        assert_eq!(
            first,
            LatticeReport {
                years_created: 4,
                semesters_created: 8
            }
        );

        for _ in 0..3 {
            let again = ensure_year_semester_lattice(&state).await.unwrap();
            assert_eq!(again, LatticeReport::default());
        }
        assert_eq!(state.years.len(), 4);
        assert_eq!(state.semesters.len(), 8);
    }

    #[tokio::test]
    async fn lattice_fills_gaps_and_reuses_existing_years() {
        let state = AppState::new();
        let year2 = YearLevelRecord {
            id: Uuid::new_v4(),
            year_number: 2,
        };
        state.years.insert(year2.id, year2.clone());

        let report = ensure_year_semester_lattice(&state).await.unwrap();
        assert_eq!(report.years_created, 3);
        assert_eq!(report.semesters_created, 8);

        let sems_of_year2: Vec<i32> = {
            let mut v: Vec<i32> = state
                .semesters
                .filter(|s| s.year_id == year2.id)
                .into_iter()
                .map(|s| s.sem_number)
                .collect();
            v.sort_unstable();
            v
        };
        assert_eq!(sems_of_year2, [3, 4]);
    }

    #[tokio::test]
    async fn concurrent_provisioning_converges() {
        let state = AppState::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move { ensure_year_semester_lattice(&state).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert_eq!(state.years.len(), 4);
        assert_eq!(state.semesters.len(), 8);
    }

    #[tokio::test]
    async fn create_regulation_provisions_lattice() {
        let state = AppState::new();
        let reg = create_regulation(&state, r22()).await.unwrap();
        assert_eq!(reg.code, "R22");
        assert_eq!(state.years.len(), 4);
        assert_eq!(state.semesters.len(), 8);

        let mut r23 = r22();
        r23.code = "R23".into();
        create_regulation(&state, r23).await.unwrap();
        assert_eq!(state.years.len(), 4);
        assert_eq!(state.semesters.len(), 8);
    }

    #[tokio::test]
    async fn duplicate_code_conflicts_without_provisioning() {
        let state = AppState::new();
        let existing = RegulationRecord {
            id: Uuid::new_v4(),
            name: "Regulation 2022".into(),
            code: "R22".into(),
            start_year: 2022,
            end_year: None,
            description: None,
        };
        state.regulations.insert(existing.id, existing);

        let err = create_regulation(&state, r22()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(state.years.is_empty());
        assert!(state.semesters.is_empty());
    }

    #[tokio::test]
    async fn regulation_code_is_case_sensitive() {
        let state = AppState::new();
        create_regulation(&state, r22()).await.unwrap();
        let mut lower = r22();
        lower.code = "r22".into();
        assert!(create_regulation(&state, lower).await.is_ok());
        assert_eq!(state.regulations.len(), 2);
    }

    #[tokio::test]
    async fn end_year_before_start_year_is_rejected() {
        let state = AppState::new();
        let mut bad = r22();
        bad.end_year = Some(2020);
        assert!(matches!(
            create_regulation(&state, bad).await,
            Err(AppError::Validation(_))
        ));
        assert!(state.regulations.is_empty());
    }

    #[tokio::test]
    async fn staged_lattice_is_invisible_until_published() {
        let state = AppState::new();
        let _guard = state.writer.lock().await;
        let staged = stage_lattice(&state, None).await.unwrap();
        assert!(state.years.is_empty());
        assert!(state.semesters.is_empty());

        let report = staged.publish(&state);
        assert_eq!(report.years_created, 4);
        assert_eq!(state.years.len(), 4);
        assert_eq!(state.semesters.len(), 8);
    }

    #[tokio::test]
    async fn rejected_regulation_leaves_catalog_untouched() {
        let state = AppState::new();
        let mut bad = r22();
        bad.code = "  ".into();
        assert!(create_regulation(&state, bad).await.is_err());
        assert!(state.regulations.is_empty());
        assert!(state.years.is_empty());
        assert!(state.semesters.is_empty());
    }

    #[tokio::test]
    async fn blank_description_is_dropped() {
        let state = AppState::new();
        let mut input = r22();
        input.description = Some("   ".into());
        let reg = create_regulation(&state, input).await.unwrap();
        assert_eq!(reg.description, None);
    }
}
