//! # Curriculum Store
//!
//! Create and read operations for branches, sub-branches, regulations, year
//! levels and semesters. Regulation creation lives in
//! [`provisioning`](super::provisioning) because it also provisions the
//! year/semester lattice.
//!
//! Writes run under [`AppState::writer`] and persist to Postgres (when
//! configured) before they are published to the in-memory stores.

use uuid::Uuid;

use pnr_core::{required_text, BranchCode};

use crate::catalog::views::{SemesterView, SubBranchView};
use crate::error::AppError;
use crate::state::{AppState, BranchRecord, RegulationRecord, SubBranchRecord, YearLevelRecord};

/// Maximum branch and sub-branch name length.
pub const MAX_BRANCH_NAME_LEN: usize = 100;

// -- Branches -----------------------------------------------------------------

/// Create a branch. The code is trimmed and upper-cased before the
/// uniqueness check.
pub async fn create_branch(state: &AppState, name: &str, code: &str) -> Result<BranchRecord, AppError> {
    let name = required_text("name", name, MAX_BRANCH_NAME_LEN)?;
    let code = BranchCode::new(code)?;

    let _guard = state.writer.lock().await;

    if state.branches.find(|b| b.code == code.as_str()).is_some() {
        return Err(AppError::Conflict(format!(
            "branch with code {code} already exists"
        )));
    }

    let record = BranchRecord {
        id: Uuid::new_v4(),
        name,
        code: code.into_string(),
    };

    if let Some(pool) = &state.db_pool {
        crate::db::branches::insert(pool, &record).await?;
    }
    state.branches.insert(record.id, record.clone());

    tracing::info!(branch_id = %record.id, code = %record.code, "branch created");
    Ok(record)
}

pub fn get_branch(state: &AppState, id: Uuid) -> Result<BranchRecord, AppError> {
    state
        .branches
        .get(&id)
        .ok_or_else(|| AppError::not_found("branch", id))
}

/// All branches, sorted by code.
pub fn list_branches(state: &AppState) -> Vec<BranchRecord> {
    let mut branches = state.branches.list();
    branches.sort_by(|a, b| a.code.cmp(&b.code));
    branches
}

// -- Sub-branches -------------------------------------------------------------

/// Create a sub-branch under an existing branch.
pub async fn create_sub_branch(
    state: &AppState,
    name: &str,
    code: &str,
    branch_id: Uuid,
) -> Result<SubBranchView, AppError> {
    let name = required_text("name", name, MAX_BRANCH_NAME_LEN)?;
    let code = BranchCode::new(code)?;

    let _guard = state.writer.lock().await;

    let branch = get_branch(state, branch_id)?;
    let record = SubBranchRecord {
        id: Uuid::new_v4(),
        name,
        code: code.into_string(),
        branch_id,
    };

    if let Some(pool) = &state.db_pool {
        crate::db::sub_branches::insert(pool, &record).await?;
    }
    state.sub_branches.insert(record.id, record.clone());

    tracing::info!(sub_branch_id = %record.id, branch = %branch.code, "sub-branch created");
    Ok(SubBranchView::project(record, &branch))
}

/// Sub-branches, optionally restricted to one branch, sorted by code.
pub fn list_sub_branches(state: &AppState, branch_id: Option<Uuid>) -> Result<Vec<SubBranchView>, AppError> {
    let mut records = state
        .sub_branches
        .filter(|sb| branch_id.map_or(true, |b| sb.branch_id == b));
    records.sort_by(|a, b| a.code.cmp(&b.code).then(a.id.cmp(&b.id)));

    let branches = state.branches.snapshot();
    records
        .into_iter()
        .map(|sb| {
            let branch = branches.get(&sb.branch_id).ok_or_else(|| {
                AppError::Internal(format!("sub-branch {} references missing branch", sb.id))
            })?;
            Ok(SubBranchView::project(sb, branch))
        })
        .collect()
}

pub fn get_sub_branch(state: &AppState, id: Uuid) -> Result<SubBranchView, AppError> {
    let record = state
        .sub_branches
        .get(&id)
        .ok_or_else(|| AppError::not_found("sub-branch", id))?;
    let branch = state.branches.get(&record.branch_id).ok_or_else(|| {
        AppError::Internal(format!("sub-branch {id} references missing branch"))
    })?;
    Ok(SubBranchView::project(record, &branch))
}

// -- Regulations --------------------------------------------------------------

pub fn get_regulation(state: &AppState, id: Uuid) -> Result<RegulationRecord, AppError> {
    state
        .regulations
        .get(&id)
        .ok_or_else(|| AppError::not_found("regulation", id))
}

/// Exact, case-sensitive lookup on the trimmed code.
pub fn get_regulation_by_code(state: &AppState, code: &str) -> Result<RegulationRecord, AppError> {
    let code = code.trim();
    state
        .regulations
        .find(|r| r.code == code)
        .ok_or_else(|| AppError::NotFound(format!("regulation with code {code} not found")))
}

/// All regulations, newest start year first, then by code.
pub fn list_regulations(state: &AppState) -> Vec<RegulationRecord> {
    let mut regs = state.regulations.list();
    regs.sort_by(|a, b| b.start_year.cmp(&a.start_year).then(a.code.cmp(&b.code)));
    regs
}

// -- Year levels --------------------------------------------------------------

/// All year levels, sorted by year number.
pub fn list_years(state: &AppState) -> Vec<YearLevelRecord> {
    let mut years = state.years.list();
    years.sort_by_key(|y| y.year_number);
    years
}

pub fn get_year(state: &AppState, id: Uuid) -> Result<YearLevelRecord, AppError> {
    state
        .years
        .get(&id)
        .ok_or_else(|| AppError::not_found("year", id))
}

// -- Semesters ----------------------------------------------------------------

fn semester_views(state: &AppState, year_filter: impl Fn(&YearLevelRecord) -> bool) -> Result<Vec<SemesterView>, AppError> {
    let years = state.years.snapshot();
    let mut views = Vec::new();
    for sem in state.semesters.list() {
        let year = years.get(&sem.year_id).ok_or_else(|| {
            AppError::Internal(format!("semester {} references missing year", sem.id))
        })?;
        if year_filter(year) {
            views.push(SemesterView::project(&sem, year));
        }
    }
    views.sort_by_key(|s| s.sem_number);
    Ok(views)
}

/// All semesters, sorted by semester number.
pub fn list_semesters(state: &AppState) -> Result<Vec<SemesterView>, AppError> {
    semester_views(state, |_| true)
}

pub fn get_semester(state: &AppState, id: Uuid) -> Result<SemesterView, AppError> {
    let sem = state
        .semesters
        .get(&id)
        .ok_or_else(|| AppError::not_found("semester", id))?;
    let year = state.years.get(&sem.year_id).ok_or_else(|| {
        AppError::Internal(format!("semester {id} references missing year"))
    })?;
    Ok(SemesterView::project(&sem, &year))
}

/// Semesters of one year level. An unknown year yields an empty list.
pub fn list_semesters_by_year(state: &AppState, year_id: Uuid) -> Result<Vec<SemesterView>, AppError> {
    semester_views(state, |y| y.id == year_id)
}

/// Semesters of the year level with `year_number`.
pub fn list_semesters_by_year_number(state: &AppState, year_number: i32) -> Result<Vec<SemesterView>, AppError> {
    semester_views(state, |y| y.year_number == year_number)
}
