//! Response projections.
//!
//! Views are built from in-memory snapshots that were taken before mapping
//! starts. Mapping never reads a store, so a listing costs one snapshot per
//! table regardless of how many rows it returns.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::{
    AppState, BranchRecord, MaterialRecord, RegulationRecord, SemesterRecord, SubBranchRecord,
    SubjectRecord, YearLevelRecord,
};

/// Sub-branch with its owning branch inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubBranchView {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub branch_id: Uuid,
    pub branch_code: String,
    pub branch_name: String,
}

impl SubBranchView {
    pub(crate) fn project(record: SubBranchRecord, branch: &BranchRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            code: record.code,
            branch_id: record.branch_id,
            branch_code: branch.code.clone(),
            branch_name: branch.name.clone(),
        }
    }
}

/// Semester with its year level and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterView {
    pub id: Uuid,
    pub sem_number: i32,
    /// e.g. "Semester 3".
    pub display_name: String,
    pub year_id: Uuid,
    pub year_number: i32,
}

impl SemesterView {
    pub(crate) fn project(record: &SemesterRecord, year: &YearLevelRecord) -> Self {
        Self {
            id: record.id,
            sem_number: record.sem_number,
            display_name: pnr_core::semester_display_name(record.sem_number),
            year_id: year.id,
            year_number: year.year_number,
        }
    }
}

/// Subject with every hierarchy reference resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub branch_id: Uuid,
    pub branch_code: String,
    pub branch_name: String,
    pub regulation_id: Uuid,
    pub regulation_code: String,
    pub regulation_name: String,
    pub year_id: Uuid,
    pub year_number: i32,
    pub semester_id: Uuid,
    pub sem_number: i32,
    pub semester_display_name: String,
    pub sub_branch_id: Option<Uuid>,
    pub sub_branch_code: Option<String>,
    pub sub_branch_name: Option<String>,
    /// Number of materials uploaded for this subject.
    pub material_count: usize,
}

/// Uploaded material with its subject name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialView {
    pub id: Uuid,
    pub title: String,
    pub material_type: String,
    /// Public HTTPS URL of the stored file.
    pub storage_url: String,
    pub file_type: String,
    pub uploaded_on: DateTime<Utc>,
    pub subject_id: Uuid,
    pub subject_name: String,
}

impl MaterialView {
    pub(crate) fn project(record: MaterialRecord, subject_name: &str) -> Self {
        Self {
            id: record.id,
            title: record.title,
            material_type: record.material_type,
            storage_url: record.storage_url,
            file_type: record.file_type,
            uploaded_on: record.uploaded_on,
            subject_id: record.subject_id,
            subject_name: subject_name.to_string(),
        }
    }
}

/// Free-text search hits, each list capped at ten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// The query as received.
    pub query: String,
    pub subjects: Vec<SubjectView>,
    pub materials: Vec<MaterialView>,
    pub branches: Vec<BranchRecord>,
    pub regulations: Vec<RegulationRecord>,
}

// -- Subject join-projection --------------------------------------------------

/// Snapshot of every table a [`SubjectView`] draws from.
///
/// Take it only after the subjects to project have been read: the catalog is
/// append-only, so every reference those subjects hold is then guaranteed to
/// be present.
pub(crate) struct SubjectProjector {
    branches: HashMap<Uuid, BranchRecord>,
    regulations: HashMap<Uuid, RegulationRecord>,
    years: HashMap<Uuid, YearLevelRecord>,
    semesters: HashMap<Uuid, SemesterRecord>,
    sub_branches: HashMap<Uuid, SubBranchRecord>,
    material_counts: HashMap<Uuid, usize>,
}

impl SubjectProjector {
    pub(crate) fn snapshot(state: &AppState) -> Self {
        let mut material_counts: HashMap<Uuid, usize> = HashMap::new();
        for m in state.materials.list() {
            *material_counts.entry(m.subject_id).or_default() += 1;
        }

        Self {
            branches: state.branches.snapshot(),
            regulations: state.regulations.snapshot(),
            years: state.years.snapshot(),
            semesters: state.semesters.snapshot(),
            sub_branches: state.sub_branches.snapshot(),
            material_counts,
        }
    }

    pub(crate) fn project(&self, s: SubjectRecord) -> Result<SubjectView, AppError> {
        let dangling = |kind: &str, id: Uuid| {
            AppError::Internal(format!("subject {} references missing {kind} {id}", s.id))
        };

        let branch = self
            .branches
            .get(&s.branch_id)
            .ok_or_else(|| dangling("branch", s.branch_id))?;
        let regulation = self
            .regulations
            .get(&s.regulation_id)
            .ok_or_else(|| dangling("regulation", s.regulation_id))?;
        let year = self
            .years
            .get(&s.year_id)
            .ok_or_else(|| dangling("year", s.year_id))?;
        let semester = self
            .semesters
            .get(&s.semester_id)
            .ok_or_else(|| dangling("semester", s.semester_id))?;
        let sub_branch = match s.sub_branch_id {
            Some(id) => Some(
                self.sub_branches
                    .get(&id)
                    .ok_or_else(|| dangling("sub-branch", id))?,
            ),
            None => None,
        };

        Ok(SubjectView {
            material_count: self.material_counts.get(&s.id).copied().unwrap_or(0),
            id: s.id,
            name: s.name,
            code: s.code,
            branch_id: branch.id,
            branch_code: branch.code.clone(),
            branch_name: branch.name.clone(),
            regulation_id: regulation.id,
            regulation_code: regulation.code.clone(),
            regulation_name: regulation.name.clone(),
            year_id: year.id,
            year_number: year.year_number,
            semester_id: semester.id,
            sem_number: semester.sem_number,
            semester_display_name: pnr_core::semester_display_name(semester.sem_number),
            sub_branch_id: sub_branch.map(|sb| sb.id),
            sub_branch_code: sub_branch.map(|sb| sb.code.clone()),
            sub_branch_name: sub_branch.map(|sb| sb.name.clone()),
        })
    }

    pub(crate) fn project_all(
        &self,
        subjects: Vec<SubjectRecord>,
    ) -> Result<Vec<SubjectView>, AppError> {
        subjects.into_iter().map(|s| self.project(s)).collect()
    }
}

/// Sort subjects by name, then id.
pub(crate) fn sort_subjects(subjects: &mut [SubjectRecord]) {
    subjects.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

/// Sort materials newest first, id as tie-break.
pub(crate) fn sort_materials_recent_first(materials: &mut [MaterialRecord]) {
    materials.sort_by(|a, b| b.uploaded_on.cmp(&a.uploaded_on).then(a.id.cmp(&b.id)));
}

/// Project materials using a single subject-name snapshot.
pub(crate) fn project_materials(state: &AppState, materials: Vec<MaterialRecord>) -> Vec<MaterialView> {
    let names: HashMap<Uuid, String> = state
        .subjects
        .list()
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    materials
        .into_iter()
        .map(|m| {
            let name = names.get(&m.subject_id).map(String::as_str).unwrap_or_default();
            MaterialView::project(m, name)
        })
        .collect()
}
