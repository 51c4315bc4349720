//! # Subject Catalog
//!
//! Filtered subject listings with every hierarchy reference resolved in one
//! join-projection step. Subjects are snapshotted first, then the tables they
//! reference, so the projection never looks up a row per subject.

use uuid::Uuid;

use pnr_core::{required_text, SubjectFilter};

use crate::catalog::views::{sort_subjects, SubjectProjector, SubjectView};
use crate::error::AppError;
use crate::state::{AppState, SubjectRecord};

/// Maximum subject name length.
pub const MAX_SUBJECT_NAME_LEN: usize = 200;
/// Maximum subject code length.
pub const MAX_SUBJECT_CODE_LEN: usize = 50;

/// Input for [`create_subject`].
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub code: Option<String>,
    pub branch_id: Uuid,
    pub regulation_id: Uuid,
    pub year_id: Uuid,
    pub semester_id: Uuid,
    pub sub_branch_id: Option<Uuid>,
}

/// Subjects matching every present predicate, sorted by name then id.
pub fn list_subjects(state: &AppState, filter: &SubjectFilter) -> Result<Vec<SubjectView>, AppError> {
    let mut subjects = state.subjects.filter(|s| filter.matches(&s.refs()));
    sort_subjects(&mut subjects);

    SubjectProjector::snapshot(state).project_all(subjects)
}

pub fn get_subject(state: &AppState, id: Uuid) -> Result<SubjectView, AppError> {
    let subject = state
        .subjects
        .get(&id)
        .ok_or_else(|| AppError::not_found("subject", id))?;
    SubjectProjector::snapshot(state).project(subject)
}

/// Create a subject. Every reference must resolve; the error names the
/// first one that does not.
pub async fn create_subject(state: &AppState, input: NewSubject) -> Result<SubjectView, AppError> {
    let name = required_text("name", &input.name, MAX_SUBJECT_NAME_LEN)?;
    let code = match input.code.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => Some(required_text("code", c, MAX_SUBJECT_CODE_LEN)?),
        _ => None,
    };

    let _guard = state.writer.lock().await;

    if !state.branches.contains(&input.branch_id) {
        return Err(AppError::not_found("branch", input.branch_id));
    }
    if !state.regulations.contains(&input.regulation_id) {
        return Err(AppError::not_found("regulation", input.regulation_id));
    }
    if !state.years.contains(&input.year_id) {
        return Err(AppError::not_found("year", input.year_id));
    }
    if !state.semesters.contains(&input.semester_id) {
        return Err(AppError::not_found("semester", input.semester_id));
    }
    if let Some(sb) = input.sub_branch_id {
        if !state.sub_branches.contains(&sb) {
            return Err(AppError::not_found("sub-branch", sb));
        }
    }

    let record = SubjectRecord {
        id: Uuid::new_v4(),
        name,
        code,
        branch_id: input.branch_id,
        regulation_id: input.regulation_id,
        year_id: input.year_id,
        semester_id: input.semester_id,
        sub_branch_id: input.sub_branch_id,
    };

    if let Some(pool) = &state.db_pool {
        crate::db::subjects::insert(pool, &record).await?;
    }
    state.subjects.insert(record.id, record.clone());
    tracing::info!(subject_id = %record.id, name = %record.name, "subject created");

    SubjectProjector::snapshot(state).project(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::curriculum::{create_branch, list_years, list_semesters_by_year_number};
    use crate::catalog::provisioning::{create_regulation, NewRegulation};

    struct Fixture {
        state: AppState,
        cse: Uuid,
        ece: Uuid,
        reg: Uuid,
        year1: Uuid,
        year2: Uuid,
        sem1: Uuid,
        sem3: Uuid,
    }

    async fn fixture() -> Fixture {
        let state = AppState::new();
        let cse = create_branch(&state, "Computer Science", "CSE").await.unwrap().id;
        let ece = create_branch(&state, "Electronics", "ECE").await.unwrap().id;
        let reg = create_regulation(
            &state,
            NewRegulation {
                name: "Regulation 2022".into(),
                code: "R22".into(),
                start_year: 2022,
                end_year: None,
                description: None,
            },
        )
        .await
        .unwrap()
        .id;
        let years = list_years(&state);
        let sem1 = list_semesters_by_year_number(&state, 1).unwrap()[0].id;
        let sem3 = list_semesters_by_year_number(&state, 2).unwrap()[0].id;
        Fixture {
            state,
            cse,
            ece,
            reg,
            year1: years[0].id,
            year2: years[1].id,
            sem1,
            sem3,
        }
    }

    fn subject(f: &Fixture, name: &str, branch: Uuid, year: Uuid, sem: Uuid) -> NewSubject {
        NewSubject {
            name: name.into(),
            code: None,
            branch_id: branch,
            regulation_id: f.reg,
            year_id: year,
            semester_id: sem,
            sub_branch_id: None,
        }
    }

    #[tokio::test]
    async fn filter_is_intersection_of_predicates() {
        let f = fixture().await;
        let a = create_subject(&f.state, subject(&f, "A Maths", f.cse, f.year1, f.sem1)).await.unwrap();
        let b = create_subject(&f.state, subject(&f, "B Data Structures", f.cse, f.year2, f.sem3)).await.unwrap();
        create_subject(&f.state, subject(&f, "C Circuits", f.ece, f.year1, f.sem1)).await.unwrap();

        let by_branch = SubjectFilter {
            branch_id: Some(f.cse),
            ..Default::default()
        };
        let ids: Vec<_> = list_subjects(&f.state, &by_branch).unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        let by_branch_year = SubjectFilter {
            branch_id: Some(f.cse),
            year_id: Some(f.year2),
            ..Default::default()
        };
        let hits = list_subjects(&f.state, &by_branch_year).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, b.id);

        assert_eq!(list_subjects(&f.state, &SubjectFilter::default()).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn listing_is_sorted_by_name_then_id() {
        let f = fixture().await;
        for name in ["Zoology", "Algebra", "Algebra", "Mechanics"] {
            create_subject(&f.state, subject(&f, name, f.cse, f.year1, f.sem1)).await.unwrap();
        }
        let listed = list_subjects(&f.state, &SubjectFilter::default()).unwrap();
        let names: Vec<_> = listed.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Algebra", "Algebra", "Mechanics", "Zoology"]);
        assert!(listed[0].id < listed[1].id);
    }

    #[tokio::test]
    async fn view_resolves_every_reference() {
        let f = fixture().await;
        let view = create_subject(
            &f.state,
            NewSubject {
                code: Some(" DS201 ".into()),
                ..subject(&f, "Data Structures", f.cse, f.year2, f.sem3)
            },
        )
        .await
        .unwrap();

        assert_eq!(view.code.as_deref(), Some("DS201"));
        assert_eq!(view.branch_code, "CSE");
        assert_eq!(view.regulation_code, "R22");
        assert_eq!(view.year_number, 2);
        assert_eq!(view.sem_number, 3);
        assert_eq!(view.semester_display_name, "Semester 3");
        assert_eq!(view.sub_branch_id, None);
        assert_eq!(view.material_count, 0);
        assert_eq!(get_subject(&f.state, view.id).unwrap(), view);
    }

    #[tokio::test]
    async fn missing_reference_is_named() {
        let f = fixture().await;
        let mut input = subject(&f, "Orphan", f.cse, f.year1, f.sem1);
        input.semester_id = Uuid::new_v4();
        match create_subject(&f.state, input).await.unwrap_err() {
            AppError::NotFound(msg) => assert!(msg.contains("semester"), "got: {msg}"),
            other => panic!("expected NotFound, got: {other:?}"),
        }

        let mut input = subject(&f, "Orphan", f.cse, f.year1, f.sem1);
        input.sub_branch_id = Some(Uuid::new_v4());
        match create_subject(&f.state, input).await.unwrap_err() {
            AppError::NotFound(msg) => assert!(msg.contains("sub-branch"), "got: {msg}"),
            other => panic!("expected NotFound, got: {other:?}"),
        }
        assert!(f.state.subjects.is_empty());
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let f = fixture().await;
        let err = create_subject(&f.state, subject(&f, "  ", f.cse, f.year1, f.sem1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
