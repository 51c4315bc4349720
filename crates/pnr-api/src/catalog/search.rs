//! # Free-text Search
//!
//! Case-insensitive substring search across subjects, materials, branches
//! and regulations. Each entity type is filtered independently and capped at
//! [`SEARCH_RESULT_CAP`](pnr_core::SEARCH_RESULT_CAP) hits.

use pnr_core::SearchTerm;

use crate::catalog::views::{
    project_materials, sort_materials_recent_first, sort_subjects, SearchResults, SubjectProjector,
};
use crate::catalog::curriculum::{list_branches, list_regulations};
use crate::error::AppError;
use crate::state::AppState;

/// Search the catalog. A blank query returns empty lists.
pub fn search(state: &AppState, q: &str) -> Result<SearchResults, AppError> {
    let Some(term) = SearchTerm::parse(q) else {
        return Ok(SearchResults {
            query: q.to_string(),
            ..Default::default()
        });
    };

    let mut subjects = state.subjects.list();
    sort_subjects(&mut subjects);
    let subjects = term.collect_capped(subjects, |t, s| {
        t.matches_any([Some(s.name.as_str()), s.code.as_deref()])
    });

    let mut materials = state.materials.list();
    sort_materials_recent_first(&mut materials);
    let materials = term.collect_capped(materials, |t, m| t.matches(&m.title));

    let branches = term.collect_capped(list_branches(state), |t, b| {
        t.matches_any([Some(b.name.as_str()), Some(b.code.as_str())])
    });
    let regulations = term.collect_capped(list_regulations(state), |t, r| {
        t.matches_any([Some(r.name.as_str()), Some(r.code.as_str())])
    });

    tracing::debug!(
        term = term.as_str(),
        subjects = subjects.len(),
        materials = materials.len(),
        branches = branches.len(),
        regulations = regulations.len(),
        "search served"
    );

    Ok(SearchResults {
        query: q.to_string(),
        subjects: SubjectProjector::snapshot(state).project_all(subjects)?,
        materials: project_materials(state, materials),
        branches,
        regulations,
    })
}
