//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area.
//! Routers are merged in [`crate::app`] and nested under `/api`.
//! Handlers validate input, call into [`crate::catalog`] and shape the
//! response; they hold no catalog logic of their own.

pub mod branches;
pub mod materials;
pub mod regulations;
pub mod search;
pub mod semesters;
pub mod sub_branches;
pub mod subjects;
pub mod years;

use axum::Router;

use crate::state::AppState;

/// All catalog routes, relative to the `/api` prefix.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(branches::router())
        .merge(sub_branches::router())
        .merge(regulations::router())
        .merge(years::router())
        .merge(semesters::router())
        .merge(subjects::router())
        .merge(materials::router())
        .merge(search::router())
}
