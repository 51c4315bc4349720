//! Catalog operations.
//!
//! Each submodule implements one part of the catalog against [`AppState`].
//! Route handlers are thin adapters over these functions.
//!
//! [`AppState`]: crate::state::AppState

pub mod curriculum;
pub mod ingestion;
pub mod provisioning;
pub mod search;
pub mod subjects;
pub mod views;
