#![deny(missing_docs)]

//! # pnr-core: Foundational Types for the Print & Read Catalog
//!
//! Pure domain logic shared by the rest of the workspace. Nothing in this
//! crate performs I/O; storage and transport live in `pnr-api` and
//! `pnr-object-store`.
//!
//! ## Contents
//!
//! - [`slug`]: URL/path-safe slugs for subject names and material types.
//! - [`code`]: validated curriculum codes and required text fields.
//! - [`lattice`]: the fixed Year(1–4) × Semester(2 each) skeleton.
//! - [`filter`]: optional equality predicates over a subject's references.
//! - [`search`]: case-insensitive substring search terms with a result cap.
//! - [`material_path`]: deterministic object-store folders and filenames.
//! - [`error`]: [`ValidationError`], the only error type in this crate.

pub mod code;
pub mod error;
pub mod filter;
pub mod lattice;
pub mod material_path;
pub mod search;
pub mod slug;

pub use code::{required_text, BranchCode, RegulationCode};
pub use error::ValidationError;
pub use filter::{SubjectFilter, SubjectRefs};
pub use lattice::{semester_display_name, LatticeSlot};
pub use material_path::{material_folder, normalize_filename, MaterialLocation};
pub use search::{SearchTerm, SEARCH_RESULT_CAP};
pub use slug::slug;
