//! # Material Storage Paths
//!
//! Uploaded materials land in a deterministic folder derived from their place
//! in the curriculum:
//!
//! ```text
//! materials/{branch_code}/year{year_number}/{slug(subject)}/{slug(material_type)}
//! ```
//!
//! The (normalized) filename is the object key inside that folder.

use crate::slug::slug;

/// Root folder for every uploaded material.
pub const MATERIALS_ROOT: &str = "materials";

/// File extension every material is stored under.
pub const PDF_EXTENSION: &str = ".pdf";

/// Where a material is written in the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialLocation {
    /// Folder path, without leading or trailing `/`.
    pub folder: String,
    /// Object key within the folder.
    pub object_key: String,
}

impl MaterialLocation {
    /// Derive the location of a material.
    pub fn new(
        branch_code: &str,
        year_number: i32,
        subject_name: &str,
        material_type: &str,
        original_filename: Option<&str>,
        now_millis: i64,
    ) -> Self {
        Self {
            folder: material_folder(branch_code, year_number, subject_name, material_type),
            object_key: normalize_filename(original_filename, now_millis),
        }
    }
}

impl std::fmt::Display for MaterialLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.folder, self.object_key)
    }
}

/// Build the storage folder for a material.
///
/// ```
/// let folder = pnr_core::material_folder("CSE", 2, "Data Structures", "notes");
/// assert_eq!(folder, "materials/CSE/year2/data-structures/notes");
/// ```
pub fn material_folder(
    branch_code: &str,
    year_number: i32,
    subject_name: &str,
    material_type: &str,
) -> String {
    format!(
        "{MATERIALS_ROOT}/{branch_code}/year{year_number}/{}/{}",
        slug(subject_name),
        slug(material_type)
    )
}

/// Normalize the client-supplied filename into an object key.
///
/// Directory components sent by some clients are dropped and surrounding
/// whitespace is trimmed. A missing or blank name becomes
/// `material_{now_millis}.pdf`; a name without a case-insensitive `.pdf`
/// suffix gets one appended.
pub fn normalize_filename(original: Option<&str>, now_millis: i64) -> String {
    let base = original
        .map(|name| name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name))
        .map(str::trim)
        .filter(|name| !name.is_empty());

    match base {
        None => format!("material_{now_millis}{PDF_EXTENSION}"),
        Some(name) if name.to_lowercase().ends_with(PDF_EXTENSION) => name.to_string(),
        Some(name) => format!("{name}{PDF_EXTENSION}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_uses_branch_code_verbatim_and_slugs_the_rest() {
        assert_eq!(
            material_folder("CSE", 2, "Data Structures", "notes"),
            "materials/CSE/year2/data-structures/notes"
        );
        assert_eq!(
            material_folder("ECE", 4, "Signals & Systems", "Question Papers"),
            "materials/ECE/year4/signals-systems/question-papers"
        );
    }

    #[test]
    fn missing_filename_is_generated() {
        assert_eq!(normalize_filename(None, 1_700_000_000_000), "material_1700000000000.pdf");
        assert_eq!(normalize_filename(Some(""), 42), "material_42.pdf");
    }

    #[test]
    fn blank_filename_is_generated() {
        assert_eq!(normalize_filename(Some("  "), 42), "material_42.pdf");
        assert_eq!(normalize_filename(Some("dir/ \t"), 9), "material_9.pdf");
        assert_eq!(normalize_filename(Some(" unit1.pdf "), 0), "unit1.pdf");
    }

    #[test]
    fn pdf_suffix_is_case_insensitive() {
        assert_eq!(normalize_filename(Some("unit1.PDF"), 0), "unit1.PDF");
        assert_eq!(normalize_filename(Some("unit1.pdf"), 0), "unit1.pdf");
    }

    #[test]
    fn missing_suffix_is_appended() {
        assert_eq!(normalize_filename(Some("unit1"), 0), "unit1.pdf");
        assert_eq!(normalize_filename(Some("unit1.docx"), 0), "unit1.docx.pdf");
    }

    #[test]
    fn directory_components_are_dropped() {
        assert_eq!(normalize_filename(Some("C:\\Users\\me\\unit1.pdf"), 0), "unit1.pdf");
        assert_eq!(normalize_filename(Some("../../etc/passwd"), 0), "passwd.pdf");
        assert_eq!(normalize_filename(Some("dir/"), 7), "material_7.pdf");
    }

    #[test]
    fn location_displays_full_path() {
        let loc = MaterialLocation::new("CSE", 1, "Maths I", "notes", Some("u1"), 0);
        assert_eq!(loc.to_string(), "materials/CSE/year1/maths-i/notes/u1.pdf");
    }
}
