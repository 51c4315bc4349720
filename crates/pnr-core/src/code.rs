//! # Curriculum Codes & Required Text
//!
//! Branch and regulation codes are the natural keys of the catalog. Both are
//! validated at construction; they differ in normalization:
//!
//! - [`BranchCode`] is trimmed and upper-cased (`" cse "` → `"CSE"`).
//! - [`RegulationCode`] is trimmed but keeps its case, and uniqueness is a
//!   case-sensitive exact match (`"R22"` and `"r22"` are distinct).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of any curriculum code.
pub const MAX_CODE_LEN: usize = 20;

/// Validate a required text field: trimmed, non-empty, at most `max` chars.
///
/// Returns the trimmed value.
///
/// # Errors
///
/// [`ValidationError::EmptyField`] for blank input,
/// [`ValidationError::FieldTooLong`] when the trimmed value exceeds `max`.
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Upper-cased, trimmed branch code (e.g. `"CSE"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchCode(String);

impl BranchCode {
    /// Normalize and validate a branch code.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the code is blank or longer than
    /// [`MAX_CODE_LEN`].
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        // Upper-casing can lengthen a string ("ß" -> "SS"), so measure afterwards.
        let upper = raw.trim().to_uppercase();
        Ok(Self(required_text("code", &upper, MAX_CODE_LEN)?))
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for BranchCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, case-preserving regulation code (e.g. `"R22"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegulationCode(String);

impl RegulationCode {
    /// Validate a regulation code.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the code is blank or longer than
    /// [`MAX_CODE_LEN`].
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        required_text("code", raw, MAX_CODE_LEN).map(Self)
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RegulationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_code_is_trimmed_and_uppercased() {
        let code = BranchCode::new("  cse ").unwrap();
        assert_eq!(code.as_str(), "CSE");
    }

    #[test]
    fn branch_code_rejects_blank() {
        assert_eq!(
            BranchCode::new("   "),
            Err(ValidationError::EmptyField { field: "code" })
        );
    }

    #[test]
    fn branch_code_rejects_overlong() {
        let long = "X".repeat(MAX_CODE_LEN + 1);
        assert!(matches!(
            BranchCode::new(&long),
            Err(ValidationError::FieldTooLong { field: "code", .. })
        ));
    }

    #[test]
    fn branch_code_length_is_measured_after_uppercasing() {
        let sharp_s = "\u{df}".repeat(MAX_CODE_LEN);
        assert!(matches!(
            BranchCode::new(&sharp_s),
            Err(ValidationError::FieldTooLong { field: "code", .. })
        ));
        let half = "\u{df}".repeat(MAX_CODE_LEN / 2);
        assert_eq!(BranchCode::new(&half).unwrap().as_str().chars().count(), MAX_CODE_LEN);
    }

    #[test]
    fn regulation_code_preserves_case() {
        let lower = RegulationCode::new("r22").unwrap();
        let upper = RegulationCode::new("R22").unwrap();
        assert_eq!(lower.as_str(), "r22");
        assert_ne!(lower, upper);
    }

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("name", "  Notes ", 10).unwrap(), "Notes");
    }

    #[test]
    fn required_text_counts_chars_not_bytes() {
        // Four chars, eight bytes.
        assert!(required_text("name", "éééé", 4).is_ok());
    }
}
