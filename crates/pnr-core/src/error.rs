//! # Validation Errors
//!
//! Structured validation failures for catalog input, built with `thiserror`.
//! The API layer maps every variant to a 400 response.

use thiserror::Error;

/// A catalog input failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field, as it appears on the wire.
        field: &'static str,
    },

    /// A text field exceeded its storage limit.
    #[error("{field} must not exceed {max} characters")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// A regulation's end year precedes its start year.
    #[error("endYear {end} must not be before startYear {start}")]
    InvalidYearRange {
        /// Declared first year of validity.
        start: i32,
        /// Declared last year of validity.
        end: i32,
    },

    /// A year number outside the 1..=4 curriculum range.
    #[error("year number {0} is outside the curriculum range 1-4")]
    InvalidYearNumber(i32),

    /// An uploaded file had no content.
    #[error("uploaded file must not be empty")]
    EmptyFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_field() {
        let err = ValidationError::EmptyField { field: "name" };
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn field_too_long_carries_limit() {
        let err = ValidationError::FieldTooLong {
            field: "code",
            max: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("code"));
        assert!(msg.contains("20"));
    }

    #[test]
    fn year_range_mentions_both_years() {
        let msg = ValidationError::InvalidYearRange {
            start: 2022,
            end: 2020,
        }
        .to_string();
        assert!(msg.contains("2022"));
        assert!(msg.contains("2020"));
    }
}
