//! # Year/Semester Lattice
//!
//! Every regulation shares one academic calendar: four year levels with two
//! semesters each, numbered consecutively across years.
//!
//! ```text
//! year 1 → semesters 1, 2
//! year 2 → semesters 3, 4
//! year 3 → semesters 5, 6
//! year 4 → semesters 7, 8
//! ```
//!
//! This module only describes the lattice. Creating the records is the
//! provisioning engine's job in `pnr-api`.

use std::ops::RangeInclusive;

use crate::error::ValidationError;

/// Year numbers of the curriculum.
pub const YEAR_NUMBERS: RangeInclusive<i32> = 1..=4;

/// Semesters per year level.
pub const SEMESTERS_PER_YEAR: i32 = 2;

/// One year level of the lattice together with its semester numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeSlot {
    /// Year number, 1..=4.
    pub year_number: i32,
    /// The two semester numbers belonging to this year, ascending.
    pub sem_numbers: [i32; 2],
}

impl LatticeSlot {
    /// Build the slot for a year number.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidYearNumber`] outside 1..=4.
    pub fn for_year(year_number: i32) -> Result<Self, ValidationError> {
        if !YEAR_NUMBERS.contains(&year_number) {
            return Err(ValidationError::InvalidYearNumber(year_number));
        }
        let first = (year_number - 1) * SEMESTERS_PER_YEAR + 1;
        Ok(Self {
            year_number,
            sem_numbers: [first, first + 1],
        })
    }
}

/// The complete lattice, ordered by year number.
pub fn plan() -> Vec<LatticeSlot> {
    YEAR_NUMBERS
        .filter_map(|y| LatticeSlot::for_year(y).ok())
        .collect()
}

/// Human-readable semester label, e.g. `"Semester 3"`.
pub fn semester_display_name(sem_number: i32) -> String {
    format!("Semester {sem_number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_has_four_years_and_eight_semesters() {
        let slots = plan();
        assert_eq!(slots.len(), 4);
        let sems: Vec<i32> = slots.iter().flat_map(|s| s.sem_numbers).collect();
        assert_eq!(sems, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn plan_covers_every_year_number() {
        let years: Vec<i32> = plan().iter().map(|s| s.year_number).collect();
        assert_eq!(years, YEAR_NUMBERS.collect::<Vec<_>>());
    }

    #[test]
    fn year_two_owns_semesters_three_and_four() {
        let slot = LatticeSlot::for_year(2).unwrap();
        assert_eq!(slot.sem_numbers, [3, 4]);
    }

    #[test]
    fn out_of_range_years_are_rejected() {
        assert_eq!(
            LatticeSlot::for_year(0),
            Err(ValidationError::InvalidYearNumber(0))
        );
        assert_eq!(
            LatticeSlot::for_year(5),
            Err(ValidationError::InvalidYearNumber(5))
        );
    }

    #[test]
    fn display_name() {
        assert_eq!(semester_display_name(7), "Semester 7");
    }
}
