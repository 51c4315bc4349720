//! # Slugs
//!
//! Path-safe slugs used as folder segments in material storage paths.

/// Convert arbitrary text into a slug.
///
/// Lower-cases and trims the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, then strips leading and trailing `-`.
/// Empty or whitespace-only input yields an empty string.
///
/// ```
/// assert_eq!(pnr_core::slug("Data Structures & Algorithms"), "data-structures-algorithms");
/// assert_eq!(pnr_core::slug(""), "");
/// ```
pub fn slug(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for ch in lowered.trim().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out
}
