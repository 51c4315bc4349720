//! # Free-text Search Terms
//!
//! Case-insensitive substring containment. A blank query parses to `None`,
//! which callers answer with empty result lists rather than an error.

/// Maximum number of hits returned per entity type.
pub const SEARCH_RESULT_CAP: usize = 10;

/// A trimmed, lower-cased, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    /// Parse a raw query. Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// The normalized needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// True if `haystack` contains the term, ignoring case.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }

    /// True if any present field contains the term.
    ///
    /// Absent fields (`None`) never match.
    pub fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        fields.into_iter().flatten().any(|f| self.matches(f))
    }

    /// Keep the items accepted by `hit`, truncated to [`SEARCH_RESULT_CAP`].
    ///
    /// Iteration stops as soon as the cap is reached.
    pub fn collect_capped<T, I, F>(&self, items: I, mut hit: F) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&Self, &T) -> bool,
    {
        items
            .into_iter()
            .filter(|item| hit(self, item))
            .take(SEARCH_RESULT_CAP)
            .collect()
    }
}
