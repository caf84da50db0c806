//! Table types.

use serde::{Deserialize, Serialize};

/// A table extracted from a document, independent of its source format.
///
/// Body rows are expected to have as many cells as `headers`, but consumers
/// must tolerate short rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTable {
    /// Nearest preceding heading text, empty if none
    pub section: String,

    /// Header cells
    pub headers: Vec<String>,

    /// Body rows
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    /// Create a table.
    pub fn new(section: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            section: section.into(),
            headers,
            rows,
        }
    }

    /// Get the number of header cells.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// A table is only worth emitting with a header and at least one body row.
    pub fn is_emittable(&self) -> bool {
        !self.headers.is_empty() && !self.rows.is_empty()
    }

    /// Check if the section label contains `needle`, case-insensitively.
    pub fn section_matches(&self, needle: &str) -> bool {
        self.section
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Index of the first header whose case-folded text starts with `prefix`.
    pub fn header_starting_with(&self, prefix: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase().starts_with(prefix))
    }

    /// Index of the first header whose case-folded text contains `needle`.
    pub fn header_containing(&self, needle: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.to_lowercase().contains(needle))
    }

    /// Index of the header equal to `name` after case folding.
    pub fn header_named(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == name)
    }
}
