//! Per-column filter input

use super::PropertyMapping;

/// Pairs one column's mapping with its free-text filter input.
///
/// One filter mapping exists per visible column when per-column filtering is
/// enabled. The input starts empty, is mutated by user keystrokes, and is
/// read on every filter pass; the pairing itself lives until the column set
/// is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMapping {
    mapping: PropertyMapping,
    input: String,
}

impl FilterMapping {
    /// Creates a filter mapping for a column, with an empty input.
    pub fn new(mapping: PropertyMapping) -> Self {
        Self {
            mapping,
            input: String::new(),
        }
    }

    /// Returns the column mapping being filtered.
    pub fn mapping(&self) -> &PropertyMapping {
        &self.mapping
    }

    /// Returns the current filter text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the filter text.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Returns `true` if the filter has text to match against. Columns with
    /// an empty input are vacuously satisfied by every record.
    pub fn is_active(&self) -> bool {
        !self.input.is_empty()
    }
}
