//! Domain models for the tidyshape pipeline.
//!
//! - [`Header`] - Ordered column names with a fixed width
//! - [`Record`] - One data row, keyed by header column name
//! - [`Batch`] - A header and the records that share it
//! - [`Triple`] - One pivoted `(country, year, cases)` output row

use serde::Serialize;

/// Column labels of the long output table. Fixed, never taken from the input header.
pub const OUTPUT_COLUMNS: [&str; 3] = ["country", "year", "cases"];

// =============================================================================
// Header
// =============================================================================

/// Ordered column names from the first input line.
///
/// `width` is captured once at construction and every record of the batch is
/// checked against it. Index 0 is the identifier column. Duplicate names are
/// allowed and told apart by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    width: usize,
}

impl Header {
    pub fn new(names: Vec<String>) -> Self {
        let width = names.len();
        Self { names, width }
    }

    /// A header with no columns (empty input).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Name of the identifier column, if the header has any columns.
    pub fn identifier(&self) -> Option<&str> {
        self.name(0)
    }

    /// Non-identifier columns with their positions.
    pub fn categories(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, name)| (i, name.as_str()))
    }
}

// =============================================================================
// Record
// =============================================================================

/// One data row as an ordered `(column, value)` association.
///
/// Built by zipping header names with row fields, so entry `i` belongs to
/// header column `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, String)>,
}

impl Record {
    /// Zip header names with row fields by position.
    ///
    /// Callers validate the width first; extra fields on either side are dropped.
    pub fn from_fields(header: &Header, fields: Vec<String>) -> Self {
        let entries = header
            .names()
            .iter()
            .cloned()
            .zip(fields)
            .collect();
        Self { entries }
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value for header column `index`.
    ///
    /// Uses the entry at the same position when its name matches, and falls
    /// back to a lookup by name otherwise.
    pub fn field_for(&self, header: &Header, index: usize) -> Option<&str> {
        let name = header.name(index)?;
        match self.entries.get(index) {
            Some((key, value)) if key == name => Some(value.as_str()),
            _ => self.get(name),
        }
    }
}

// =============================================================================
// Batch
// =============================================================================

/// A header plus the records read under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub header: Header,
    pub records: Vec<Record>,
}

impl Batch {
    pub fn new(header: Header, records: Vec<Record>) -> Self {
        Self { header, records }
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}

// =============================================================================
// Triple
// =============================================================================

/// One pivoted output row.
///
/// Serializes with the fixed [`OUTPUT_COLUMNS`] labels: the identifier plays
/// the `country` role, the category the `year` role and the value the `cases`
/// role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Triple {
    #[serde(rename = "country")]
    pub identifier: String,
    #[serde(rename = "year")]
    pub category: String,
    #[serde(rename = "cases")]
    pub value: String,
}

impl Triple {
    pub fn new(
        identifier: impl Into<String>,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            category: category.into(),
            value: value.into(),
        }
    }

    /// Comma-joined display form.
    pub fn to_line(&self) -> String {
        format!("{},{},{}", self.identifier, self.category, self.value)
    }
}
