//! lexitest-ingest — Spreadsheet (CSV) ingestion.
//!
//! Sheets arrive with inconsistent column headers (Chinese, Vietnamese, or
//! English, in several spellings). Each logical field has a prioritized
//! alias list that is resolved against the header row once per import,
//! never per row.

pub mod columns;
pub mod reading;
pub mod vocab;

pub use columns::{ColumnMap, FieldSpec};
pub use reading::{parse_reading_csv, ReadingImport, ReadingQuestionRow, ReadingUnitRow};
pub use vocab::{parse_vocab_csv, VocabRow};

use serde::{Deserialize, Serialize};

/// Whether imported rows replace or extend the existing corpus sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    Append,
    Overwrite,
}

impl std::str::FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(ImportMode::Append),
            "overwrite" => Ok(ImportMode::Overwrite),
            other => Err(format!("unknown import mode: {other}")),
        }
    }
}

/// Outcome of one import pass: totals plus per-row diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Data rows seen (excluding the header).
    pub total: usize,
    /// Rows that produced an entity.
    pub imported: usize,
    /// Rows dropped entirely.
    pub skipped: usize,
    /// Row-level diagnostics; a row can be imported and still warn here
    /// (e.g. an invalid difficulty that fell back to the default).
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Record a diagnostic for a data row. `row_index` is zero-based over
    /// data rows; the message shows the spreadsheet line (header = line 1).
    pub fn row_error(&mut self, row_index: usize, message: impl std::fmt::Display) {
        self.errors.push(format!("row {}: {message}", row_index + 2));
    }
}
