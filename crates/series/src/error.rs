//! Error types for vaxcast-series.

use std::path::PathBuf;

/// Error type for all fallible operations in the vaxcast-series crate.
///
/// Covers file access, CSV decoding, table schema problems, cell parsing,
/// range checks, and series that are too short after cleaning.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a required column is not present in a table.
    #[error("column '{name}' not found")]
    MissingColumn {
        /// Name of the missing column.
        name: String,
    },

    /// Returned when a column holds a different kind of data than required.
    #[error("column '{name}' has type {found}, expected {expected}")]
    WrongType {
        /// Column name.
        name: String,
        /// Required column kind.
        expected: &'static str,
        /// Actual column kind.
        found: &'static str,
    },

    /// Returned when a text cell cannot be parsed.
    #[error("cannot parse '{value}' in column '{column}' at row {row}")]
    Parse {
        /// Column name.
        column: String,
        /// Zero-based row index.
        row: usize,
        /// Offending cell content.
        value: String,
    },

    /// Returned when an observed value lies outside the admissible range.
    #[error("value {value} at row {row} outside [{min}, {max}]")]
    OutOfRange {
        /// Zero-based row index.
        row: usize,
        /// Offending value.
        value: f64,
        /// Lower admissible bound.
        min: f64,
        /// Upper admissible bound.
        max: f64,
    },

    /// Returned when too few usable observations remain.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of usable observations.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl From<csv::Error> for SeriesError {
    fn from(e: csv::Error) -> Self {
        SeriesError::Csv {
            reason: e.to_string(),
        }
    }
}
