//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`SeriesError::Validation`].

use crate::error::SeriesError;

/// Accumulates validation errors and converts them into a single
/// [`SeriesError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` if nothing was recorded, otherwise one error joining every
    /// message with `"; "`.
    pub(crate) fn finish(self) -> Result<(), SeriesError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SeriesError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Check that every column has `expected` rows and no name repeats.
pub(crate) fn validate_columns<'a>(
    columns: impl IntoIterator<Item = (&'a str, usize)>,
    expected: usize,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let mut seen: Vec<&str> = Vec::new();
    for (name, len) in columns {
        if len != expected {
            c.push(format!("column '{name}' has {len} rows, expected {expected}"));
        }
        if seen.contains(&name) {
            c.push(format!("duplicate column '{name}'"));
        }
        seen.push(name);
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_empty_is_ok() {
        assert!(ValidationCollector::new().finish().is_ok());
    }

    #[test]
    fn collector_joins_messages() {
        let mut c = ValidationCollector::new();
        c.push("first");
        c.push(String::from("second"));
        assert_eq!(c.len(), 2);
        match c.finish() {
            Err(SeriesError::Validation { count, details }) => {
                assert_eq!(count, 2);
                assert_eq!(details, "first; second");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn columns_matching_lengths() {
        let c = validate_columns([("date", 3), ("value", 3)], 3);
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn columns_length_mismatch_and_duplicate() {
        let c = validate_columns([("date", 3), ("value", 2), ("date", 3)], 3);
        assert_eq!(c.len(), 2);
    }
}
