//! Column-oriented input tables with explicit absent cells.

use chrono::NaiveDate;

use crate::error::SeriesError;
use crate::validate::validate_columns;

/// One named column. `None` marks an absent cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Raw text, as read from CSV.
    Text(Vec<Option<String>>),
    /// Calendar dates.
    Date(Vec<Option<NaiveDate>>),
    /// Floating-point values.
    Float(Vec<Option<f64>>),
}

impl Column {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Date(v) => v.len(),
            Column::Float(v) => v.len(),
        }
    }

    /// Returns `true` if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Column::Text(_) => "text",
            Column::Date(_) => "date",
            Column::Float(_) => "float",
        }
    }

    fn select(&self, rows: &[usize]) -> Column {
        match self {
            Column::Text(v) => Column::Text(rows.iter().map(|&i| v[i].clone()).collect()),
            Column::Date(v) => Column::Date(rows.iter().map(|&i| v[i]).collect()),
            Column::Float(v) => Column::Float(rows.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// A rectangular table of named [`Column`]s.
///
/// Every column has the same number of rows; names are unique.
///
/// # Example
///
/// ```
/// use vaxcast_series::{Column, Table};
///
/// let table = Table::new(vec![
///     ("iso_code".into(), Column::Text(vec![Some("NLD".into()), Some("BEL".into())])),
///     ("coverage_full_dose".into(), Column::Float(vec![Some(60.1), None])),
/// ])
/// .unwrap();
///
/// let nld = table.filter_eq("iso_code", "NLD").unwrap();
/// assert_eq!(nld.n_rows(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Builds a table from `(name, column)` pairs.
    ///
    /// # Errors
    ///
    /// [`SeriesError::Validation`] listing every column whose length differs
    /// from the first one and every repeated name.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self, SeriesError> {
        let n_rows = columns.first().map_or(0, |(_, c)| c.len());
        validate_columns(columns.iter().map(|(n, c)| (n.as_str(), c.len())), n_rows).finish()?;
        let (names, columns) = columns.into_iter().unzip();
        Ok(Self {
            names,
            columns,
            n_rows,
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Column names in table order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// Like [`column`](Self::column) but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<&Column, SeriesError> {
        self.column(name).ok_or_else(|| SeriesError::MissingColumn {
            name: name.to_string(),
        })
    }

    /// Rows whose text column `column` equals `value`, in input order.
    ///
    /// # Errors
    ///
    /// [`SeriesError::MissingColumn`] or, for a non-text column,
    /// [`SeriesError::WrongType`].
    pub fn filter_eq(&self, column: &str, value: &str) -> Result<Table, SeriesError> {
        let col = self.require(column)?;
        let Column::Text(keys) = col else {
            return Err(wrong_type(column, "text", col));
        };
        let rows: Vec<usize> = keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.as_deref() == Some(value))
            .map(|(i, _)| i)
            .collect();
        Ok(Table {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(&rows)).collect(),
            n_rows: rows.len(),
        })
    }

    /// Distinct present values of a text column, in order of first
    /// appearance.
    pub fn distinct(&self, column: &str) -> Result<Vec<String>, SeriesError> {
        let col = self.require(column)?;
        let Column::Text(keys) = col else {
            return Err(wrong_type(column, "text", col));
        };
        let mut out: Vec<String> = Vec::new();
        for key in keys.iter().flatten() {
            if !out.contains(key) {
                out.push(key.clone());
            }
        }
        Ok(out)
    }
}

pub(crate) fn wrong_type(name: &str, expected: &'static str, found: &Column) -> SeriesError {
    SeriesError::WrongType {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[Option<&str>]) -> Column {
        Column::Text(values.iter().map(|v| v.map(str::to_string)).collect())
    }

    fn sample() -> Table {
        Table::new(vec![
            ("iso_code".into(), text(&[Some("NLD"), Some("BEL"), Some("NLD"), None])),
            (
                "value".into(),
                Column::Float(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_ragged_columns() {
        let result = Table::new(vec![
            ("a".into(), Column::Float(vec![Some(1.0), Some(2.0)])),
            ("b".into(), Column::Float(vec![Some(1.0)])),
        ]);
        assert!(matches!(result, Err(SeriesError::Validation { count: 1, .. })));
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let result = Table::new(vec![
            ("a".into(), Column::Float(vec![Some(1.0)])),
            ("a".into(), Column::Float(vec![Some(2.0)])),
        ]);
        assert!(matches!(result, Err(SeriesError::Validation { .. })));
    }

    #[test]
    fn empty_table() {
        let table = Table::new(vec![]).unwrap();
        assert_eq!(table.n_rows(), 0);
        assert!(table.column("date").is_none());
    }

    #[test]
    fn filter_keeps_matching_rows_in_order() {
        let nld = sample().filter_eq("iso_code", "NLD").unwrap();
        assert_eq!(nld.n_rows(), 2);
        assert_eq!(
            nld.column("value"),
            Some(&Column::Float(vec![Some(1.0), Some(3.0)]))
        );
    }

    #[test]
    fn filter_no_match_is_empty() {
        let none = sample().filter_eq("iso_code", "DEU").unwrap();
        assert_eq!(none.n_rows(), 0);
        assert_eq!(none.column_names().len(), 2);
    }

    #[test]
    fn filter_errors() {
        let table = sample();
        assert!(matches!(
            table.filter_eq("country", "NLD"),
            Err(SeriesError::MissingColumn { .. })
        ));
        assert!(matches!(
            table.filter_eq("value", "1"),
            Err(SeriesError::WrongType { expected: "text", found: "float", .. })
        ));
    }

    #[test]
    fn distinct_in_first_appearance_order() {
        assert_eq!(sample().distinct("iso_code").unwrap(), vec!["NLD", "BEL"]);
    }
}
