//! CSV reading into text [`Table`]s.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::SeriesError;
use crate::table::{Column, Table};

/// Configuration for reading coverage tables from CSV.
///
/// The [`Default`] implementation reads comma-separated files with a header
/// row and keeps every column.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field delimiter.
    delimiter: u8,
    /// Columns to keep, or `None` for all.
    columns: Option<Vec<String>>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            columns: None,
        }
    }
}

impl ReaderConfig {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Keep only the named columns; every name must be present in the file.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Field delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Selected columns, if restricted.
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }
}

/// Reads a CSV file with a header row into a table of text columns.
///
/// Cells are trimmed; empty cells become `None`.
///
/// # Errors
///
/// - [`SeriesError::FileNotFound`] if `path` does not exist.
/// - [`SeriesError::Csv`] for malformed input (including ragged rows).
/// - [`SeriesError::MissingColumn`] if a selected column is absent.
pub fn read_csv(path: &Path, config: &ReaderConfig) -> Result<Table, SeriesError> {
    let reader = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SeriesError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => SeriesError::Csv {
            reason: format!("{}: {e}", path.display()),
        },
    })?;
    let table = read_csv_from(reader, config)?;
    info!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.column_names().len(),
        "read coverage table"
    );
    Ok(table)
}

/// Reads CSV from any byte source; see [`read_csv`].
pub fn read_csv_from<R: Read>(source: R, config: &ReaderConfig) -> Result<Table, SeriesError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let selected: Vec<(String, usize)> = match &config.columns {
        Some(names) => names
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .map(|i| (name.clone(), i))
                    .ok_or_else(|| SeriesError::MissingColumn { name: name.clone() })
            })
            .collect::<Result<_, _>>()?,
        None => headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_string(), i))
            .collect(),
    };

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); selected.len()];
    for record in reader.records() {
        let record = record?;
        for (column, (_, index)) in cells.iter_mut().zip(&selected) {
            let value = record.get(*index).filter(|s| !s.is_empty());
            column.push(value.map(str::to_string));
        }
    }
    debug!(columns = selected.len(), rows = cells.first().map_or(0, Vec::len), "parsed csv");

    Table::new(
        selected
            .into_iter()
            .zip(cells)
            .map(|((name, _), values)| (name, Column::Text(values)))
            .collect(),
    )
}
