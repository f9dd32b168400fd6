//! Conversion of raw coverage tables into [`HistoricalSeries`].

use chrono::NaiveDate;
use tracing::debug;

use crate::error::SeriesError;
use crate::series::HistoricalSeries;
use crate::table::{Column, Table, wrong_type};

/// Column names, admissible range and minimum length for [`prepare`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareConfig {
    date_column: String,
    value_column: String,
    date_format: String,
    min_observations: usize,
    bounds: (f64, f64),
}

impl Default for PrepareConfig {
    /// `date` / `coverage_full_dose` columns, ISO dates, at least two
    /// observations, values in `[0, 100]`.
    fn default() -> Self {
        Self {
            date_column: "date".into(),
            value_column: "coverage_full_dose".into(),
            date_format: "%Y-%m-%d".into(),
            min_observations: 2,
            bounds: (0.0, 100.0),
        }
    }
}

impl PrepareConfig {
    /// Set the date column name.
    pub fn with_date_column(mut self, name: impl Into<String>) -> Self {
        self.date_column = name.into();
        self
    }

    /// Set the value column name.
    pub fn with_value_column(mut self, name: impl Into<String>) -> Self {
        self.value_column = name.into();
        self
    }

    /// Set the `chrono` format used to parse text dates.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the minimum number of usable observations.
    pub fn with_min_observations(mut self, n: usize) -> Self {
        self.min_observations = n;
        self
    }

    /// Set the admissible value range (inclusive).
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = (min, max);
        self
    }

    /// Date column name.
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// Value column name.
    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Text date format.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Minimum number of usable observations.
    pub fn min_observations(&self) -> usize {
        self.min_observations
    }

    /// Admissible value range.
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }
}

/// Extracts the ordered, de-duplicated daily series from `table`.
///
/// Rows with an absent date or value, or a non-finite value, are dropped.
/// Remaining rows are sorted by date; when a date repeats, the row that
/// comes last in the input wins. Extra columns are ignored.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SeriesError::MissingColumn`] | date or value column absent |
/// | [`SeriesError::WrongType`] | date column is float, value column is date |
/// | [`SeriesError::Parse`] | unparseable text cell |
/// | [`SeriesError::OutOfRange`] | value outside the configured bounds |
/// | [`SeriesError::InsufficientData`] | fewer than `min_observations` rows left |
pub fn prepare(table: &Table, config: &PrepareConfig) -> Result<HistoricalSeries, SeriesError> {
    let dates = date_cells(table, config)?;
    let values = value_cells(table, config)?;
    let (min, max) = config.bounds;

    let mut rows: Vec<(NaiveDate, f64)> = Vec::with_capacity(dates.len());
    let mut dropped = 0usize;
    for (row, (date, value)) in dates.into_iter().zip(values).enumerate() {
        let (Some(date), Some(value)) = (date, value) else {
            dropped += 1;
            continue;
        };
        if !value.is_finite() {
            dropped += 1;
            continue;
        }
        if value < min || value > max {
            return Err(SeriesError::OutOfRange {
                row,
                value,
                min,
                max,
            });
        }
        rows.push((date, value));
    }

    // Stable sort keeps input order among equal dates, so the last one wins.
    rows.sort_by_key(|(date, _)| *date);
    let mut deduped: Vec<(NaiveDate, f64)> = Vec::with_capacity(rows.len());
    let mut duplicates = 0usize;
    for (date, value) in rows {
        match deduped.last_mut() {
            Some(last) if last.0 == date => {
                last.1 = value;
                duplicates += 1;
            }
            _ => deduped.push((date, value)),
        }
    }

    debug!(
        rows = table.n_rows(),
        kept = deduped.len(),
        dropped,
        duplicates,
        "prepared series"
    );

    if deduped.len() < config.min_observations {
        return Err(SeriesError::InsufficientData {
            n: deduped.len(),
            min: config.min_observations,
        });
    }

    let (dates, values) = deduped.into_iter().unzip();
    Ok(HistoricalSeries::from_sorted(dates, values))
}

fn date_cells(table: &Table, config: &PrepareConfig) -> Result<Vec<Option<NaiveDate>>, SeriesError> {
    let name = config.date_column();
    match table.require(name)? {
        Column::Date(v) => Ok(v.clone()),
        Column::Text(v) => v
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.as_deref()
                    .map(|s| {
                        NaiveDate::parse_from_str(s, config.date_format()).map_err(|_| {
                            SeriesError::Parse {
                                column: name.to_string(),
                                row,
                                value: s.to_string(),
                            }
                        })
                    })
                    .transpose()
            })
            .collect(),
        other => Err(wrong_type(name, "date", other)),
    }
}

fn value_cells(table: &Table, config: &PrepareConfig) -> Result<Vec<Option<f64>>, SeriesError> {
    let name = config.value_column();
    match table.require(name)? {
        Column::Float(v) => Ok(v.clone()),
        Column::Text(v) => v
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.as_deref()
                    .map(|s| {
                        s.parse::<f64>().map_err(|_| SeriesError::Parse {
                            column: name.to_string(),
                            row,
                            value: s.to_string(),
                        })
                    })
                    .transpose()
            })
            .collect(),
        other => Err(wrong_type(name, "float", other)),
    }
}
