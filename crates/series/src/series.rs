//! Validated daily observation series.

use chrono::NaiveDate;

use crate::error::SeriesError;
use crate::validate::ValidationCollector;

/// Ordered `(date, value)` observations of one tracked series.
///
/// Dates are strictly increasing and values finite and within the coverage
/// bounds, `[0, 100]` unless built with [`HistoricalSeries::with_bounds`].
/// Gaps between dates are allowed; missing days are never interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl HistoricalSeries {
    /// Builds a series of percentages from parallel date and value vectors.
    ///
    /// # Errors
    ///
    /// [`SeriesError::Validation`] listing a length mismatch, every
    /// non-finite value, every value outside `[0, 100]` and every date that
    /// does not increase.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        Self::with_bounds(dates, values, (0.0, 100.0))
    }

    /// Like [`HistoricalSeries::new`], with values checked against
    /// `[min, max]` instead of `[0, 100]`.
    pub fn with_bounds(
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        (min, max): (f64, f64),
    ) -> Result<Self, SeriesError> {
        let mut c = ValidationCollector::new();
        if dates.len() != values.len() {
            c.push(format!(
                "dates length {} != values length {}",
                dates.len(),
                values.len()
            ));
        }
        for (i, v) in values.iter().enumerate() {
            if !v.is_finite() {
                c.push(format!("non-finite value at index {i}: {v}"));
            } else if *v < min || *v > max {
                c.push(format!("value {v} at index {i} outside [{min}, {max}]"));
            }
        }
        for (i, w) in dates.windows(2).enumerate() {
            if w[1] <= w[0] {
                c.push(format!("date {} at index {} does not follow {}", w[1], i + 1, w[0]));
            }
        }
        c.finish()?;
        Ok(Self { dates, values })
    }

    pub(crate) fn from_sorted(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        Self { dates, values }
    }

    /// Observation dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observed values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Date of the most recent observation.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, d).unwrap()
    }

    #[test]
    fn valid_series() {
        let s = HistoricalSeries::new(vec![date(1), date(2), date(4)], vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.last_date(), Some(date(4)));
        assert!(!s.is_empty());
    }

    #[test]
    fn empty_series() {
        let s = HistoricalSeries::new(vec![], vec![]).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.last_date(), None);
    }

    #[test]
    fn rejects_every_problem_at_once() {
        let result = HistoricalSeries::new(
            vec![date(2), date(1), date(1)],
            vec![1.0, f64::NAN],
        );
        match result {
            Err(SeriesError::Validation { count, .. }) => assert_eq!(count, 4),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_values_outside_coverage_range() {
        let result = HistoricalSeries::new(vec![date(1), date(2)], vec![50.0, 150.0]);
        match result {
            Err(SeriesError::Validation { count, .. }) => assert_eq!(count, 1),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(HistoricalSeries::new(vec![date(1), date(2)], vec![-0.5, 10.0]).is_err());
        assert!(HistoricalSeries::new(vec![date(1), date(2)], vec![0.0, 100.0]).is_ok());
    }

    #[test]
    fn custom_bounds_widen_the_range() {
        let wide = (0.0, 1000.0);
        let s = HistoricalSeries::with_bounds(vec![date(1), date(2)], vec![50.0, 150.0], wide)
            .unwrap();
        assert_eq!(s.values(), &[50.0, 150.0]);
        assert!(HistoricalSeries::with_bounds(vec![date(1)], vec![1001.0], wide).is_err());
    }
}
