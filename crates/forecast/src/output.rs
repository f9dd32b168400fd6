//! Forecast tables and model descriptions handed to consumers.

use chrono::NaiveDate;
use serde::Serialize;
use vaxcast_arima::Selection;

/// Description of the model behind a forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSpec {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    /// Whether a mean (`d = 0`) or drift (`d = 1`) was estimated.
    pub constant: bool,
    /// Ranking criterion name (`aic`, `aicc`, `bic`).
    pub criterion: &'static str,
    /// Criterion value; `None` when not finite (exact trend fits).
    pub score: Option<f64>,
    pub sigma2: f64,
    /// `None` when not finite.
    pub log_likelihood: Option<f64>,
    /// Observations after differencing.
    pub n_obs: usize,
    /// Candidates evaluated during the search.
    pub candidates: usize,
}

impl ModelSpec {
    /// Summarises a completed order selection.
    pub fn from_selection(selection: &Selection) -> Self {
        let fit = selection.fit();
        let (p, d, q) = fit.order();
        Self {
            p,
            d,
            q,
            constant: fit.spec().constant(),
            criterion: selection.criterion().name(),
            score: Some(selection.score()).filter(|s| s.is_finite()),
            sigma2: fit.sigma2(),
            log_likelihood: Some(fit.log_likelihood()).filter(|l| l.is_finite()),
            n_obs: fit.n_obs(),
            candidates: selection.trace().len(),
        }
    }

    /// `(p, d, q)`.
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }
}

/// One forecast day. Field order is the column order of the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    pub predicted: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub date: NaiveDate,
}

/// Forecast rows for consecutive days, or no rows when no forecast is
/// available.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
}

impl ForecastTable {
    pub(crate) fn new(rows: Vec<ForecastRow>) -> Self {
        Self { rows }
    }

    /// The "no forecast available" table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if a forecast is available.
    pub fn is_available(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` for the empty table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in date order.
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.predicted).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }
}
