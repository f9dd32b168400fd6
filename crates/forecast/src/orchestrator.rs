//! Per-series forecast state across refreshes.

use std::collections::BTreeMap;

use tracing::{info, warn};
use vaxcast_series::Table;

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::output::{ForecastTable, ModelSpec};
use crate::pipeline::{Forecast, ForecastOutcome, forecast};

/// Latest known state of one tracked series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesState {
    last_success: Option<Forecast>,
    last_error: Option<ForecastError>,
    runs: usize,
    failures: usize,
}

impl SeriesState {
    /// Last successful forecast, or the empty table if there never was one.
    pub fn table(&self) -> ForecastTable {
        self.last_success
            .as_ref()
            .map(|f| f.table().clone())
            .unwrap_or_default()
    }

    /// Last successful forecast.
    pub fn forecast(&self) -> Option<&Forecast> {
        self.last_success.as_ref()
    }

    /// Model of the last successful forecast.
    pub fn model(&self) -> Option<&ModelSpec> {
        self.last_success.as_ref().map(Forecast::model)
    }

    /// Cause of the most recent failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&ForecastError> {
        self.last_error.as_ref()
    }

    /// Number of refreshes run.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Number of refreshes that failed.
    pub fn failures(&self) -> usize {
        self.failures
    }
}

/// Owns the forecast state of every tracked series.
///
/// A successful refresh replaces the stored forecast; a failed one keeps the
/// previous successful forecast and records the cause. Refreshes run one at
/// a time on the caller's thread.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    config: ForecastConfig,
    series: BTreeMap<String, SeriesState>,
}

impl Orchestrator {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            series: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Runs the guarded pipeline for `key` and updates its state.
    pub fn refresh(&mut self, key: &str, table: &Table) -> ForecastOutcome {
        let outcome = forecast(table, &self.config);
        let state = self.series.entry(key.to_string()).or_default();
        state.runs += 1;
        match outcome.result() {
            Ok(result) => {
                info!(series = key, order = ?result.model().order(), "forecast refreshed");
                state.last_success = Some(result.clone());
                state.last_error = None;
            }
            Err(e) => {
                state.failures += 1;
                state.last_error = Some(e.clone());
                warn!(
                    series = key,
                    kept_previous = state.last_success.is_some(),
                    "refresh failed"
                );
            }
        }
        outcome
    }

    /// State of `key`, if it was ever refreshed.
    pub fn state(&self, key: &str) -> Option<&SeriesState> {
        self.series.get(key)
    }

    /// Latest successful forecast table for `key`.
    pub fn latest(&self, key: &str) -> Option<&ForecastTable> {
        self.series
            .get(key)
            .and_then(|s| s.last_success.as_ref())
            .map(Forecast::table)
    }

    /// Tracked keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}
