//! The guarded forecasting pipeline.

use tracing::{info, warn};
use vaxcast_arima::{CandidateScore, select_order};
use vaxcast_series::{Table, prepare};

use crate::assemble::assemble;
use crate::config::ForecastConfig;
use crate::engine::run_engine;
use crate::error::ForecastError;
use crate::output::{ForecastTable, ModelSpec};
use crate::run::{ForecastRun, RunState};

/// A successful forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    table: ForecastTable,
    model: ModelSpec,
    trace: Vec<CandidateScore>,
    n_observations: usize,
}

impl Forecast {
    /// Dated forecast rows.
    pub fn table(&self) -> &ForecastTable {
        &self.table
    }

    /// The model that produced the rows.
    pub fn model(&self) -> &ModelSpec {
        &self.model
    }

    /// Order-selection trace.
    pub fn trace(&self) -> &[CandidateScore] {
        &self.trace
    }

    /// Observations in the prepared series.
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }
}

/// Result of the guarded [`forecast`]: a table that is empty on failure,
/// plus the model or the cause and the states the run visited.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutcome {
    result: Result<Forecast, ForecastError>,
    table: ForecastTable,
    states: Vec<RunState>,
}

impl ForecastOutcome {
    /// Forecast rows; empty when no forecast is available.
    pub fn table(&self) -> &ForecastTable {
        &self.table
    }

    /// Model description on success.
    pub fn model(&self) -> Option<&ModelSpec> {
        self.result.as_ref().ok().map(Forecast::model)
    }

    /// Cause of failure, if any.
    pub fn error(&self) -> Option<&ForecastError> {
        self.result.as_ref().err()
    }

    /// Returns `true` if a forecast is available.
    pub fn is_available(&self) -> bool {
        self.result.is_ok()
    }

    /// States visited by the run, `Idle` first and `Done` last.
    pub fn states(&self) -> &[RunState] {
        &self.states
    }

    /// The successful forecast or the typed cause.
    pub fn into_result(self) -> Result<Forecast, ForecastError> {
        self.result
    }

    pub fn result(&self) -> Result<&Forecast, &ForecastError> {
        self.result.as_ref()
    }
}

/// Runs preparation, order selection, fitting, forecasting and assembly,
/// returning the first error.
pub fn try_forecast(table: &Table, config: &ForecastConfig) -> Result<Forecast, ForecastError> {
    let mut run = ForecastRun::new();
    execute(table, config, &mut run)
}

/// Guarded pipeline: never fails. On error the table is empty, the cause is
/// kept in the outcome and a warning is logged.
///
/// # Example
///
/// ```
/// use vaxcast_forecast::{ForecastConfig, forecast};
/// use vaxcast_series::{Column, Table};
///
/// // No coverage column: reported, not raised.
/// let table = Table::new(vec![("date".into(), Column::Text(vec![Some("2021-05-01".into())]))])
///     .unwrap();
/// let outcome = forecast(&table, &ForecastConfig::default());
/// assert!(outcome.table().is_empty());
/// assert_eq!(outcome.error().map(|e| e.kind()), Some("schema"));
/// ```
pub fn forecast(table: &Table, config: &ForecastConfig) -> ForecastOutcome {
    let mut run = ForecastRun::new();
    let result = execute(table, config, &mut run);
    let table = match &result {
        Ok(forecast) => forecast.table.clone(),
        Err(e) => {
            let stage = run.state();
            run.fail();
            warn!(stage = ?stage, cause = e.kind(), error = %e, "no forecast available");
            ForecastTable::empty()
        }
    };
    ForecastOutcome {
        result,
        table,
        states: run.states().to_vec(),
    }
}

fn execute(
    table: &Table,
    config: &ForecastConfig,
    run: &mut ForecastRun,
) -> Result<Forecast, ForecastError> {
    config.validate()?;

    run.advance(RunState::Preparing);
    let series = prepare(table, config.prepare())?;
    let last_date = series.last_date().ok_or(ForecastError::InsufficientData {
        reason: "prepared series is empty".into(),
    })?;

    run.advance(RunState::SelectingOrder);
    let selection = select_order(series.values(), config.selection())?;

    run.advance(RunState::Fitting);
    let model = ModelSpec::from_selection(&selection);
    let fit = selection.fit();
    if !fit.sigma2().is_finite() || fit.ar().iter().chain(fit.ma()).any(|c| !c.is_finite()) {
        return Err(ForecastError::NonConvergence {
            reason: format!("non-finite parameters for ARIMA{:?}", fit.order()),
        });
    }

    run.advance(RunState::Forecasting);
    let raw = run_engine(fit, config.horizon(), config.level())?;
    let table = assemble(&raw, last_date, config.bounds())?;

    run.advance(RunState::Done);
    info!(
        order = ?model.order(),
        rows = table.len(),
        observations = series.len(),
        "forecast ready"
    );
    Ok(Forecast {
        table,
        model,
        trace: selection.trace().to_vec(),
        n_observations: series.len(),
    })
}
