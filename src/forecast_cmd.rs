//! Forecast command: refresh every configured series and write a JSON report.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, warn};

use vaxcast_forecast::{ForecastError, ForecastTable, ModelSpec, Orchestrator, RunState};

use crate::cli::ForecastArgs;
use crate::convert;
use crate::input::{load_config, load_series};

/// Forecast status of one series in the report.
#[derive(Debug, Serialize)]
struct SeriesReport<'a> {
    /// `available` or `unavailable`.
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    observations: Option<usize>,
    model: Option<&'a ModelSpec>,
    diagnostic: Option<Diagnostic>,
    states: &'a [RunState],
    forecast: &'a ForecastTable,
}

#[derive(Debug, Serialize)]
struct Diagnostic {
    kind: &'static str,
    message: String,
}

impl From<&ForecastError> for Diagnostic {
    fn from(e: &ForecastError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Run the forecast pipeline for every selected series.
///
/// A series without a forecast is reported as unavailable with its cause;
/// only configuration and I/O problems make the command fail.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();
    // 1. Load project TOML
    let config = load_config(&args.config)?;
    let forecast_cfg = convert::build_forecast_config(&config)?;

    // 2. Read and split the coverage table
    let series = load_series(&config, args.input, &args.keys)?;

    // 3. Refresh each series
    let mut orchestrator = Orchestrator::new(forecast_cfg);
    let outcomes: Vec<_> = series
        .iter()
        .map(|(key, table)| {
            let _series = info_span!("series", key = %key).entered();
            (key.as_str(), orchestrator.refresh(key, table))
        })
        .collect();

    // 4. Build the report
    let report: BTreeMap<&str, SeriesReport<'_>> = outcomes
        .iter()
        .map(|(key, outcome)| {
            let report = SeriesReport {
                status: if outcome.is_available() {
                    "available"
                } else {
                    "unavailable"
                },
                observations: outcome.result().ok().map(|f| f.n_observations()),
                model: outcome.model(),
                diagnostic: outcome.error().map(Diagnostic::from),
                states: outcome.states(),
                forecast: outcome.table(),
            };
            (*key, report)
        })
        .collect();

    let unavailable = report.values().filter(|r| r.diagnostic.is_some()).count();
    if unavailable > 0 {
        warn!(unavailable, total = report.len(), "some series have no forecast");
    }

    // 5. Write JSON
    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    match args.output.or(config.io.output) {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), series = report.len(), "report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
