//! Select command: run order selection only and print the chosen models.

use anyhow::Result;
use tracing::{debug, info_span, warn};

use vaxcast_arima::{Selection, select_order};
use vaxcast_forecast::{ForecastConfig, ForecastError};
use vaxcast_series::{Table, prepare};

use crate::cli::SelectArgs;
use crate::convert;
use crate::input::{load_config, load_series};

/// Print one line per series: the selected order and its criterion value,
/// or the reason no model could be selected.
pub fn run(args: SelectArgs) -> Result<()> {
    let _cmd = info_span!("select").entered();
    let config = load_config(&args.config)?;
    let forecast_cfg = convert::build_forecast_config(&config)?;
    let series = load_series(&config, args.input, &args.keys)?;

    for (key, table) in &series {
        let _series = info_span!("series", key = %key).entered();
        match select(table, &forecast_cfg) {
            Ok((n, selection)) => {
                for candidate in selection.trace() {
                    debug!(order = ?candidate.order, score = ?candidate.score, "candidate");
                }
                println!("{}", describe(key, n, &selection));
            }
            Err(e) => {
                warn!(cause = e.kind(), error = %e, "no model selected");
                println!("{key}\tunavailable\t{}: {e}", e.kind());
            }
        }
    }
    Ok(())
}

fn select(table: &Table, config: &ForecastConfig) -> Result<(usize, Selection), ForecastError> {
    let series = prepare(table, config.prepare())?;
    let selection = select_order(series.values(), config.selection())?;
    Ok((series.len(), selection))
}

fn describe(key: &str, n: usize, selection: &Selection) -> String {
    let (p, d, q) = selection.order();
    let score = selection.score();
    let score = if score.is_finite() {
        format!("{score:.3}")
    } else {
        "exact".to_string()
    };
    format!(
        "{key}\tARIMA({p},{d},{q})\t{}={score}\tn={n}\tcandidates={}",
        selection.criterion().name(),
        selection.trace().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaxcast_series::Column;

    fn table(values: &[f64]) -> Table {
        let dates = (0..values.len())
            .map(|i| Some(format!("2021-06-{:02}", i + 1)))
            .collect();
        Table::new(vec![
            ("date".into(), Column::Text(dates)),
            (
                "coverage_full_dose".into(),
                Column::Float(values.iter().map(|v| Some(*v)).collect()),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn linear_ramp_is_an_exact_drift_model() {
        let values: Vec<f64> = (0..20).map(|i| 30.0 + 0.5 * i as f64).collect();
        let (n, selection) = select(&table(&values), &ForecastConfig::default()).unwrap();
        assert_eq!(n, 20);
        assert_eq!(selection.order(), (0, 1, 0));
        let line = describe("NLD", n, &selection);
        assert!(line.starts_with("NLD\tARIMA(0,1,0)\taic=exact"), "{line}");
    }

    #[test]
    fn failures_are_typed() {
        let err = select(&table(&[40.0; 12]), &ForecastConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "degenerate_series");
        let err = select(&table(&[40.0]), &ForecastConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "insufficient_data");
    }
}
