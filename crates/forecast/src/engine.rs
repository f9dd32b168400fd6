//! Forecast computation for a fitted model.

use tracing::debug;
use vaxcast_arima::{ArimaFit, ArimaForecast};

use crate::error::ForecastError;

/// Forecasts `horizon` steps with a `level` interval from `fit`.
///
/// # Errors
///
/// [`ForecastError::DegenerateSeries`] if any point or bound is not finite;
/// [`ForecastError::Config`] for a level outside (0, 1).
pub fn run_engine(
    fit: &ArimaFit,
    horizon: usize,
    level: f64,
) -> Result<ArimaForecast, ForecastError> {
    let forecast = fit.forecast(horizon, level)?;
    let finite = forecast
        .point()
        .iter()
        .chain(forecast.lower())
        .chain(forecast.upper())
        .all(|x| x.is_finite());
    if !finite {
        return Err(ForecastError::DegenerateSeries {
            reason: format!("non-finite forecast from ARIMA{:?}", fit.order()),
        });
    }
    debug!(
        horizon,
        level,
        first = forecast.point().first().copied(),
        last = forecast.point().last().copied(),
        "forecast computed"
    );
    Ok(forecast)
}
