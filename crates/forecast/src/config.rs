//! Configuration for a forecasting run.

use vaxcast_arima::SelectionConfig;
use vaxcast_series::PrepareConfig;

use crate::error::ForecastError;

/// Horizon, interval level, output bounds and the preparation and selection
/// settings of one forecasting run.
///
/// # Example
///
/// ```
/// use vaxcast_forecast::ForecastConfig;
///
/// let config = ForecastConfig::default().with_horizon(14).with_level(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    horizon: usize,
    level: f64,
    bounds: (f64, f64),
    prepare: PrepareConfig,
    selection: SelectionConfig,
}

impl Default for ForecastConfig {
    /// 30 days ahead, 95% intervals, clamped to `[0, 100]`.
    fn default() -> Self {
        Self {
            horizon: 30,
            level: 0.95,
            bounds: (0.0, 100.0),
            prepare: PrepareConfig::default(),
            selection: SelectionConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Sets the number of days to forecast.
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the confidence level of the interval.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Sets the coverage range: observations outside it are rejected and
    /// forecasts are clamped to it.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = (min, max);
        self.prepare = std::mem::take(&mut self.prepare).with_bounds(min, max);
        self
    }

    /// Sets the series preparation settings.
    pub fn with_prepare(mut self, prepare: PrepareConfig) -> Self {
        self.prepare = prepare;
        self
    }

    /// Sets the order selection settings.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Forecast horizon in days.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Interval confidence level.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Output clamp range.
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    /// Series preparation settings.
    pub fn prepare(&self) -> &PrepareConfig {
        &self.prepare
    }

    /// Order selection settings.
    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// Validates this configuration.
    ///
    /// Returns an error if the horizon is zero, the level is outside
    /// (0, 1), the bounds are not finite and increasing, the preparation
    /// bounds differ from the output bounds, or the selection settings are
    /// invalid.
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.horizon == 0 {
            return Err(ForecastError::Config {
                reason: "horizon must be at least 1".into(),
            });
        }
        if !(self.level > 0.0 && self.level < 1.0) {
            return Err(ForecastError::Config {
                reason: format!("level must be in (0, 1), got {}", self.level),
            });
        }
        let (min, max) = self.bounds;
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ForecastError::Config {
                reason: format!("bounds must be finite with min < max, got [{min}, {max}]"),
            });
        }
        if self.prepare.bounds() != self.bounds {
            let (pmin, pmax) = self.prepare.bounds();
            return Err(ForecastError::Config {
                reason: format!(
                    "input bounds [{pmin}, {pmax}] differ from output bounds [{min}, {max}]"
                ),
            });
        }
        self.selection.validate()?;
        Ok(())
    }
}
