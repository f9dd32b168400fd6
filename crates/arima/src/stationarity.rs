//! KPSS level-stationarity test and differencing-order choice.

use vaxcast_stats::{is_constant, long_run_variance, mean};

use crate::difference::difference;
use crate::error::ArimaError;

/// Significance levels with tabulated KPSS (level) critical values.
const CRITICAL_VALUES: [(f64, f64); 4] = [
    (0.10, 0.347),
    (0.05, 0.463),
    (0.025, 0.574),
    (0.01, 0.739),
];

/// Outcome of a KPSS level-stationarity test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KpssResult {
    /// Test statistic.
    pub statistic: f64,
    /// Critical value at the requested significance level.
    pub critical_value: f64,
    /// Bartlett truncation lag used for the long-run variance.
    pub lags: usize,
}

impl KpssResult {
    /// `true` when the null of level stationarity is not rejected.
    pub fn is_stationary(&self) -> bool {
        self.statistic <= self.critical_value
    }
}

/// Tabulated critical value for `alpha`.
///
/// # Errors
///
/// [`ArimaError::InvalidConfig`] unless `alpha` is one of 0.10, 0.05, 0.025, 0.01.
pub fn critical_value(alpha: f64) -> Result<f64, ArimaError> {
    CRITICAL_VALUES
        .iter()
        .find(|(a, _)| (a - alpha).abs() < 1e-9)
        .map(|(_, cv)| *cv)
        .ok_or_else(|| ArimaError::InvalidConfig {
            reason: format!("KPSS alpha must be one of 0.10, 0.05, 0.025, 0.01, got {alpha}"),
        })
}

/// Short Bartlett window `trunc(3 sqrt(n) / 13)`.
fn truncation_lag(n: usize) -> usize {
    (3.0 * (n as f64).sqrt() / 13.0).trunc() as usize
}

/// KPSS test of the null hypothesis that `data` is stationary around a level.
///
/// A constant series is trivially stationary and yields a zero statistic.
///
/// # Errors
///
/// - [`ArimaError::InsufficientData`] for fewer than 2 observations.
/// - [`ArimaError::NonFiniteData`] if any value is NaN or infinite.
/// - [`ArimaError::InvalidConfig`] for an untabulated `alpha`.
pub fn kpss_level(data: &[f64], alpha: f64) -> Result<KpssResult, ArimaError> {
    let critical_value = critical_value(alpha)?;
    let n = data.len();
    if n < 2 {
        return Err(ArimaError::InsufficientData { n, min: 2 });
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(ArimaError::NonFiniteData);
    }
    let lags = truncation_lag(n);
    if is_constant(data) {
        return Ok(KpssResult {
            statistic: 0.0,
            critical_value,
            lags,
        });
    }

    let m = mean(data);
    let residuals: Vec<f64> = data.iter().map(|x| x - m).collect();
    let mut partial = 0.0;
    let eta = residuals
        .iter()
        .map(|e| {
            partial += e;
            partial * partial
        })
        .sum::<f64>()
        / (n * n) as f64;
    let s2 = long_run_variance(&residuals, lags);
    // The Bartlett estimate is positive semi-definite; zero only for degenerate input.
    let statistic = if s2 > 0.0 { eta / s2 } else { f64::INFINITY };

    Ok(KpssResult {
        statistic,
        critical_value,
        lags,
    })
}

/// Number of first differences needed for KPSS level stationarity.
///
/// Differences while the test rejects, up to `max_d`. Stops early when the
/// differenced series is constant or too short to test.
///
/// # Errors
///
/// Propagates [`kpss_level`] errors.
pub fn ndiffs(data: &[f64], alpha: f64, max_d: usize) -> Result<usize, ArimaError> {
    critical_value(alpha)?;
    if data.len() < 3 || is_constant(data) {
        return Ok(0);
    }
    let mut series = data.to_vec();
    let mut d = 0;
    while d < max_d {
        if kpss_level(&series, alpha)?.is_stationary() {
            break;
        }
        series = difference(&series, 1);
        d += 1;
        if series.len() < 3 || is_constant(&series) {
            break;
        }
    }
    Ok(d)
}
