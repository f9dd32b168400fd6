//! Statistical helper functions for the vaxcast forecaster.

/// Relative tolerance below which a series is treated as constant.
pub const CONSTANT_TOL: f64 = 1e-10;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Returns `true` when the spread of `data` is negligible relative to its
/// magnitude, or when `data` is empty.
///
/// Uses `max - min <= CONSTANT_TOL * max(1, max |x|)` so that exact linear
/// trends stay constant after differencing despite rounding noise.
pub fn is_constant(data: &[f64]) -> bool {
    if data.is_empty() {
        return true;
    }
    let min_val = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_val = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let scale = data.iter().fold(1.0_f64, |acc, x| acc.max(x.abs()));
    (max_val - min_val) <= CONSTANT_TOL * scale
}

/// Biased sample autocovariance at `lag` (denominator N, as in R's `acf()`).
///
/// Returns 0.0 if `lag >= data.len()`.
pub fn autocovariance(data: &[f64], lag: usize) -> f64 {
    let n = data.len();
    if lag >= n {
        return 0.0;
    }
    let m = mean(data);
    let sum: f64 = data[lag..]
        .iter()
        .zip(data.iter())
        .map(|(a, b)| (a - m) * (b - m))
        .sum();
    sum / n as f64
}

/// Newey-West long-run variance with a Bartlett kernel truncated at `lags`.
///
/// `s2 = gamma(0) + 2 sum_{l=1..L} (1 - l/(L+1)) gamma(l)`, with `gamma` the
/// biased [`autocovariance`].
pub fn long_run_variance(residuals: &[f64], lags: usize) -> f64 {
    let n = residuals.len();
    if n == 0 {
        return 0.0;
    }
    let mut s2 = autocovariance(residuals, 0);
    for l in 1..=lags.min(n - 1) {
        let weight = 1.0 - l as f64 / (lags as f64 + 1.0);
        s2 += 2.0 * weight * autocovariance(residuals, l);
    }
    s2
}
