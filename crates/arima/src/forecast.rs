//! Multi-step forecasts with normal confidence intervals.

use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::difference::integrate;
use crate::error::ArimaError;
use crate::fit::ArimaFit;
use crate::state_space::StateSpace;

/// Point forecasts and interval bounds for steps `1..=horizon`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArimaForecast {
    point: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    std_err: Vec<f64>,
    level: f64,
}

impl ArimaForecast {
    /// Point forecasts.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Lower interval bounds.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper interval bounds.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Forecast standard errors.
    pub fn std_err(&self) -> &[f64] {
        &self.std_err
    }

    /// Confidence level of the interval.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Number of forecast steps.
    pub fn len(&self) -> usize {
        self.point.len()
    }

    /// Returns `true` for a zero-step forecast.
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }
}

/// MA(∞) weights `psi_0..psi_{n-1}` of the integrated model
/// `phi(B) (1-B)^d y_t = theta(B) e_t`.
pub fn psi_weights(ar: &[f64], d: usize, ma: &[f64], n: usize) -> Vec<f64> {
    // Coefficients of 1 - sum phi_i B^i, then multiplied by (1 - B) d times.
    let mut poly = Vec::with_capacity(ar.len() + d + 1);
    poly.push(1.0);
    poly.extend(ar.iter().map(|phi| -phi));
    for _ in 0..d {
        let mut next = vec![0.0; poly.len() + 1];
        for (i, c) in poly.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c;
        }
        poly = next;
    }
    let phi_star: Vec<f64> = poly.iter().skip(1).map(|c| -c).collect();

    let mut psi = Vec::with_capacity(n);
    for j in 0..n {
        if j == 0 {
            psi.push(1.0);
            continue;
        }
        let mut value = ma.get(j - 1).copied().unwrap_or(0.0);
        for (i, phi) in phi_star.iter().enumerate().take(j) {
            value += phi * psi[j - 1 - i];
        }
        psi.push(value);
    }
    psi
}

/// Two-sided standard normal quantile for `level`.
fn z_score(level: f64) -> Result<f64, ArimaError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(ArimaError::InvalidLevel { level });
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| ArimaError::NumericalFailure {
        reason: e.to_string(),
    })?;
    Ok(normal.inverse_cdf(0.5 + level / 2.0))
}

pub(crate) fn forecast(
    fit: &ArimaFit,
    horizon: usize,
    level: f64,
) -> Result<ArimaForecast, ArimaError> {
    let z = z_score(level)?;

    // Propagate the final predicted state through the transition matrix.
    let ss = StateSpace::new(fit.ar(), fit.ma());
    let mut state = Array1::from(fit.final_state().to_vec());
    if state.len() != ss.dim() {
        return Err(ArimaError::NumericalFailure {
            reason: format!(
                "final state has length {}, expected {}",
                state.len(),
                ss.dim()
            ),
        });
    }
    let mut differenced = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        differenced.push(fit.mean() + state[0]);
        state = ss.transition().dot(&state);
    }
    let point = integrate(&differenced, fit.tails());

    let psi = psi_weights(fit.ar(), fit.spec().d(), fit.ma(), horizon);
    let mut cumulative = 0.0;
    let std_err: Vec<f64> = psi
        .iter()
        .map(|w| {
            cumulative += w * w;
            (fit.sigma2() * cumulative).sqrt()
        })
        .collect();

    let lower = point.iter().zip(&std_err).map(|(m, s)| m - z * s).collect();
    let upper = point.iter().zip(&std_err).map(|(m, s)| m + z * s).collect();

    Ok(ArimaForecast {
        point,
        lower,
        upper,
        std_err,
        level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ArimaSpec;
    use approx::assert_abs_diff_eq;

    #[test]
    fn psi_white_noise() {
        assert_eq!(psi_weights(&[], 0, &[], 4), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn psi_random_walk() {
        assert_eq!(psi_weights(&[], 1, &[], 4), vec![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn psi_ar1_is_geometric() {
        let psi = psi_weights(&[0.5], 0, &[], 4);
        for (j, w) in psi.iter().enumerate() {
            assert_abs_diff_eq!(*w, 0.5_f64.powi(j as i32), epsilon = 1e-12);
        }
    }

    #[test]
    fn psi_ma1() {
        assert_eq!(psi_weights(&[], 0, &[0.4], 3), vec![1.0, 0.4, 0.0]);
    }

    #[test]
    fn psi_d2_is_linear() {
        assert_eq!(psi_weights(&[], 2, &[], 4), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn z_score_95() {
        assert_abs_diff_eq!(z_score(0.95).unwrap(), 1.959964, epsilon = 1e-5);
    }

    #[test]
    fn z_score_rejects_bad_levels() {
        assert!(matches!(z_score(0.0), Err(ArimaError::InvalidLevel { .. })));
        assert!(matches!(z_score(1.0), Err(ArimaError::InvalidLevel { .. })));
        assert!(matches!(z_score(f64::NAN), Err(ArimaError::InvalidLevel { .. })));
    }

    #[test]
    fn exact_trend_forecast_is_linear_with_zero_width() {
        let data: Vec<f64> = (0..10).map(|i| 1.0 + 2.0 * i as f64).collect();
        let fit = ArimaSpec::new(0, 1, 0).fit(&data).unwrap();
        let fc = fit.forecast(5, 0.95).unwrap();
        for (h, value) in fc.point().iter().enumerate() {
            assert_abs_diff_eq!(*value, 19.0 + 2.0 * (h + 1) as f64, epsilon = 1e-9);
        }
        assert!(fc.std_err().iter().all(|s| *s == 0.0));
        assert_eq!(fc.lower(), fc.point());
    }

    #[test]
    fn intervals_widen_with_horizon() {
        let data = [1.0, 1.4, 1.3, 2.1, 2.0, 2.8, 3.1, 3.0, 3.9, 4.2, 4.1, 4.9];
        let fit = ArimaSpec::new(0, 1, 0).fit(&data).unwrap();
        let fc = fit.forecast(10, 0.95).unwrap();
        assert_eq!(fc.len(), 10);
        for w in fc.std_err().windows(2) {
            assert!(w[1] >= w[0]);
        }
        for i in 0..fc.len() {
            assert!(fc.lower()[i] <= fc.point()[i] && fc.point()[i] <= fc.upper()[i]);
        }
    }

    #[test]
    fn zero_horizon() {
        let data = [1.0, 2.0, 1.5, 2.5, 2.0];
        let fit = ArimaSpec::new(0, 0, 0).fit(&data).unwrap();
        assert!(fit.forecast(0, 0.9).unwrap().is_empty());
    }
}
