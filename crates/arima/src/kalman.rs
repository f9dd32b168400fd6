//! Kalman filter for ARMA likelihood evaluation.
//!
//! Univariate filter over the state-space form in [`crate::state_space`],
//! started from the stationary state covariance. The innovation variance is
//! concentrated out of the Gaussian likelihood via prediction error
//! decomposition, so the optimiser only searches over coefficients.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Axis};

use crate::error::ArimaError;
use crate::state_space::StateSpace;

/// Smallest admissible prediction variance (in units of sigma2).
const MIN_PREDICTION_VARIANCE: f64 = 1e-10;

/// Result of a complete filter pass.
#[derive(Clone, Debug)]
pub(crate) struct KalmanOutput {
    /// Maximum-likelihood innovation variance.
    pub(crate) sigma2: f64,
    /// One-step-ahead prediction errors.
    pub(crate) residuals: Vec<f64>,
    /// Concentrated Gaussian log-likelihood at `sigma2`.
    pub(crate) log_likelihood: f64,
    /// Predicted state for the first step after the sample.
    pub(crate) final_state: Vec<f64>,
}

struct Pass {
    weighted_ss: f64,
    log_det: f64,
    innovations: Vec<f64>,
    final_state: Array1<f64>,
}

fn run_filter(ss: &StateSpace, data: &[f64]) -> Result<Pass, ArimaError> {
    let t = ss.transition();
    let mut a: Array1<f64> = Array1::zeros(ss.dim());
    let mut p = ss.stationary_covariance()?;

    let mut weighted_ss = 0.0;
    let mut log_det = 0.0;
    let mut innovations = Vec::with_capacity(data.len());

    for &y in data {
        let f = p[[0, 0]];
        if !f.is_finite() || f < MIN_PREDICTION_VARIANCE {
            return Err(ArimaError::NumericalFailure {
                reason: format!("prediction variance {f} is not positive"),
            });
        }
        let v = y - a[0];
        innovations.push(v);
        weighted_ss += v * v / f;
        log_det += f.ln();

        // Measurement update with Z = e1: K = P Z / F.
        let pz = p.column(0).to_owned();
        let gain = &pz / f;
        let a_filt = &a + &(&gain * v);
        let p_filt = &p
            - &gain
                .view()
                .insert_axis(Axis(1))
                .dot(&pz.view().insert_axis(Axis(0)));

        // Time update.
        a = t.dot(&a_filt);
        p = t.dot(&p_filt).dot(&t.t()) + ss.rrt();
    }

    Ok(Pass {
        weighted_ss,
        log_det,
        innovations,
        final_state: a,
    })
}

fn concentrate(n: f64, weighted_ss: f64, log_det: f64) -> Result<(f64, f64), ArimaError> {
    let sigma2 = weighted_ss / n;
    if !sigma2.is_finite() || sigma2 <= 0.0 {
        return Err(ArimaError::NumericalFailure {
            reason: format!("innovation variance {sigma2} is not positive"),
        });
    }
    let log_likelihood =
        -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + 1.0 + sigma2.ln()) - 0.5 * log_det;
    Ok((sigma2, log_likelihood))
}

/// Concentrated log-likelihood only; used inside the optimiser loop.
pub(crate) fn concentrated_loglik(ss: &StateSpace, data: &[f64]) -> Result<f64, ArimaError> {
    let pass = run_filter(ss, data)?;
    let (_, loglik) = concentrate(data.len() as f64, pass.weighted_ss, pass.log_det)?;
    Ok(loglik)
}

/// Full pass returning variance, residuals, likelihood and the final state.
pub(crate) fn kalman_full(ss: &StateSpace, data: &[f64]) -> Result<KalmanOutput, ArimaError> {
    let pass = run_filter(ss, data)?;
    let (sigma2, log_likelihood) = concentrate(data.len() as f64, pass.weighted_ss, pass.log_det)?;
    Ok(KalmanOutput {
        sigma2,
        residuals: pass.innovations,
        log_likelihood,
        final_state: pass.final_state.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn white_noise_matches_closed_form() {
        let data = [0.5, -1.0, 0.25, 1.5, -0.75];
        let ss = StateSpace::new(&[], &[]);
        let out = kalman_full(&ss, &data).unwrap();

        let n = data.len() as f64;
        let sigma2 = data.iter().map(|x| x * x).sum::<f64>() / n;
        let expected = -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + 1.0 + sigma2.ln());
        assert_abs_diff_eq!(out.sigma2, sigma2, epsilon = 1e-12);
        assert_abs_diff_eq!(out.log_likelihood, expected, epsilon = 1e-9);
        assert_eq!(out.residuals, data.to_vec());
    }

    #[test]
    fn ar1_innovations_after_first_step() {
        // For AR(1) the filter reduces to e_t = y_t - phi * y_{t-1} for t >= 1.
        let phi = 0.6;
        let data = [1.0, 2.0, -0.5, 0.3];
        let ss = StateSpace::new(&[phi], &[]);
        let out = kalman_full(&ss, &data).unwrap();
        assert_abs_diff_eq!(out.residuals[0], 1.0, epsilon = 1e-12);
        for t in 1..data.len() {
            assert_abs_diff_eq!(
                out.residuals[t],
                data[t] - phi * data[t - 1],
                epsilon = 1e-9
            );
        }
        assert_abs_diff_eq!(out.final_state[0], phi * 0.3, epsilon = 1e-9);
    }

    #[test]
    fn concentrated_matches_full() {
        let data = [0.3, -0.2, 0.9, 0.1, -0.4, 0.6];
        let ss = StateSpace::new(&[0.4], &[0.2]);
        let a = concentrated_loglik(&ss, &data).unwrap();
        let b = kalman_full(&ss, &data).unwrap().log_likelihood;
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn all_zero_data_fails() {
        let ss = StateSpace::new(&[0.4], &[]);
        let err = kalman_full(&ss, &[0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, ArimaError::NumericalFailure { .. }));
    }
}
