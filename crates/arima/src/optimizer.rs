//! Nelder-Mead optimizer for ARIMA maximum-likelihood estimation.
//!
//! Wraps the `argmin` crate to minimize the negative concentrated
//! log-likelihood of the differenced, centred series over unconstrained
//! PACF parameters.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;
use tracing::trace;
use vaxcast_stats::{is_constant, mean};

use crate::difference::{difference, tails};
use crate::error::ArimaError;
use crate::fit::{ArimaFit, FitParts};
use crate::kalman;
use crate::params::Coefficients;
use crate::spec::ArimaSpec;
use crate::state_space::StateSpace;

const MAX_ITERS: u64 = 1000;
const SD_TOLERANCE: f64 = 1e-8;
const SIMPLEX_STEP: f64 = 0.5;

/// Fits an ARIMA(p,d,q) model to data via exact MLE.
///
/// 1. Validate data
/// 2. Difference `d` times and centre on the constant (if any)
/// 3. Optimize concentrated log-likelihood via Nelder-Mead
/// 4. Extract final parameters via full Kalman pass
pub(crate) fn fit_arima(spec: ArimaSpec, data: &[f64]) -> Result<ArimaFit, ArimaError> {
    // 1. Validate
    if data.is_empty() {
        return Err(ArimaError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(ArimaError::NonFiniteData);
    }
    if is_constant(data) {
        return Err(ArimaError::ConstantData);
    }

    // 2. Difference and centre
    let (p, d, q) = spec.order();
    let w = difference(data, d);
    let min_len = spec.min_differenced_len();
    if w.len() < min_len {
        return Err(ArimaError::InsufficientData {
            n: data.len(),
            min: min_len + d,
        });
    }
    let anchors = tails(data, d);
    let n = w.len() as f64;

    if is_constant(&w) {
        // A deterministic polynomial trend: only ARIMA(0,d,0) with a constant
        // reproduces it, and it does so exactly.
        if p == 0 && q == 0 && spec.constant() {
            return Ok(ArimaFit::exact(spec, mean(&w), w.len(), anchors));
        }
        return Err(ArimaError::ConstantData);
    }

    let level = if spec.constant() { mean(&w) } else { 0.0 };
    let centered: Vec<f64> = w.iter().map(|x| x - level).collect();

    // 3. White-noise fast path, no optimisation needed
    if p == 0 && q == 0 {
        let sigma2 = centered.iter().map(|x| x * x).sum::<f64>() / n;
        let log_likelihood =
            -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + 1.0 + sigma2.ln());
        return Ok(ArimaFit::new(FitParts {
            spec,
            ar: vec![],
            ma: vec![],
            mean: level,
            sigma2,
            residuals: centered,
            log_likelihood,
            n_obs: w.len(),
            tails: anchors,
            final_state: vec![0.0],
        }));
    }

    // 4. Simplex: origin plus one step along each axis
    let dim = p + q;
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(vec![0.0; dim]);
    for i in 0..dim {
        let mut vertex = vec![0.0; dim];
        vertex[i] = SIMPLEX_STEP;
        simplex.push(vertex);
    }

    let cost = ArimaCost {
        data: &centered,
        p,
    };
    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(SD_TOLERANCE)
        .map_err(|_| ArimaError::OptimizationFailed)?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(MAX_ITERS))
        .run()
        .map_err(|_| ArimaError::OptimizationFailed)?;

    let state = result.state();
    let best_params = state
        .best_param
        .as_ref()
        .ok_or(ArimaError::OptimizationFailed)?;
    if !state.best_cost.is_finite() || state.best_cost >= f64::MAX {
        return Err(ArimaError::OptimizationFailed);
    }
    trace!(p, d, q, iters = state.iter, cost = state.best_cost, "nelder-mead finished");

    // 5. Final pass at the optimum
    let Coefficients { ar, ma } = Coefficients::from_unconstrained(best_params, p);
    let ss = StateSpace::new(&ar, &ma);
    let output = kalman::kalman_full(&ss, &centered)?;

    Ok(ArimaFit::new(FitParts {
        spec,
        ar,
        ma,
        mean: level,
        sigma2: output.sigma2,
        residuals: output.residuals,
        log_likelihood: output.log_likelihood,
        n_obs: w.len(),
        tails: anchors,
        final_state: output.final_state,
    }))
}

/// Cost function for argmin: negative concentrated log-likelihood.
struct ArimaCost<'a> {
    data: &'a [f64],
    p: usize,
}

impl CostFunction for ArimaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let Coefficients { ar, ma } = Coefficients::from_unconstrained(params, self.p);
        let ss = StateSpace::new(&ar, &ma);

        match kalman::concentrated_loglik(&ss, self.data) {
            Ok(loglik) if loglik.is_finite() => Ok(-loglik),
            _ => Ok(f64::MAX),
        }
    }
}
