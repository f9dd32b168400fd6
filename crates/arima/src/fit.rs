//! Fitted ARIMA model results.

use crate::config::InformationCriterion;
use crate::error::ArimaError;
use crate::forecast::{self, ArimaForecast};
use crate::spec::ArimaSpec;

/// Raw pieces assembled by the optimiser (crate-internal).
pub(crate) struct FitParts {
    pub(crate) spec: ArimaSpec,
    pub(crate) ar: Vec<f64>,
    pub(crate) ma: Vec<f64>,
    pub(crate) mean: f64,
    pub(crate) sigma2: f64,
    pub(crate) residuals: Vec<f64>,
    pub(crate) log_likelihood: f64,
    pub(crate) n_obs: usize,
    pub(crate) tails: Vec<f64>,
    pub(crate) final_state: Vec<f64>,
}

/// A fitted ARIMA(p,d,q) model produced by [`ArimaSpec::fit()`].
///
/// Holds the estimated AR (`phi`) and MA (`theta`) coefficients, the
/// constant of the differenced series, the innovation variance, and the
/// filter state needed to forecast beyond the sample.
///
/// ```mermaid
/// graph LR
///     B["ArimaFit"] --> C[".ar() / .ma()"]
///     B --> D[".sigma2()"]
///     B --> E[".aic() / .aicc() / .bic()"]
///     B --> F[".forecast(horizon, level)"]
/// ```
#[derive(Clone, Debug)]
pub struct ArimaFit {
    spec: ArimaSpec,
    ar: Vec<f64>,
    ma: Vec<f64>,
    mean: f64,
    sigma2: f64,
    residuals: Vec<f64>,
    log_likelihood: f64,
    n_obs: usize,
    tails: Vec<f64>,
    final_state: Vec<f64>,
}

impl ArimaFit {
    pub(crate) fn new(parts: FitParts) -> Self {
        Self {
            spec: parts.spec,
            ar: parts.ar,
            ma: parts.ma,
            mean: parts.mean,
            sigma2: parts.sigma2,
            residuals: parts.residuals,
            log_likelihood: parts.log_likelihood,
            n_obs: parts.n_obs,
            tails: parts.tails,
            final_state: parts.final_state,
        }
    }

    /// Zero-variance fit of a series whose `d`-th difference is constant.
    ///
    /// The likelihood is unbounded, so `log_likelihood` is `+inf` and every
    /// information criterion is `-inf`.
    pub(crate) fn exact(spec: ArimaSpec, drift: f64, n_obs: usize, tails: Vec<f64>) -> Self {
        Self {
            spec,
            ar: vec![],
            ma: vec![],
            mean: drift,
            sigma2: 0.0,
            residuals: vec![0.0; n_obs],
            log_likelihood: f64::INFINITY,
            n_obs,
            tails,
            final_state: vec![0.0],
        }
    }

    /// Returns the [`ArimaSpec`] that produced this fit.
    pub fn spec(&self) -> ArimaSpec {
        self.spec
    }

    /// Returns the `(p, d, q)` order of the fitted model.
    pub fn order(&self) -> (usize, usize, usize) {
        self.spec.order()
    }

    /// Returns the AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Returns the MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Returns the constant of the differenced series: the mean when
    /// `d = 0`, the per-step drift when `d = 1`, zero without a constant.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Returns the one-step-ahead prediction errors on the differenced scale.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Number of observations the likelihood was evaluated on (after
    /// differencing).
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// `true` for the zero-variance fit of a deterministic trend.
    pub fn is_exact(&self) -> bool {
        self.sigma2 == 0.0
    }

    /// Akaike Information Criterion: `2k - 2 * log_likelihood`, where `k`
    /// counts AR, MA, constant and variance parameters.
    pub fn aic(&self) -> f64 {
        let k = self.spec.n_params() as f64;
        2.0 * k - 2.0 * self.log_likelihood
    }

    /// Small-sample corrected AIC. `+inf` when `n - k - 1 <= 0`, unless the
    /// fit is exact.
    pub fn aicc(&self) -> f64 {
        let k = self.spec.n_params() as f64;
        let n = self.n_obs as f64;
        if self.log_likelihood == f64::INFINITY {
            return f64::NEG_INFINITY;
        }
        if n - k - 1.0 <= 0.0 {
            return f64::INFINITY;
        }
        self.aic() + 2.0 * k * (k + 1.0) / (n - k - 1.0)
    }

    /// Bayesian Information Criterion: `k ln(n) - 2 * log_likelihood`.
    pub fn bic(&self) -> f64 {
        let k = self.spec.n_params() as f64;
        k * (self.n_obs as f64).ln() - 2.0 * self.log_likelihood
    }

    /// Value of the requested information criterion (lower is better).
    pub fn criterion(&self, ic: InformationCriterion) -> f64 {
        match ic {
            InformationCriterion::Aic => self.aic(),
            InformationCriterion::Aicc => self.aicc(),
            InformationCriterion::Bic => self.bic(),
        }
    }

    /// Forecasts `horizon` steps past the end of the sample with a
    /// `level` (e.g. 0.95) normal confidence interval.
    ///
    /// # Errors
    ///
    /// Returns [`ArimaError::InvalidLevel`] if `level` is not in (0, 1).
    pub fn forecast(&self, horizon: usize, level: f64) -> Result<ArimaForecast, ArimaError> {
        forecast::forecast(self, horizon, level)
    }

    pub(crate) fn tails(&self) -> &[f64] {
        &self.tails
    }

    pub(crate) fn final_state(&self) -> &[f64] {
        &self.final_state
    }
}
