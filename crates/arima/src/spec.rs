//! ARIMA model specification (unfitted).

use crate::error::ArimaError;
use crate::fit::ArimaFit;

/// An unfitted ARIMA(p,d,q) model specification.
///
/// Entry point of the typestate workflow: create a spec with
/// [`ArimaSpec::new()`], then call [`ArimaSpec::fit()`] to obtain an
/// [`ArimaFit`].
///
/// A constant term is estimated by default when `d < 2`: the series mean
/// for `d = 0`, the drift of the differenced series for `d = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArimaSpec {
    p: usize,
    d: usize,
    q: usize,
    constant: bool,
}

impl ArimaSpec {
    /// Creates an ARIMA(p,d,q) specification.
    ///
    /// # Example
    ///
    /// ```
    /// use vaxcast_arima::ArimaSpec;
    ///
    /// let spec = ArimaSpec::new(1, 1, 1);
    /// assert_eq!(spec.order(), (1, 1, 1));
    /// assert!(spec.constant());
    /// ```
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            constant: d < 2,
        }
    }

    /// Overrides whether a constant (mean or drift) is estimated.
    pub fn with_constant(mut self, constant: bool) -> Self {
        self.constant = constant;
        self
    }

    /// Returns the AR order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the differencing order (`d`).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Returns the MA order (`q`).
    pub fn q(&self) -> usize {
        self.q
    }

    /// Returns `(p, d, q)`.
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Whether a constant term is estimated.
    pub fn constant(&self) -> bool {
        self.constant
    }

    /// Number of estimated parameters, including the innovation variance.
    pub fn n_params(&self) -> usize {
        self.p + self.q + usize::from(self.constant) + 1
    }

    /// Minimum number of observations on the differenced scale.
    pub(crate) fn min_differenced_len(&self) -> usize {
        (self.p + self.q + usize::from(self.constant)).max(1) + 1
    }

    /// Fits this specification to `data` (on the original, undifferenced
    /// scale) via exact maximum likelihood.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArimaError::EmptyData`] | `data` is empty |
    /// | [`ArimaError::NonFiniteData`] | any element is NaN or infinite |
    /// | [`ArimaError::InsufficientData`] | too few observations after differencing |
    /// | [`ArimaError::ConstantData`] | `data` is constant, or the differenced series is constant and the model is not ARIMA(0,d,0) with constant |
    /// | [`ArimaError::NumericalFailure`] | Kalman recursion breaks down |
    /// | [`ArimaError::OptimizationFailed`] | optimizer fails to converge |
    pub fn fit(&self, data: &[f64]) -> Result<ArimaFit, ArimaError> {
        crate::optimizer::fit_arima(*self, data)
    }
}
