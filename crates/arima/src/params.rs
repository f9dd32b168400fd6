//! Unconstrained ↔ stationary coefficient mapping for the optimiser.
//!
//! **Not part of the public API.**

/// AR and MA coefficients decoded from one optimiser parameter vector.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Coefficients {
    pub(crate) ar: Vec<f64>,
    pub(crate) ma: Vec<f64>,
}

impl Coefficients {
    /// Decodes a flat `[alpha_1..alpha_p, beta_1..beta_q]` vector.
    ///
    /// Both halves go through [`pacf_to_poly`] independently, so AR
    /// coefficients are stationary and MA coefficients invertible for any
    /// real input.
    pub(crate) fn from_unconstrained(raw: &[f64], p: usize) -> Self {
        let (alpha, beta) = raw.split_at(p.min(raw.len()));
        Self {
            ar: pacf_to_poly(alpha),
            ma: pacf_to_poly(beta),
        }
    }
}

/// Maps unconstrained reals to polynomial coefficients with all roots
/// outside the unit circle (Jones 1980, Monahan 1984).
///
/// Each value is squashed into (-1, 1) with `tanh` and read as a partial
/// autocorrelation; the Durbin-Levinson recursion then builds the
/// polynomial one order at a time.
pub(crate) fn pacf_to_poly(raw: &[f64]) -> Vec<f64> {
    let mut poly: Vec<f64> = Vec::with_capacity(raw.len());
    for &a in raw {
        let r = a.tanh();
        let prev = poly.clone();
        let k = prev.len();
        for j in 0..k {
            poly[j] = prev[j] - r * prev[k - 1 - j];
        }
        poly.push(r);
    }
    poly
}
