//! ARMA state-space representation.
//!
//! Converts ARMA(p,q) coefficients into the Harvey form:
//!
//! ```text
//! x[t+1] = T * x[t] + R * e[t]     (state transition)
//! y[t]   = Z' * x[t]                (observation, Z = e1)
//! ```
//!
//! with `e[t] ~ N(0, sigma2)`. The filter runs with `sigma2 = 1` and the
//! variance is concentrated out afterwards.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

use crate::error::ArimaError;

const MAX_DOUBLING: usize = 64;
const DOUBLING_TOL: f64 = 1e-12;

/// State-space matrices of an ARMA(p,q) model.
#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    dim: usize,
    transition: Array2<f64>,
    rrt: Array2<f64>,
}

impl StateSpace {
    /// Builds the companion-form system for the given coefficients.
    ///
    /// State dimension is `max(p, q + 1)`, minimum 1.
    pub(crate) fn new(ar: &[f64], ma: &[f64]) -> Self {
        let dim = ar.len().max(ma.len() + 1);

        let mut transition = Array2::zeros((dim, dim));
        for (i, &phi) in ar.iter().enumerate() {
            transition[[i, 0]] = phi;
        }
        for i in 0..dim - 1 {
            transition[[i, i + 1]] = 1.0;
        }

        let mut r_vec = Array1::zeros(dim);
        r_vec[0] = 1.0;
        for (j, &theta) in ma.iter().enumerate() {
            r_vec[j + 1] = theta;
        }
        let rrt = r_vec
            .view()
            .insert_axis(Axis(1))
            .dot(&r_vec.view().insert_axis(Axis(0)));

        Self {
            dim,
            transition,
            rrt,
        }
    }

    /// State dimension.
    pub(crate) fn dim(&self) -> usize {
        self.dim
    }

    /// Transition matrix `T`.
    pub(crate) fn transition(&self) -> &Array2<f64> {
        &self.transition
    }

    /// Rank-one noise covariance `R·Rᵀ`.
    pub(crate) fn rrt(&self) -> &Array2<f64> {
        &self.rrt
    }

    /// Unconditional state covariance `P` solving `P = T P Tᵀ + R Rᵀ`.
    ///
    /// Uses the doubling recursion `P ← P + A P Aᵀ`, `A ← A²`, which
    /// converges quadratically for stationary `T`.
    pub(crate) fn stationary_covariance(&self) -> Result<Array2<f64>, ArimaError> {
        let mut p = self.rrt.clone();
        let mut a = self.transition.clone();
        for _ in 0..MAX_DOUBLING {
            let next = &p + &a.dot(&p).dot(&a.t());
            let change = (&next - &p).iter().fold(0.0_f64, |m, x| m.max(x.abs()));
            let scale = next.iter().fold(1.0_f64, |m, x| m.max(x.abs()));
            p = next;
            if !change.is_finite() {
                break;
            }
            if change <= DOUBLING_TOL * scale {
                return Ok(p);
            }
            a = a.dot(&a);
        }
        Err(ArimaError::NumericalFailure {
            reason: "stationary state covariance did not converge".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ar1() {
        let ss = StateSpace::new(&[0.5], &[]);
        assert_eq!(ss.dim(), 1);
        assert_abs_diff_eq!(ss.transition()[[0, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.rrt()[[0, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn arma00() {
        let ss = StateSpace::new(&[], &[]);
        assert_eq!(ss.dim(), 1);
        assert_abs_diff_eq!(ss.transition()[[0, 0]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn ma1_companion() {
        let ss = StateSpace::new(&[], &[0.8]);
        assert_eq!(ss.dim(), 2);
        // T = [[0, 1], [0, 0]]
        assert_abs_diff_eq!(ss.transition()[[0, 1]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.transition()[[1, 0]], 0.0, epsilon = 1e-12);
        // RRᵀ = [[1, 0.8], [0.8, 0.64]]
        assert_abs_diff_eq!(ss.rrt()[[0, 1]], 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.rrt()[[1, 1]], 0.64, epsilon = 1e-12);
    }

    #[test]
    fn arma22_companion() {
        let ss = StateSpace::new(&[0.5, -0.3], &[0.4, 0.2]);
        assert_eq!(ss.dim(), 3);
        let t = ss.transition();
        assert_abs_diff_eq!(t[[0, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(t[[1, 0]], -0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(t[[0, 1]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t[[1, 2]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t[[2, 0]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn stationary_covariance_ar1() {
        // Var(y) = 1 / (1 - phi^2)
        let phi = 0.7;
        let ss = StateSpace::new(&[phi], &[]);
        let p = ss.stationary_covariance().unwrap();
        assert_abs_diff_eq!(p[[0, 0]], 1.0 / (1.0 - phi * phi), epsilon = 1e-9);
    }

    #[test]
    fn stationary_covariance_ma1() {
        // Var(y) = 1 + theta^2
        let theta = 0.6;
        let ss = StateSpace::new(&[], &[theta]);
        let p = ss.stationary_covariance().unwrap();
        assert_abs_diff_eq!(p[[0, 0]], 1.0 + theta * theta, epsilon = 1e-9);
    }

    #[test]
    fn stationary_covariance_is_fixed_point() {
        let ss = StateSpace::new(&[0.5, -0.3], &[0.4]);
        let p = ss.stationary_covariance().unwrap();
        let t = ss.transition();
        let rhs = t.dot(&p).dot(&t.t()) + ss.rrt();
        for (a, b) in p.iter().zip(rhs.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn explosive_transition_fails() {
        let ss = StateSpace::new(&[1.5], &[]);
        assert!(ss.stationary_covariance().is_err());
    }
}
