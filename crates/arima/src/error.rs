//! Error types for the vaxcast-arima crate.

/// Error type for all fallible operations in the vaxcast-arima crate.
///
/// Covers input validation, numerical breakdowns inside the Kalman filter,
/// optimiser failures, and order-selection exhaustion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArimaError {
    /// Returned when the input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the input data has fewer observations than required.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the input data has zero variance.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// Returned when the Kalman recursion produces a non-positive or
    /// non-finite prediction variance.
    #[error("numerical failure: {reason}")]
    NumericalFailure {
        /// Description of the breakdown.
        reason: String,
    },

    /// Returned when the optimization algorithm fails to converge.
    #[error("optimisation failed to converge")]
    OptimizationFailed,

    /// Returned when a confidence level lies outside (0, 1).
    #[error("confidence level must be in (0, 1), got {level}")]
    InvalidLevel {
        /// The rejected level.
        level: f64,
    },

    /// Returned when a selection configuration is internally inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when all candidate ARIMA models fail to fit.
    #[error("all ARIMA candidates failed (d={d}, max_p={max_p}, max_q={max_q})")]
    AllCandidatesFailed {
        /// Differencing order used for the search.
        d: usize,
        /// Maximum AR order attempted.
        max_p: usize,
        /// Maximum MA order attempted.
        max_q: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_data() {
        let err = ArimaError::EmptyData;
        assert_eq!(err.to_string(), "input data is empty");
    }

    #[test]
    fn error_insufficient_data() {
        let err = ArimaError::InsufficientData { n: 5, min: 10 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 5 observations, need at least 10"
        );
    }

    #[test]
    fn error_constant_data() {
        let err = ArimaError::ConstantData;
        assert_eq!(err.to_string(), "input data is constant (zero variance)");
    }

    #[test]
    fn error_numerical_failure() {
        let err = ArimaError::NumericalFailure {
            reason: "prediction variance is zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "numerical failure: prediction variance is zero"
        );
    }

    #[test]
    fn error_invalid_level() {
        let err = ArimaError::InvalidLevel { level: 1.5 };
        assert_eq!(err.to_string(), "confidence level must be in (0, 1), got 1.5");
    }

    #[test]
    fn error_all_candidates_failed() {
        let err = ArimaError::AllCandidatesFailed {
            d: 1,
            max_p: 3,
            max_q: 2,
        };
        assert_eq!(
            err.to_string(),
            "all ARIMA candidates failed (d=1, max_p=3, max_q=2)"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ArimaError>();
    }
}
