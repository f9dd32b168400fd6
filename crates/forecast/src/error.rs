//! Error types for vaxcast-forecast.

use vaxcast_arima::ArimaError;
use vaxcast_series::SeriesError;

/// Why a forecasting run produced no forecast.
///
/// Library errors from preparation and model fitting are folded into these
/// causes; the message of the underlying error is kept in `reason`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    /// Too few valid observations after cleaning.
    #[error("insufficient data: {reason}")]
    InsufficientData {
        /// Description of the underlying failure.
        reason: String,
    },

    /// No `(p, d, q)` candidate could be fitted.
    #[error("no model converged: {reason}")]
    NonConvergence {
        /// Description of the underlying failure.
        reason: String,
    },

    /// The series is constant or numerically singular.
    #[error("degenerate series: {reason}")]
    DegenerateSeries {
        /// Description of the underlying failure.
        reason: String,
    },

    /// The input table lacks expected columns or has wrong types.
    #[error("schema error: {reason}")]
    Schema {
        /// Description of the underlying failure.
        reason: String,
    },

    /// The forecast configuration is invalid.
    #[error("invalid configuration: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },
}

impl ForecastError {
    /// Short snake_case name of the cause, as used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient_data",
            Self::NonConvergence { .. } => "non_convergence",
            Self::DegenerateSeries { .. } => "degenerate_series",
            Self::Schema { .. } => "schema",
            Self::Config { .. } => "config",
        }
    }
}

impl From<SeriesError> for ForecastError {
    fn from(e: SeriesError) -> Self {
        let reason = e.to_string();
        match e {
            SeriesError::InsufficientData { .. } => ForecastError::InsufficientData { reason },
            SeriesError::FileNotFound { .. }
            | SeriesError::Csv { .. }
            | SeriesError::MissingColumn { .. }
            | SeriesError::WrongType { .. }
            | SeriesError::Parse { .. }
            | SeriesError::OutOfRange { .. }
            | SeriesError::Validation { .. } => ForecastError::Schema { reason },
        }
    }
}

impl From<ArimaError> for ForecastError {
    fn from(e: ArimaError) -> Self {
        let reason = e.to_string();
        match e {
            ArimaError::EmptyData | ArimaError::InsufficientData { .. } => {
                ForecastError::InsufficientData { reason }
            }
            ArimaError::NonFiniteData
            | ArimaError::ConstantData
            | ArimaError::NumericalFailure { .. } => ForecastError::DegenerateSeries { reason },
            ArimaError::OptimizationFailed | ArimaError::AllCandidatesFailed { .. } => {
                ForecastError::NonConvergence { reason }
            }
            ArimaError::InvalidLevel { .. } | ArimaError::InvalidConfig { .. } => {
                ForecastError::Config { reason }
            }
        }
    }
}
