//! # vaxcast-arima
//!
//! Non-seasonal ARIMA(p,d,q) fitting, order selection and forecasting via
//! state-space maximum likelihood (Kalman filter).
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["ArimaSpec::new(p, d, q)"] -->|".fit(&data)?"| B["ArimaFit"]
//!     B --> C[".ar() / .ma() / .mean()"]
//!     B --> D[".sigma2(): innovation variance"]
//!     B --> E[".aic() / .aicc() / .bic()"]
//!     B -->|".forecast(horizon, level)?"| F["ArimaForecast"]
//!     H["select_order(&data, &config)?"] -->|"KPSS d + stepwise (p, q)"| I["Selection"]
//!     I -->|".into_fit()"| B
//! ```
//!
//! ## Two Usage Paths
//!
//! **Direct fit** (known orders):
//! ```ignore
//! let fit = ArimaSpec::new(1, 1, 0).fit(&data)?;
//! let fc = fit.forecast(30, 0.95)?;
//! ```
//!
//! **Automatic selection** (unknown orders):
//! ```ignore
//! let selection = select_order(&data, &SelectionConfig::default())?;
//! let fc = selection.fit().forecast(30, 0.95)?;
//! ```
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`ArimaFit::ar()`] | AR coefficients: weights on past (differenced) observations |
//! | theta | [`ArimaFit::ma()`] | MA coefficients: weights on past forecast errors |
//! | d | [`ArimaSpec::d()`] | Number of first differences |
//! | mu | [`ArimaFit::mean()`] | Mean (`d = 0`) or drift (`d = 1`) of the differenced series |
//! | sigma2 | [`ArimaFit::sigma2()`] | Innovation (white-noise) variance |
//! | psi | [`psi_weights()`] | MA(∞) weights driving forecast variance |
//! | AIC | [`ArimaFit::aic()`] | Akaike Information Criterion (lower = better) |

mod config;
mod difference;
mod error;
mod fit;
mod forecast;
mod selection;
mod spec;
mod stationarity;

pub(crate) mod kalman;
pub(crate) mod optimizer;
pub(crate) mod params;
pub(crate) mod state_space;

pub use config::{InformationCriterion, SearchStrategy, SelectionConfig};
pub use difference::difference;
pub use error::ArimaError;
pub use fit::ArimaFit;
pub use forecast::{ArimaForecast, psi_weights};
pub use selection::{CandidateScore, Selection, select_order};
pub use spec::ArimaSpec;
pub use stationarity::{KpssResult, critical_value, kpss_level, ndiffs};
