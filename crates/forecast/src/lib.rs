//! # vaxcast-forecast
//!
//! Turns a raw coverage table into a 30-day forecast with confidence
//! intervals, or into an explicit empty table when no forecast can be made.
//!
//! ```mermaid
//! graph LR
//!     T["Table"] -->|"prepare"| S["HistoricalSeries"]
//!     S -->|"select_order"| M["ArimaFit + ModelSpec"]
//!     M -->|"run_engine"| F["ArimaForecast"]
//!     F -->|"assemble"| R["ForecastTable"]
//!     E["any error"] -.->|"forecast() guard"| X["ForecastTable::empty()"]
//! ```
//!
//! [`try_forecast`] returns the typed [`ForecastError`]; [`forecast`] never
//! fails and reports the cause alongside an empty table. [`Orchestrator`]
//! keeps the last successful forecast per tracked series across refreshes.

mod assemble;
mod config;
mod engine;
mod error;
mod orchestrator;
mod output;
mod pipeline;
mod run;

pub use assemble::assemble;
pub use config::ForecastConfig;
pub use engine::run_engine;
pub use error::ForecastError;
pub use orchestrator::{Orchestrator, SeriesState};
pub use output::{ForecastRow, ForecastTable, ModelSpec};
pub use pipeline::{Forecast, ForecastOutcome, forecast, try_forecast};
pub use run::{ForecastRun, RunState};
