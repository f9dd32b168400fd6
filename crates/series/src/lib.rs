//! # vaxcast-series
//!
//! Input side of the vaxcast pipeline: column tables with explicit absent
//! cells, a CSV reader, and the preparer that turns a raw coverage table
//! into a clean daily [`HistoricalSeries`].
//!
//! ```mermaid
//! graph LR
//!     A["read_csv(path, &config)?"] --> B["Table"]
//!     B -->|".filter_eq(\"iso_code\", \"NLD\")?"| B
//!     B -->|"prepare(&table, &config)?"| C["HistoricalSeries"]
//!     C --> D[".dates() / .values()"]
//! ```

mod error;
mod prepare;
mod reader;
mod sequence;
mod series;
mod table;
mod validate;

pub use error::SeriesError;
pub use prepare::{PrepareConfig, prepare};
pub use reader::{ReaderConfig, read_csv, read_csv_from};
pub use sequence::daily_sequence;
pub use series::HistoricalSeries;
pub use table::{Column, Table};
