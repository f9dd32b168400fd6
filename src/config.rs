use std::path::PathBuf;

use serde::Deserialize;

/// Top-level vaxcast configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaxcastConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Which series to forecast.
    #[serde(default)]
    pub series: SeriesToml,

    /// Horizon, interval and preparation settings.
    #[serde(default)]
    pub forecast: ForecastToml,

    /// Order search settings.
    #[serde(default)]
    pub selection: SelectionToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Column holding the series key. `None` treats the file as one series.
    #[serde(default = "default_group_column")]
    pub group_column: Option<String>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            delimiter: default_delimiter(),
            date_column: default_date_column(),
            value_column: default_value_column(),
            date_format: default_date_format(),
            group_column: default_group_column(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}
fn default_date_column() -> String {
    "date".to_string()
}
fn default_value_column() -> String {
    "coverage_full_dose".to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}
fn default_group_column() -> Option<String> {
    Some("iso_code".to_string())
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesToml {
    /// Keys to forecast; empty means every key in the input.
    #[serde(default)]
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_level")]
    pub level: f64,
    #[serde(default = "default_bounds")]
    pub bounds: [f64; 2],
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            level: default_level(),
            bounds: default_bounds(),
            min_observations: default_min_observations(),
        }
    }
}

fn default_horizon() -> usize {
    30
}
fn default_level() -> f64 {
    0.95
}
fn default_bounds() -> [f64; 2] {
    [0.0, 100.0]
}
fn default_min_observations() -> usize {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionToml {
    #[serde(default = "default_max_order")]
    pub max_p: usize,
    #[serde(default = "default_max_order")]
    pub max_q: usize,
    #[serde(default = "default_max_d")]
    pub max_d: usize,
    #[serde(default = "default_start_order")]
    pub start_p: usize,
    #[serde(default = "default_start_order")]
    pub start_q: usize,
    #[serde(default = "default_criterion")]
    pub criterion: String,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Fixed differencing order; unset runs the KPSS test.
    #[serde(default)]
    pub d: Option<usize>,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for SelectionToml {
    fn default() -> Self {
        Self {
            max_p: default_max_order(),
            max_q: default_max_order(),
            max_d: default_max_d(),
            start_p: default_start_order(),
            start_q: default_start_order(),
            criterion: default_criterion(),
            strategy: default_strategy(),
            max_steps: default_max_steps(),
            d: None,
            alpha: default_alpha(),
        }
    }
}

fn default_max_order() -> usize {
    3
}
fn default_max_d() -> usize {
    2
}
fn default_start_order() -> usize {
    1
}
fn default_criterion() -> String {
    "aic".to_string()
}
fn default_strategy() -> String {
    "stepwise".to_string()
}
fn default_max_steps() -> usize {
    100
}
fn default_alpha() -> f64 {
    0.05
}
