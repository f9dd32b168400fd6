//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use vaxcast_arima::{InformationCriterion, SearchStrategy, SelectionConfig};
use vaxcast_forecast::ForecastConfig;
use vaxcast_series::{PrepareConfig, ReaderConfig};

use crate::config::*;

/// Parses an information criterion name into the corresponding enum variant.
pub fn parse_criterion(s: &str) -> Result<InformationCriterion> {
    match s.to_lowercase().as_str() {
        "aic" => Ok(InformationCriterion::Aic),
        "aicc" => Ok(InformationCriterion::Aicc),
        "bic" => Ok(InformationCriterion::Bic),
        other => bail!("unknown information criterion: {other:?}"),
    }
}

/// Parses an order search strategy name into the corresponding enum variant.
pub fn parse_strategy(s: &str) -> Result<SearchStrategy> {
    match s.to_lowercase().as_str() {
        "stepwise" => Ok(SearchStrategy::Stepwise),
        "grid" => Ok(SearchStrategy::Grid),
        other => bail!("unknown search strategy: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> Result<ReaderConfig> {
    if !io.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", io.delimiter);
    }
    Ok(ReaderConfig::default().with_delimiter(io.delimiter as u8))
}

/// Builds a [`PrepareConfig`] from the TOML I/O and forecast sections.
pub fn build_prepare_config(io: &IoConfig, forecast: &ForecastToml) -> PrepareConfig {
    let [min, max] = forecast.bounds;
    PrepareConfig::default()
        .with_date_column(&io.date_column)
        .with_value_column(&io.value_column)
        .with_date_format(&io.date_format)
        .with_min_observations(forecast.min_observations)
        .with_bounds(min, max)
}

/// Builds a [`SelectionConfig`] from the TOML selection section.
pub fn build_selection_config(sel: &SelectionToml) -> Result<SelectionConfig> {
    Ok(SelectionConfig::default()
        .with_max_orders(sel.max_p, sel.max_q)
        .with_max_d(sel.max_d)
        .with_start(sel.start_p, sel.start_q)
        .with_criterion(parse_criterion(&sel.criterion)?)
        .with_strategy(parse_strategy(&sel.strategy)?)
        .with_max_steps(sel.max_steps)
        .with_d(sel.d)
        .with_alpha(sel.alpha))
}

/// Builds and validates the full [`ForecastConfig`].
pub fn build_forecast_config(config: &VaxcastConfig) -> Result<ForecastConfig> {
    let [min, max] = config.forecast.bounds;
    let cfg = ForecastConfig::default()
        .with_horizon(config.forecast.horizon)
        .with_level(config.forecast.level)
        .with_bounds(min, max)
        .with_prepare(build_prepare_config(&config.io, &config.forecast))
        .with_selection(build_selection_config(&config.selection)?);
    cfg.validate()?;
    Ok(cfg)
}
