//! Loading the TOML config and splitting the input CSV into keyed series.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::info;

use vaxcast_series::{Table, read_csv};

use crate::config::VaxcastConfig;
use crate::convert;

/// Key used when the input holds a single series.
pub const SINGLE_SERIES_KEY: &str = "series";

/// Reads and parses the TOML config at `path`.
pub fn load_config(path: &Path) -> Result<VaxcastConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Reads the input CSV and returns one table per series key.
///
/// `keys` from the command line take precedence over `[series].keys`; when
/// both are empty every distinct key in the group column is used. Requested
/// keys absent from the input still get an (empty) table, so that they are
/// reported as unavailable instead of silently skipped.
pub fn load_series(
    config: &VaxcastConfig,
    input: Option<PathBuf>,
    keys: &[String],
) -> Result<Vec<(String, Table)>> {
    let input = input.or_else(|| config.io.input.clone()).ok_or_else(|| {
        anyhow!("no input path: set [io].input in config or use --input")
    })?;
    let reader_cfg = convert::build_reader_config(&config.io)?;

    info!(path = %input.display(), "reading coverage data");
    let table = read_csv(&input, &reader_cfg)
        .with_context(|| format!("failed to read CSV: {}", input.display()))?;

    let Some(group) = config.io.group_column.as_deref() else {
        return Ok(vec![(SINGLE_SERIES_KEY.to_string(), table)]);
    };

    let requested: &[String] = if keys.is_empty() { &config.series.keys } else { keys };
    let keys = if requested.is_empty() {
        table
            .distinct(group)
            .with_context(|| format!("failed to list series keys in column {group:?}"))?
    } else {
        requested.to_vec()
    };
    info!(n_series = keys.len(), "series selected");

    keys.into_iter()
        .map(|key| {
            let subset = table
                .filter_eq(group, &key)
                .with_context(|| format!("failed to select series {key:?}"))?;
            Ok((key, subset))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
iso_code,date,coverage_full_dose
NLD,2021-05-01,10.5
GBR,2021-05-01,30.0
NLD,2021-05-02,10.9
";

    fn csv_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        file
    }

    #[test]
    fn splits_by_group_in_first_appearance_order() {
        let file = csv_file();
        let series = load_series(
            &VaxcastConfig::default(),
            Some(file.path().to_path_buf()),
            &[],
        )
        .unwrap();
        let keys: Vec<_> = series.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["NLD", "GBR"]);
        assert_eq!(series[0].1.n_rows(), 2);
    }

    #[test]
    fn cli_keys_override_config_keys() {
        let file = csv_file();
        let mut config = VaxcastConfig::default();
        config.series.keys = vec!["NLD".into()];
        let series =
            load_series(&config, Some(file.path().to_path_buf()), &["USA".into()]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0, "USA");
        assert_eq!(series[0].1.n_rows(), 0);
    }

    #[test]
    fn no_group_column_is_one_series() {
        let file = csv_file();
        let mut config = VaxcastConfig::default();
        config.io.group_column = None;
        let series = load_series(&config, Some(file.path().to_path_buf()), &[]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0, SINGLE_SERIES_KEY);
        assert_eq!(series[0].1.n_rows(), 3);
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = load_series(&VaxcastConfig::default(), None, &[]).unwrap_err();
        assert!(err.to_string().contains("no input path"));
    }

    #[test]
    fn config_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[forecast]\nhorizon = 7\n").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.forecast.horizon, 7);
        assert!(load_config(Path::new("/nonexistent/vaxcast.toml")).is_err());
    }
}
