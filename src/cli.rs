use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vaccination coverage forecaster.
#[derive(Parser)]
#[command(
    name = "vaxcast",
    version,
    about = "Automatic ARIMA forecasts of vaccination coverage"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Forecast every configured series and write a JSON report.
    Forecast(ForecastArgs),
    /// Run order selection only and print the chosen model per series.
    Select(SelectArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "vaxcast.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON path from config; stdout if neither is set.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Forecast only these series keys (repeatable).
    #[arg(short = 'k', long = "key")]
    pub keys: Vec<String>,
}

/// Arguments for the `select` subcommand.
#[derive(clap::Args)]
pub struct SelectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "vaxcast.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Select only for these series keys (repeatable).
    #[arg(short = 'k', long = "key")]
    pub keys: Vec<String>,
}
