use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod analyze;
mod config;
mod demo;
mod watch;

use config::Config;

/// barotrend - Barometric pressure reversal events and countdowns
#[derive(Parser)]
#[command(name = "barotrend")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Flags that override the config file. Unset flags keep the file value.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Extremum noise threshold in hPa
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Minimum pressure change in hPa for an event
    #[arg(long)]
    pub min_diff: Option<f64>,

    /// Maximum gap in hours for merging neighbouring events
    #[arg(long)]
    pub merge_hours: Option<f64>,

    /// Hours added to the wall clock before comparisons
    #[arg(long, allow_hyphen_values = true)]
    pub time_offset: Option<i64>,

    /// Display offset in whole hours east of UTC
    #[arg(long, allow_hyphen_values = true)]
    pub display_offset: Option<i32>,

    /// Keep raw pressures instead of rounding to 0.1 hPa
    #[arg(long)]
    pub no_round: bool,
}

/// Encoding for generated demo data
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DemoFormat {
    /// `timestamp,pressure_hpa` CSV
    Csv,
    /// Open-Meteo forecast JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect events in a series file and print the table and countdowns
    Analyze {
        /// Input series (.csv or Open-Meteo .json)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Evaluate the clock at this unix time instead of now
        #[arg(long, value_name = "UNIX_SECONDS")]
        at: Option<i64>,

        /// Print the event sequence as JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Re-read a series file periodically and print live countdowns
    Watch {
        /// Input series (.csv or Open-Meteo .json)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Minutes between refreshes
        #[arg(long)]
        refresh_minutes: Option<u64>,

        /// Milliseconds between countdown ticks
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Stop after this many seconds (runs until interrupted otherwise)
        #[arg(long)]
        duration_secs: Option<u64>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Generate a synthetic hourly pressure series
    Demo {
        /// Output file path
        #[arg(value_name = "OUTPUT", default_value = "demo_pressure.csv")]
        output: PathBuf,

        /// Output encoding (inferred from the extension when omitted)
        #[arg(short = 'f', long, value_enum)]
        format: Option<DemoFormat>,

        /// Number of hourly samples
        #[arg(long, default_value = "168")]
        hours: usize,

        /// Unix time of the first sample (defaults to 48 hours ago, on the hour)
        #[arg(long, value_name = "UNIX_SECONDS")]
        start: Option<i64>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let file_config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Analyze {
            input,
            at,
            json,
            overrides,
        } => {
            let settings = file_config.resolve(&overrides)?;
            analyze::run(input, settings, at, json)
        }
        Commands::Watch {
            input,
            refresh_minutes,
            tick_ms,
            duration_secs,
            overrides,
        } => {
            let mut file_config = file_config;
            if refresh_minutes.is_some() {
                file_config.monitor.refresh_interval_minutes = refresh_minutes;
            }
            if tick_ms.is_some() {
                file_config.monitor.tick_interval_ms = tick_ms;
            }
            let settings = file_config.resolve(&overrides)?;
            watch::run(input, settings, duration_secs)
        }
        Commands::Demo {
            output,
            format,
            hours,
            start,
        } => demo::run(output, format, hours, start),
    }
}
