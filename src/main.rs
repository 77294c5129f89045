//! # barotrend
//!
//! Command-line front end for pressure reversal event detection.
//!
//! ## Usage
//!
//! ```bash
//! # Write a synthetic week of hourly pressure
//! barotrend demo pressure.csv
//!
//! # One-shot: event table, current event, countdowns
//! barotrend analyze pressure.csv
//!
//! # Live: re-read the file every refresh interval and tick the countdowns
//! barotrend -v watch forecast.json --refresh-minutes 1
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
