//! # Pressure Series Module
//!
//! Raw series acquisition and the ingestion contract.
//!
//! Fetched columns pass through [`ingest_columns`] which rounds values to
//! 0.1 hPa, drops or rejects malformed samples and enforces ascending
//! timestamps. The resulting [`PressureSeries`] is what the event pipeline
//! consumes.
//!
//! Supported encodings:
//!
//! - Open-Meteo forecast JSON (`hourly.time` / `hourly.surface_pressure`)
//! - CSV with a `timestamp,pressure_hpa` header

mod csv_file;
mod error;
mod ingest;
mod open_meteo;
mod source;
mod types;

pub use csv_file::{read_csv, write_csv};
pub use error::SeriesError;
pub use ingest::{ingest_columns, round_tenth, IngestOptions};
pub use open_meteo::{parse_forecast, read_forecast, ForecastResponse, HourlyColumns};
pub use source::{FileSource, SeriesFormat, SeriesSource, SourceError};
pub use types::{PressureSeries, Sample};
