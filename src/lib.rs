//! # barotrend - Barometric Pressure Reversal Events
//!
//! `barotrend` turns an hourly surface-pressure series into a list of
//! pressure-reversal episodes and answers the two questions a forecast
//! display needs every moment: which episode is happening now, and how long
//! until the next one starts.
//!
//! ## Key Features
//!
//! - **Noise-tolerant extrema**: local peaks and troughs are only accepted
//!   when both neighbour differences exceed a configurable threshold.
//!
//! - **Magnitude-gated events**: consecutive extrema become an event only
//!   when the pressure moved far enough between them.
//!
//! - **Gap merging**: events separated by a short pause collapse into one
//!   episode with summed duration and magnitude.
//!
//! - **Live clock**: a background monitor refreshes the series on a slow
//!   cadence and publishes immutable snapshots; countdown workers tick on a
//!   fast cadence against whichever snapshot is current.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use barotrend::prelude::*;
//! use chrono::{FixedOffset, Utc};
//!
//! let file = std::fs::File::open("forecast.json")?;
//! let series = read_forecast(file, &IngestOptions::default())?;
//!
//! let snapshot = EventPipeline::default().run(&series);
//! let state = EventClock::default().observe(&snapshot.events, Utc::now());
//!
//! let utc = FixedOffset::east_opt(0).unwrap();
//! println!("{}", EventTable::new(&snapshot.events, utc));
//! println!("{}", current_event_label(state.current.as_ref(), utc));
//! println!("Next: {}", state.next);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`series`]: validated pressure series plus CSV and Open-Meteo ingestion
//! - [`events`]: extrema detection, event construction and merging
//! - [`clock`]: current event, next-event countdown, remaining time
//! - [`monitor`]: refresh and countdown workers with snapshot publication
//! - [`report`]: text rendering of tables and clock readings
//! - [`config`]: thresholds and cadences

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod clock;
pub mod config;
pub mod events;
pub mod monitor;
pub mod report;
pub mod series;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::clock::{ClockState, Countdown, EventClock, NextEvent, Remaining};
    pub use crate::config::{ClockConfig, ConfigError, DetectionConfig, MonitorConfig};
    pub use crate::events::{EventPipeline, EventSequence, PipelineStats, PressureEvent, Snapshot};
    pub use crate::monitor::{ClockSink, Monitor, MonitorError, Published, SystemClock, TimeSource};
    pub use crate::report::{
        current_event_label, format_current_time, format_duration_hours, format_event_time,
        EventTable,
    };
    pub use crate::series::{
        read_csv, read_forecast, FileSource, IngestOptions, PressureSeries, Sample, SeriesError,
        SeriesFormat, SeriesSource, SourceError,
    };
}
