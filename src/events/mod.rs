//! # Pressure Event Module
//!
//! Derives reversal episodes from a pressure series in three pure stages:
//!
//! 1. [`detect`]: flag interior samples that are local peaks or troughs,
//!    rejecting wiggles smaller than the noise threshold.
//! 2. [`build`]: pair each extremum with the previous one and keep the span
//!    as a [`PressureEvent`] when the pressure change is large enough.
//! 3. [`merge`]: fold events separated by a small gap into one episode,
//!    summing duration and magnitude.
//!
//! [`EventPipeline`] runs all three and returns a [`Snapshot`].
//!
//! ```rust
//! use barotrend::events::EventPipeline;
//! use barotrend::series::{PressureSeries, Sample};
//!
//! let values = [1000.0, 1002.0, 1000.5, 1003.0, 1001.0];
//! let samples = values
//!     .iter()
//!     .enumerate()
//!     .map(|(i, v)| Sample::new(i as i64 * 3600, *v))
//!     .collect();
//! let series = PressureSeries::from_samples(samples)?;
//!
//! let snapshot = EventPipeline::default().run(&series);
//! assert_eq!(snapshot.stats.peaks, 2);
//! # Ok::<(), barotrend::series::SeriesError>(())
//! ```

mod builder;
mod extrema;
mod merger;
mod pipeline;
mod types;


pub use builder::build;
pub use extrema::{detect, Extrema};
pub use merger::merge;
pub use pipeline::{EventPipeline, PipelineStats, Snapshot};
pub use types::{EventSequence, ExtremumIndex, ExtremumKind, PressureEvent};
