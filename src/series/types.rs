use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::SeriesError;

/// A single pressure reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    /// Pressure in hPa
    pub value: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Timestamp as a UTC instant
    pub fn instant(&self) -> DateTime<Utc> {
        unix_to_instant(self.timestamp)
    }
}

/// Convert unix seconds to a UTC instant.
///
/// Timestamps inside a validated [`PressureSeries`] are always representable;
/// anything else collapses to the epoch.
pub(crate) fn unix_to_instant(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

pub(crate) fn is_representable(secs: i64) -> bool {
    Utc.timestamp_opt(secs, 0).single().is_some()
}

/// Validated, chronologically ordered pressure series.
///
/// Invariants:
/// - every value is finite
/// - timestamps are strictly ascending and representable as UTC instants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PressureSeries {
    samples: Vec<Sample>,
}

impl PressureSeries {
    /// Build a series from samples, checking the ordering and finiteness invariants.
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self, SeriesError> {
        let mut previous: Option<i64> = None;
        for (index, sample) in samples.iter().enumerate() {
            if !sample.value.is_finite() {
                return Err(SeriesError::MalformedSample {
                    index,
                    reason: format!("non-finite pressure {}", sample.value),
                });
            }
            if !is_representable(sample.timestamp) {
                return Err(SeriesError::MalformedSample {
                    index,
                    reason: format!("timestamp {} out of range", sample.timestamp),
                });
            }
            if let Some(prev) = previous {
                if sample.timestamp <= prev {
                    return Err(SeriesError::NotAscending {
                        index,
                        previous: prev,
                        current: sample.timestamp,
                    });
                }
            }
            previous = Some(sample.timestamp);
        }
        Ok(Self { samples })
    }

    /// Samples in chronological order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Pressure column
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Timestamp column
    pub fn timestamps(&self) -> Vec<i64> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First and last instant covered by the series
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some((first.instant(), last.instant()))
    }
}
