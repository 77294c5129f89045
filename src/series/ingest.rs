//! Ingestion boundary between raw fetched columns and the detector.
//!
//! Everything downstream of this module assumes finite values and strictly
//! ascending timestamps, so malformed input is either skipped or rejected here.

use log::warn;

use super::error::SeriesError;
use super::types::{is_representable, PressureSeries, Sample};

/// Options applied while turning raw columns into a [`PressureSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Quantise pressures to 0.1 hPa before detection
    pub round_to_tenth: bool,
    /// Drop missing or non-finite values instead of failing
    pub skip_malformed: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            round_to_tenth: true,
            skip_malformed: true,
        }
    }
}

impl IngestOptions {
    /// Reject any malformed sample and keep raw precision
    pub fn strict() -> Self {
        Self {
            round_to_tenth: false,
            skip_malformed: false,
        }
    }
}

/// Round to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Combine timestamp and pressure columns into a validated series.
///
/// `values` entries are optional because upstream feeds encode gaps as `null`.
pub fn ingest_columns(
    timestamps: &[i64],
    values: &[Option<f64>],
    options: &IngestOptions,
) -> Result<PressureSeries, SeriesError> {
    if timestamps.len() != values.len() {
        return Err(SeriesError::LengthMismatch {
            timestamps: timestamps.len(),
            values: values.len(),
        });
    }

    let mut samples = Vec::with_capacity(timestamps.len());
    let mut skipped = 0usize;

    for (index, (&timestamp, value)) in timestamps.iter().zip(values).enumerate() {
        let reason = match value {
            None => Some("missing pressure".to_string()),
            Some(v) if !v.is_finite() => Some(format!("non-finite pressure {}", v)),
            Some(_) if !is_representable(timestamp) => {
                Some(format!("timestamp {} out of range", timestamp))
            }
            Some(_) => None,
        };

        if let Some(reason) = reason {
            if options.skip_malformed {
                skipped += 1;
                continue;
            }
            return Err(SeriesError::MalformedSample { index, reason });
        }

        if let Some(previous) = samples.last().map(|s: &Sample| s.timestamp) {
            if timestamp <= previous {
                return Err(SeriesError::NotAscending {
                    index,
                    previous,
                    current: timestamp,
                });
            }
        }

        // Checked above: `value` is Some and finite
        let raw = value.unwrap_or_default();
        let value = if options.round_to_tenth {
            round_tenth(raw)
        } else {
            raw
        };
        samples.push(Sample::new(timestamp, value));
    }

    if skipped > 0 {
        warn!("Skipped {} malformed samples out of {}", skipped, timestamps.len());
    }

    PressureSeries::from_samples(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_rounds_to_tenth() {
        let series = ingest_columns(
            &[0, 3600, 7200],
            &[Some(1013.24), Some(1013.26), Some(1012.95)],
            &IngestOptions::default(),
        )
        .unwrap();
        assert_eq!(series.values(), vec![1013.2, 1013.3, 1013.0]);
    }

    #[test]
    fn test_ingest_keeps_raw_precision_when_strict() {
        let series =
            ingest_columns(&[0, 3600], &[Some(1013.24), Some(1013.26)], &IngestOptions::strict())
                .unwrap();
        assert_eq!(series.values(), vec![1013.24, 1013.26]);
    }

    #[test]
    fn test_ingest_length_mismatch() {
        let err = ingest_columns(&[0, 3600], &[Some(1000.0)], &IngestOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SeriesError::LengthMismatch {
                timestamps: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn test_ingest_skips_missing_and_non_finite() {
        let series = ingest_columns(
            &[0, 3600, 7200, 10800],
            &[Some(1000.0), None, Some(f64::INFINITY), Some(1001.0)],
            &IngestOptions::default(),
        )
        .unwrap();
        assert_eq!(series.timestamps(), vec![0, 10800]);
    }

    #[test]
    fn test_ingest_strict_rejects_missing() {
        let err = ingest_columns(&[0, 3600], &[Some(1000.0), None], &IngestOptions::strict())
            .unwrap_err();
        assert!(matches!(err, SeriesError::MalformedSample { index: 1, .. }));
    }

    #[test]
    fn test_ingest_rejects_descending_timestamps() {
        let err = ingest_columns(
            &[7200, 3600],
            &[Some(1000.0), Some(1001.0)],
            &IngestOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SeriesError::NotAscending {
                index: 1,
                previous: 7200,
                current: 3600
            }
        ));
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(1.25), 1.3);
        assert_eq!(round_tenth(0.04), 0.0);
        assert_eq!(round_tenth(-1.26), -1.3);
    }
}
