//! Detection, clock and monitor settings.
//!
//! Values are fixed once a pipeline or monitor is constructed; a new
//! configuration means a new pipeline.

use std::time::Duration;

use chrono::FixedOffset;

/// Minimum symmetric neighbour difference (hPa) for an extremum candidate
pub const DEFAULT_THRESHOLD_HPA: f64 = 0.09;
/// Minimum magnitude (hPa) between consecutive extrema to emit an event
pub const DEFAULT_MIN_PRESSURE_DIFF_HPA: f64 = 1.0;
/// Maximum gap (hours) between two events for them to merge
pub const DEFAULT_MERGE_THRESHOLD_HOURS: f64 = 1.0;
/// Hours added to the wall clock before comparing against event times
pub const DEFAULT_TIME_OFFSET_HOURS: i64 = 0;
/// Minutes between full pipeline refreshes
pub const DEFAULT_REFRESH_INTERVAL_MINUTES: u64 = 5;
/// Milliseconds between countdown recomputations
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Errors for out-of-range configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A field holds a value the pipeline cannot work with
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("expected a finite non-negative number, got {}", value),
        ));
    }
    Ok(())
}

/// Thresholds for extrema detection, event construction and merging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionConfig {
    /// Noise-rejection threshold in hPa
    pub threshold: f64,
    /// Minimum event magnitude in hPa
    pub min_pressure_diff: f64,
    /// Maximum merge gap in hours
    pub merge_threshold_hours: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD_HPA,
            min_pressure_diff: DEFAULT_MIN_PRESSURE_DIFF_HPA,
            merge_threshold_hours: DEFAULT_MERGE_THRESHOLD_HOURS,
        }
    }
}

impl DetectionConfig {
    /// Check every threshold is finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("threshold", self.threshold)?;
        non_negative("min_pressure_diff", self.min_pressure_diff)?;
        non_negative("merge_threshold_hours", self.merge_threshold_hours)?;
        Ok(())
    }
}

/// Settings for the current/next event clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockConfig {
    /// Hours added to "now" before comparisons
    pub time_offset_hours: i64,
}

impl ClockConfig {
    /// Offsets beyond a week are almost certainly a unit mistake
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_offset_hours.abs() > 24 * 7 {
            return Err(ConfigError::invalid(
                "time_offset_hours",
                format!("{} is outside +/-168", self.time_offset_hours),
            ));
        }
        Ok(())
    }
}

/// Cadences of the refresh worker and countdown tickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Time between full pipeline refreshes
    pub refresh_interval: Duration,
    /// Time between countdown recomputations
    pub tick_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_MINUTES * 60),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl MonitorConfig {
    /// Both intervals must be non-zero, and ticks faster than refreshes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::invalid("refresh_interval", "must be non-zero"));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::invalid("tick_interval", "must be non-zero"));
        }
        if self.tick_interval > self.refresh_interval {
            return Err(ConfigError::invalid(
                "tick_interval",
                "must not exceed refresh_interval",
            ));
        }
        Ok(())
    }
}

/// Fixed display offset for rendering instants, in whole hours east of UTC
pub fn display_offset(hours: i32) -> Result<FixedOffset, ConfigError> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            ConfigError::invalid("display_offset_hours", format!("{} is outside +/-23", hours))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reference_constants() {
        let detection = DetectionConfig::default();
        assert_eq!(detection.threshold, 0.09);
        assert_eq!(detection.min_pressure_diff, 1.0);
        assert_eq!(detection.merge_threshold_hours, 1.0);
        assert!(detection.validate().is_ok());

        let monitor = MonitorConfig::default();
        assert_eq!(monitor.refresh_interval, Duration::from_secs(300));
        assert!(monitor.validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = DetectionConfig {
            threshold: -0.1,
            ..DetectionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_merge_threshold_rejected() {
        let config = DetectionConfig {
            merge_threshold_hours: f64::NAN,
            ..DetectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = MonitorConfig {
            tick_interval: Duration::ZERO,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clock_offset_bounds() {
        assert!(ClockConfig { time_offset_hours: -5 }.validate().is_ok());
        assert!(ClockConfig { time_offset_hours: 500 }.validate().is_err());
    }

    #[test]
    fn test_display_offset() {
        assert_eq!(display_offset(-4).unwrap().local_minus_utc(), -4 * 3600);
        assert!(display_offset(30).is_err());
    }
}
