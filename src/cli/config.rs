//! TOML configuration file support.
//!
//! Every field is optional; anything left out falls back to the library
//! defaults, and command-line flags win over the file:
//!
//! ```toml
//! # barotrend.toml
//! [detection]
//! threshold = 0.09
//! min_pressure_diff = 1.0
//! merge_threshold_hours = 1.0
//! round_to_tenth = true
//!
//! [clock]
//! time_offset_hours = 0
//!
//! [display]
//! offset_hours = -4
//!
//! [monitor]
//! refresh_interval_minutes = 5
//! tick_interval_ms = 100
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use barotrend::config::{ClockConfig, DetectionConfig, MonitorConfig};
use barotrend::series::IngestOptions;

use super::Overrides;

/// Root configuration structure for barotrend.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Extremum, event and merge thresholds.
    #[serde(default)]
    pub detection: DetectionSection,

    /// Clock offset.
    #[serde(default)]
    pub clock: ClockSection,

    /// Rendering options.
    #[serde(default)]
    pub display: DisplaySection,

    /// Refresh and tick cadences.
    #[serde(default)]
    pub monitor: MonitorSection,
}

/// `[detection]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionSection {
    /// Noise threshold in hPa.
    pub threshold: Option<f64>,

    /// Minimum event magnitude in hPa.
    pub min_pressure_diff: Option<f64>,

    /// Maximum merge gap in hours.
    pub merge_threshold_hours: Option<f64>,

    /// Quantise input pressures to 0.1 hPa.
    pub round_to_tenth: Option<bool>,
}

/// `[clock]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClockSection {
    /// Hours added to the wall clock.
    pub time_offset_hours: Option<i64>,
}

/// `[display]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplaySection {
    /// Whole hours east of UTC used when printing instants.
    pub offset_hours: Option<i32>,
}

/// `[monitor]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Minutes between refreshes.
    pub refresh_interval_minutes: Option<u64>,

    /// Milliseconds between countdown ticks.
    pub tick_interval_ms: Option<u64>,
}

/// Fully resolved settings handed to the subcommands.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub detection: DetectionConfig,
    pub clock: ClockConfig,
    pub monitor: MonitorConfig,
    pub ingest: IngestOptions,
    pub display_offset_hours: i32,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Merge file values, flag overrides and defaults, then validate.
    pub fn resolve(&self, overrides: &Overrides) -> Result<Settings> {
        let defaults = DetectionConfig::default();
        let detection = DetectionConfig {
            threshold: overrides
                .threshold
                .or(self.detection.threshold)
                .unwrap_or(defaults.threshold),
            min_pressure_diff: overrides
                .min_diff
                .or(self.detection.min_pressure_diff)
                .unwrap_or(defaults.min_pressure_diff),
            merge_threshold_hours: overrides
                .merge_hours
                .or(self.detection.merge_threshold_hours)
                .unwrap_or(defaults.merge_threshold_hours),
        };
        detection.validate()?;

        let clock = ClockConfig {
            time_offset_hours: overrides
                .time_offset
                .or(self.clock.time_offset_hours)
                .unwrap_or_default(),
        };
        clock.validate()?;

        let default_monitor = MonitorConfig::default();
        let monitor = MonitorConfig {
            refresh_interval: match self.monitor.refresh_interval_minutes {
                Some(minutes) => minutes
                    .checked_mul(60)
                    .map(Duration::from_secs)
                    .with_context(|| {
                        format!("refresh_interval_minutes {} is too large", minutes)
                    })?,
                None => default_monitor.refresh_interval,
            },
            tick_interval: self
                .monitor
                .tick_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(default_monitor.tick_interval),
        };
        monitor.validate()?;

        let ingest = IngestOptions {
            round_to_tenth: !overrides.no_round && self.detection.round_to_tenth.unwrap_or(true),
            ..IngestOptions::default()
        };

        Ok(Settings {
            detection,
            clock,
            monitor,
            ingest,
            display_offset_hours: overrides
                .display_offset
                .or(self.display.offset_hours)
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [detection]
            threshold = 0.2
            min_pressure_diff = 1.5
            merge_threshold_hours = 2.0
            round_to_tenth = false

            [clock]
            time_offset_hours = -3

            [display]
            offset_hours = 2

            [monitor]
            refresh_interval_minutes = 10
            tick_interval_ms = 250
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.detection.threshold, Some(0.2));
        assert_eq!(config.detection.round_to_tenth, Some(false));
        assert_eq!(config.clock.time_offset_hours, Some(-3));
        assert_eq!(config.display.offset_hours, Some(2));
        assert_eq!(config.monitor.tick_interval_ms, Some(250));

        let settings = config.resolve(&Overrides::default()).unwrap();
        assert_eq!(settings.detection.min_pressure_diff, 1.5);
        assert_eq!(settings.clock.time_offset_hours, -3);
        assert_eq!(settings.monitor.refresh_interval, Duration::from_secs(600));
        assert!(!settings.ingest.round_to_tenth);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [detection]
            threshold = 0.5
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.detection.threshold, Some(0.5));
        assert_eq!(config.detection.min_pressure_diff, None);

        let settings = config.resolve(&Overrides::default()).unwrap();
        assert_eq!(settings.detection.min_pressure_diff, 1.0);
        assert!(settings.ingest.round_to_tenth);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        let settings = config.resolve(&Overrides::default()).unwrap();
        assert_eq!(settings.detection, DetectionConfig::default());
        assert_eq!(settings.monitor, MonitorConfig::default());
        assert_eq!(settings.display_offset_hours, 0);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config::from_str("[detection]\nthreshold = 0.5\n").unwrap();
        let overrides = Overrides {
            threshold: Some(0.1),
            time_offset: Some(2),
            no_round: true,
            ..Overrides::default()
        };
        let settings = config.resolve(&overrides).unwrap();
        assert_eq!(settings.detection.threshold, 0.1);
        assert_eq!(settings.clock.time_offset_hours, 2);
        assert!(!settings.ingest.round_to_tenth);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = Config::from_str("[monitor]\ntick_interval_ms = 0\n").unwrap();
        assert!(config.resolve(&Overrides::default()).is_err());

        let config = Config::from_str("[detection]\nthreshold = -1.0\n").unwrap();
        assert!(config.resolve(&Overrides::default()).is_err());
    }

    #[test]
    fn test_refresh_minutes_overflow_rejected() {
        let config = Config::from_str(&format!(
            "[monitor]\nrefresh_interval_minutes = {}\n",
            i64::MAX
        ))
        .unwrap();
        let err = config.resolve(&Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("too large"));

        let mut config = Config::default();
        config.monitor.refresh_interval_minutes = Some(u64::MAX);
        assert!(config.resolve(&Overrides::default()).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_str("[detection]\nthresold = 0.1\n").is_err());
    }
}
