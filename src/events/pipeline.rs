use std::fmt;

use log::debug;

use crate::config::{ConfigError, DetectionConfig};
use crate::series::PressureSeries;

use super::builder::build;
use super::extrema::detect;
use super::merger::merge;
use super::types::EventSequence;

/// Counts collected during one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Samples in the input series
    pub samples: usize,
    /// Local maxima flagged
    pub peaks: usize,
    /// Local minima flagged
    pub troughs: usize,
    /// Events that passed the magnitude gate
    pub candidate_events: usize,
    /// Events left after merging
    pub events: usize,
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples, {} peaks, {} troughs, {} candidate events, {} after merge",
            self.samples, self.peaks, self.troughs, self.candidate_events, self.events
        )
    }
}

/// Immutable output of one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Final merged events
    pub events: EventSequence,
    /// Stage counts
    pub stats: PipelineStats,
}

/// detect -> build -> merge with a fixed configuration
#[derive(Debug, Clone)]
pub struct EventPipeline {
    config: DetectionConfig,
}

impl EventPipeline {
    /// Create a pipeline after validating the thresholds
    pub fn new(config: DetectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active thresholds
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Derive the event sequence for `series`. Pure: same input, same output.
    pub fn run(&self, series: &PressureSeries) -> Snapshot {
        let samples = series.samples();
        let values = series.values();

        let extrema = detect(&values, self.config.threshold);
        let candidates = build(series, &extrema, self.config.min_pressure_diff);
        let events = merge(&candidates, self.config.merge_threshold_hours);

        let stats = PipelineStats {
            samples: samples.len(),
            peaks: extrema.peaks.len(),
            troughs: extrema.troughs.len(),
            candidate_events: candidates.len(),
            events: events.len(),
        };
        debug!("Pipeline: {}", stats);

        Snapshot {
            events: EventSequence::new(events),
            stats,
        }
    }
}

impl Default for EventPipeline {
    fn default() -> Self {
        Self {
            config: DetectionConfig::default(),
        }
    }
}
