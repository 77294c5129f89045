use std::fmt;
use std::ops::Index;
use std::slice;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::series::{round_tenth, Sample};

/// Direction of a local extremum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtremumKind {
    /// Local maximum
    Peak,
    /// Local minimum
    Trough,
}

impl fmt::Display for ExtremumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtremumKind::Peak => write!(f, "Peak"),
            ExtremumKind::Trough => write!(f, "Trough"),
        }
    }
}

/// Index into a sample sequence tagged with its extremum kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtremumIndex {
    /// Position in the sample sequence
    pub index: usize,
    /// Peak or trough
    pub kind: ExtremumKind,
}

/// A pressure episode between two reversal points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureEvent {
    /// Instant of the opening extremum
    pub start_time: DateTime<Utc>,
    /// Instant of the closing extremum
    pub end_time: DateTime<Utc>,
    /// `end_time - start_time` in hours, one decimal
    pub duration_hours: f64,
    /// Pressure change magnitude in hPa, one decimal.
    /// For merged events this is the sum over the constituents.
    pub pressure_diff: f64,
    /// True once this event has absorbed a following event
    pub merged: bool,
}

impl PressureEvent {
    /// Event spanning two extrema samples. `pressure_diff` is taken as given.
    pub fn between(start: &Sample, end: &Sample, pressure_diff: f64) -> Self {
        let seconds = (end.timestamp - start.timestamp) as f64;
        Self {
            start_time: start.instant(),
            end_time: end.instant(),
            duration_hours: round_tenth(seconds / 3600.0),
            pressure_diff: round_tenth(pressure_diff),
            merged: false,
        }
    }

    /// Inclusive containment check on `[start_time, end_time]`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_time <= instant && instant <= self.end_time
    }

    /// Hours from the end of `self` to the start of `next`
    pub fn gap_hours_to(&self, next: &PressureEvent) -> f64 {
        (next.start_time - self.end_time).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Extend this event over `next`, accumulating duration and magnitude
    pub(crate) fn absorb(&mut self, next: &PressureEvent) {
        self.end_time = next.end_time;
        self.duration_hours = round_tenth(self.duration_hours + next.duration_hours);
        self.pressure_diff = round_tenth(self.pressure_diff + next.pressure_diff);
        self.merged = true;
    }
}

/// Ordered, non-overlapping events produced by one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSequence {
    events: Vec<PressureEvent>,
}

impl EventSequence {
    /// Wrap events already in chronological order
    pub fn new(events: Vec<PressureEvent>) -> Self {
        Self { events }
    }

    /// Events as a slice
    pub fn as_slice(&self) -> &[PressureEvent] {
        &self.events
    }

    /// Iterate in chronological order
    pub fn iter(&self) -> slice::Iter<'_, PressureEvent> {
        self.events.iter()
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no event survived filtering
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of `pressure_diff` across all events
    pub fn total_pressure_diff(&self) -> f64 {
        self.events.iter().map(|e| e.pressure_diff).sum()
    }

    /// Number of events that absorbed at least one neighbour
    pub fn merged_count(&self) -> usize {
        self.events.iter().filter(|e| e.merged).count()
    }

    /// Unwrap into the underlying vector
    pub fn into_vec(self) -> Vec<PressureEvent> {
        self.events
    }
}

impl From<Vec<PressureEvent>> for EventSequence {
    fn from(events: Vec<PressureEvent>) -> Self {
        Self::new(events)
    }
}

impl Index<usize> for EventSequence {
    type Output = PressureEvent;

    fn index(&self, index: usize) -> &Self::Output {
        &self.events[index]
    }
}

impl<'a> IntoIterator for &'a EventSequence {
    type Item = &'a PressureEvent;
    type IntoIter = slice::Iter<'a, PressureEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
