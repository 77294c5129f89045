use chrono::{DateTime, Utc};

use crate::clock::{ClockState, NextEvent, Remaining};
use crate::series::SourceError;

use super::snapshot::Published;

/// Source of "now" for the countdown workers
pub trait TimeSource: Send + Sync {
    /// Current wall-clock instant
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Rendering collaborator fed by the monitor.
///
/// `next_event` and `remaining` are called from separate worker threads.
pub trait ClockSink: Send + Sync {
    /// A refresh produced a new snapshot; `state` is evaluated at publication time
    fn snapshot_published(&self, _published: &Published, _state: &ClockState) {}

    /// A refresh failed; the previous snapshot stays in place
    fn refresh_failed(&self, _error: &SourceError) {}

    /// Countdown to the next event, once per tick
    fn next_event(&self, next: &NextEvent);

    /// Countdown to the end of the current event, once per tick until terminal
    fn remaining(&self, remaining: &Remaining);
}
