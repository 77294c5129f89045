use std::fmt;

use chrono::{DateTime, Utc};

/// Shown when no future event exists
pub const NO_NEW_EVENT: &str = "No new event.";
/// Shown once the tracked event has finished
pub const EVENT_ENDED: &str = "Event ended.";
/// Shown when "now" falls outside every event
pub const NO_CURRENT_EVENT: &str = "No current event.";

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// A non-negative time span split into display components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    /// Whole hours (unbounded)
    pub hours: u64,
    /// Minutes, `0..60`
    pub minutes: u8,
    /// Seconds, `0..60`
    pub seconds: u8,
    /// Milliseconds, `0..1000`
    pub millis: u16,
}

impl Countdown {
    /// Decompose a millisecond span; negative spans clamp to zero
    pub fn from_millis(total: i64) -> Self {
        let total = total.max(0) as u64;
        Self {
            hours: total / MS_PER_HOUR,
            minutes: ((total % MS_PER_HOUR) / MS_PER_MINUTE) as u8,
            seconds: ((total % MS_PER_MINUTE) / MS_PER_SECOND) as u8,
            millis: (total % MS_PER_SECOND) as u16,
        }
    }

    /// Span from `from` until `to`
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self::from_millis((to - from).num_milliseconds())
    }

    /// Recombine into milliseconds
    pub fn total_millis(&self) -> u64 {
        self.hours * MS_PER_HOUR
            + self.minutes as u64 * MS_PER_MINUTE
            + self.seconds as u64 * MS_PER_SECOND
            + self.millis as u64
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hrs {} mins {} sec {} ms",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// Time until the next event begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextEvent {
    /// A future event exists
    StartsIn {
        /// Start instant of that event
        start_time: DateTime<Utc>,
        /// Remaining span until it starts
        countdown: Countdown,
    },
    /// Nothing starts after now
    NoneScheduled,
}

impl NextEvent {
    /// Countdown, if a future event exists
    pub fn countdown(&self) -> Option<Countdown> {
        match self {
            NextEvent::StartsIn { countdown, .. } => Some(*countdown),
            NextEvent::NoneScheduled => None,
        }
    }
}

impl fmt::Display for NextEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextEvent::StartsIn { countdown, .. } => write!(f, "{}", countdown),
            NextEvent::NoneScheduled => f.write_str(NO_NEW_EVENT),
        }
    }
}

/// Time left in the current event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    /// The current event ends after this span
    EndsIn(Countdown),
    /// The tracked event has reached its end
    Ended,
    /// No event was active
    NoCurrentEvent,
}

impl Remaining {
    /// Terminal states stop the remaining-time countdown
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Remaining::EndsIn(_))
    }

    /// Countdown, while the event is still running
    pub fn countdown(&self) -> Option<Countdown> {
        match self {
            Remaining::EndsIn(countdown) => Some(*countdown),
            _ => None,
        }
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::EndsIn(countdown) => write!(f, "{}", countdown),
            Remaining::Ended => f.write_str(EVENT_ENDED),
            Remaining::NoCurrentEvent => f.write_str(NO_CURRENT_EVENT),
        }
    }
}
