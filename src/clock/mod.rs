//! # Event Clock
//!
//! Answers three questions about an [`EventSequence`] at a given instant:
//! which event is active, how long until the next one starts, and how long
//! the active one has left.
//!
//! All comparisons use the *adjusted* instant, `now + time_offset_hours`.
//! The offset is applied in exactly one place, [`EventClock::adjusted_now`];
//! every other method works on the adjusted value.
//!
//! Nothing here is incremental. Each call rescans the sequence, which is
//! cheap for the tens of events a forecast window produces.

mod countdown;

use chrono::{DateTime, Duration, Utc};

use crate::config::ClockConfig;
use crate::events::{EventSequence, PressureEvent};

pub use countdown::{Countdown, NextEvent, Remaining, EVENT_ENDED, NO_CURRENT_EVENT, NO_NEW_EVENT};

/// Everything the live display needs for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    /// `now` shifted by the configured offset
    pub adjusted_now: DateTime<Utc>,
    /// Event containing `adjusted_now`, if any
    pub current: Option<PressureEvent>,
    /// Countdown to the next start
    pub next: NextEvent,
    /// Countdown to the end of `current`
    pub remaining: Remaining,
}

/// Stateless current/next event evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventClock {
    offset_hours: i64,
}

impl EventClock {
    /// Clock using the configured offset
    pub fn new(config: &ClockConfig) -> Self {
        Self::with_offset_hours(config.time_offset_hours)
    }

    /// Clock with an explicit hour offset
    pub fn with_offset_hours(offset_hours: i64) -> Self {
        Self { offset_hours }
    }

    /// Configured offset in hours
    pub fn offset_hours(&self) -> i64 {
        self.offset_hours
    }

    /// `now` shifted by the configured offset
    ///
    /// Shifts past the representable range clamp to `DateTime::<Utc>::MIN_UTC`
    /// or `DateTime::<Utc>::MAX_UTC`.
    pub fn adjusted_now(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_hours(self.offset_hours)
            .and_then(|offset| now.checked_add_signed(offset))
            .unwrap_or(if self.offset_hours < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    /// First event whose `[start, end]` contains the adjusted instant
    pub fn current_event<'a>(
        &self,
        events: &'a EventSequence,
        now: DateTime<Utc>,
    ) -> Option<&'a PressureEvent> {
        current_at(events, self.adjusted_now(now))
    }

    /// Countdown to the first event starting after the adjusted instant
    pub fn time_to_next(&self, events: &EventSequence, now: DateTime<Utc>) -> NextEvent {
        next_at(events, self.adjusted_now(now))
    }

    /// Countdown to the end of `current`
    pub fn time_remaining(&self, current: Option<&PressureEvent>, now: DateTime<Utc>) -> Remaining {
        remaining_at(current, self.adjusted_now(now))
    }

    /// Evaluate all three outputs against one adjusted instant
    pub fn observe(&self, events: &EventSequence, now: DateTime<Utc>) -> ClockState {
        let adjusted_now = self.adjusted_now(now);
        let current = current_at(events, adjusted_now).cloned();
        let next = next_at(events, adjusted_now);
        let remaining = remaining_at(current.as_ref(), adjusted_now);
        ClockState {
            adjusted_now,
            current,
            next,
            remaining,
        }
    }
}

fn current_at(events: &EventSequence, adjusted: DateTime<Utc>) -> Option<&PressureEvent> {
    events.iter().find(|e| e.contains(adjusted))
}

fn next_at(events: &EventSequence, adjusted: DateTime<Utc>) -> NextEvent {
    match events.iter().find(|e| e.start_time > adjusted) {
        Some(event) => NextEvent::StartsIn {
            start_time: event.start_time,
            countdown: Countdown::between(adjusted, event.start_time),
        },
        None => NextEvent::NoneScheduled,
    }
}

fn remaining_at(current: Option<&PressureEvent>, adjusted: DateTime<Utc>) -> Remaining {
    let Some(event) = current else {
        return Remaining::NoCurrentEvent;
    };
    let left = (event.end_time - adjusted).num_milliseconds();
    if left > 0 {
        Remaining::EndsIn(Countdown::from_millis(left))
    } else {
        Remaining::Ended
    }
}
