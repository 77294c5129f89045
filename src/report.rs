//! Text rendering of events and clock readings.
//!
//! Instants are rendered in a constant display offset so the output does not
//! depend on the host's local time zone.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

#[cfg(feature = "colorized_output")]
use console::style;

use crate::clock::NO_CURRENT_EVENT;
use crate::events::{EventSequence, PressureEvent};

/// `Mon Oct 19 2026 14:00`
pub fn format_event_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format("%a %b %d %Y %H:%M")
        .to_string()
}

/// `October 19, 2026 14:05:09`
pub fn format_current_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format("%B %-d, %Y %H:%M:%S")
        .to_string()
}

/// `3.0 hrs`
pub fn format_duration_hours(hours: f64) -> String {
    format!("{:.1} hrs", hours)
}

/// One-line description of the current event, or "No current event."
pub fn current_event_label(event: Option<&PressureEvent>, offset: FixedOffset) -> String {
    match event {
        Some(e) => format!(
            "{} to {} - {} - {}",
            format_event_time(e.start_time, offset),
            format_event_time(e.end_time, offset),
            format_duration_hours(e.duration_hours),
            e.pressure_diff
        ),
        None => NO_CURRENT_EVENT.to_string(),
    }
}

const HEADERS: [&str; 5] = ["Start Time", "End Time", "Duration", "± hPa", "Merged"];

/// Event sequence laid out as an aligned text table
pub struct EventTable<'a> {
    events: &'a EventSequence,
    offset: FixedOffset,
}

impl<'a> EventTable<'a> {
    /// Table over `events`, rendering times in `offset`
    pub fn new(events: &'a EventSequence, offset: FixedOffset) -> Self {
        Self { events, offset }
    }

    fn rows(&self) -> Vec<[String; 5]> {
        self.events
            .iter()
            .map(|e| {
                [
                    format_event_time(e.start_time, self.offset),
                    format_event_time(e.end_time, self.offset),
                    format_duration_hours(e.duration_hours),
                    e.pressure_diff.to_string(),
                    if e.merged { "Yes" } else { "No" }.to_string(),
                ]
            })
            .collect()
    }

    fn widths(rows: &[[String; 5]]) -> [usize; 5] {
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Same table with a bold header and merged rows highlighted
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let rows = self.rows();
            let widths = Self::widths(&rows);
            let mut output = String::new();

            let header = join_padded(HEADERS.iter().copied(), &widths);
            output.push_str(&format!("{}\n", style(header).bold().cyan()));
            output.push_str(&format!("{}\n", style(rule(&widths)).cyan()));

            if rows.is_empty() {
                output.push_str(&format!("{}\n", style("No events.").dim()));
            }
            for row in &rows {
                let line = join_padded(row.iter().map(String::as_str), &widths);
                if row[4] == "Yes" {
                    output.push_str(&format!("{}\n", style(line).yellow()));
                } else {
                    output.push_str(&line);
                    output.push('\n');
                }
            }
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for EventTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let widths = Self::widths(&rows);

        writeln!(f, "{}", join_padded(HEADERS.iter().copied(), &widths))?;
        writeln!(f, "{}", rule(&widths))?;
        if rows.is_empty() {
            writeln!(f, "No events.")?;
        }
        for row in &rows {
            writeln!(f, "{}", join_padded(row.iter().map(String::as_str), &widths))?;
        }
        Ok(())
    }
}

fn join_padded<'s>(cells: impl Iterator<Item = &'s str>, widths: &[usize; 5]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn rule(widths: &[usize; 5]) -> String {
    widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("-+-")
}
