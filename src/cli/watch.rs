use anyhow::{Context, Result};
use chrono::{FixedOffset, Utc};
use log::{info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use barotrend::clock::{ClockState, EventClock, NextEvent, Remaining};
use barotrend::config::display_offset;
use barotrend::events::EventPipeline;
use barotrend::monitor::{ClockSink, Monitor, Published, SystemClock};
use barotrend::report::{current_event_label, format_current_time, EventTable};
use barotrend::series::{FileSource, SourceError};

use super::config::Settings;

/// Run the monitor against a file until the duration elapses or the process is interrupted
pub fn run(input: PathBuf, settings: Settings, duration_secs: Option<u64>) -> Result<()> {
    let source = FileSource::detect(input.clone(), settings.ingest).with_context(|| {
        format!(
            "Cannot infer series format of {} (expected .csv or .json)",
            input.display()
        )
    })?;
    let pipeline = EventPipeline::new(settings.detection)?;
    let clock = EventClock::new(&settings.clock);
    let offset = display_offset(settings.display_offset_hours)?;

    info!(
        "Watching {} (refresh every {:?}, tick every {:?})",
        input.display(),
        settings.monitor.refresh_interval,
        settings.monitor.tick_interval
    );

    let sink = Arc::new(TerminalSink::new(clock, offset));
    let monitor = Monitor::start(
        source,
        pipeline,
        clock,
        settings.monitor,
        Arc::new(SystemClock),
        sink,
    )
    .context("Failed to start monitor")?;

    match duration_secs {
        Some(secs) => std::thread::sleep(Duration::from_secs(secs)),
        None => loop {
            std::thread::park();
        },
    }

    monitor.stop().context("Monitor did not shut down cleanly")?;
    println!();
    Ok(())
}

#[derive(Default)]
struct StatusLine {
    next: String,
    remaining: String,
}

/// Prints the table on each publication and one rewritten status line per tick
struct TerminalSink {
    clock: EventClock,
    offset: FixedOffset,
    status: Mutex<StatusLine>,
}

impl TerminalSink {
    fn new(clock: EventClock, offset: FixedOffset) -> Self {
        Self {
            clock,
            offset,
            status: Mutex::new(StatusLine::default()),
        }
    }

    fn update(&self, edit: impl FnOnce(&mut StatusLine)) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        edit(&mut status);
        let now = format_current_time(self.clock.adjusted_now(Utc::now()), self.offset);
        let mut stdout = std::io::stdout().lock();
        // \x1b[K clears whatever the previous, longer line left behind
        let _ = write!(
            stdout,
            "\r{} | next: {} | remaining: {}\x1b[K",
            now, status.next, status.remaining
        );
        let _ = stdout.flush();
    }
}

impl ClockSink for TerminalSink {
    fn snapshot_published(&self, published: &Published, state: &ClockState) {
        let table = EventTable::new(&published.snapshot.events, self.offset);

        #[cfg(feature = "colorized_output")]
        let rendered = table.format_colored();

        #[cfg(not(feature = "colorized_output"))]
        let rendered = table.to_string();

        // hold the status lock so a tick cannot interleave with the table
        let _status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        println!();
        println!(
            "Generation {} ({})",
            published.generation, published.snapshot.stats
        );
        print!("{}", rendered);
        println!(
            "Current event: {}",
            current_event_label(state.current.as_ref(), self.offset)
        );
    }

    fn refresh_failed(&self, error: &SourceError) {
        warn!("Keeping previous events: {}", error);
    }

    fn next_event(&self, next: &NextEvent) {
        let text = next.to_string();
        self.update(|status| status.next = text);
    }

    fn remaining(&self, remaining: &Remaining) {
        let text = remaining.to_string();
        self.update(|status| status.remaining = text);
    }
}
