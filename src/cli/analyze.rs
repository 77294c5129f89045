use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use log::info;
use std::path::PathBuf;

use barotrend::clock::EventClock;
use barotrend::config::display_offset;
use barotrend::events::EventPipeline;
use barotrend::report::{current_event_label, format_current_time, EventTable};
use barotrend::series::{FileSource, SeriesSource};

use super::config::Settings;

/// Run the pipeline once and print the table and clock readings
pub fn run(input: PathBuf, settings: Settings, at: Option<i64>, json: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("File does not exist: {}", input.display());
    }

    let mut source = FileSource::detect(input.clone(), settings.ingest).with_context(|| {
        format!(
            "Cannot infer series format of {} (expected .csv or .json)",
            input.display()
        )
    })?;
    let series = source
        .fetch()
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let pipeline = EventPipeline::new(settings.detection)?;
    let snapshot = pipeline.run(&series);
    info!("{}", snapshot.stats);

    if json {
        let body = serde_json::to_string_pretty(&snapshot.events)
            .context("Failed to serialize events")?;
        println!("{}", body);
        return Ok(());
    }

    let now = match at {
        Some(secs) => Utc
            .timestamp_opt(secs, 0)
            .single()
            .with_context(|| format!("--at {} is not a representable instant", secs))?,
        None => Utc::now(),
    };
    let clock = EventClock::new(&settings.clock);
    let state = clock.observe(&snapshot.events, now);
    let offset = display_offset(settings.display_offset_hours)?;

    let table = EventTable::new(&snapshot.events, offset);

    #[cfg(feature = "colorized_output")]
    {
        print!("{}", table.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        print!("{}", table);
    }

    println!();
    println!("Current time:   {}", format_current_time(state.adjusted_now, offset));
    println!(
        "Current event:  {}",
        current_event_label(state.current.as_ref(), offset)
    );
    println!("Next event in:  {}", state.next);
    println!("Time remaining: {}", state.remaining);

    Ok(())
}
