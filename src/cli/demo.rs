use anyhow::{Context, Result};
use chrono::{Timelike, Utc};
use log::info;
use std::f64::consts::TAU;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use barotrend::series::{write_csv, ForecastResponse, PressureSeries, Sample, SeriesFormat};

use super::DemoFormat;

const HOUR: i64 = 3600;

/// Generate a synthetic hourly series and write it as CSV or Open-Meteo JSON
pub fn run(
    output: PathBuf,
    format: Option<DemoFormat>,
    hours: usize,
    start: Option<i64>,
) -> Result<()> {
    let format = format.unwrap_or_else(|| match SeriesFormat::from_path(&output) {
        Some(SeriesFormat::OpenMeteoJson) => DemoFormat::Json,
        _ => DemoFormat::Csv,
    });
    let start = start.unwrap_or_else(default_start);

    info!("Generating {} hourly samples from unix time {}", hours, start);
    let series = generate_series(start, hours)?;

    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let writer = BufWriter::new(file);

    match format {
        DemoFormat::Csv => write_csv(writer, &series).context("Failed to write CSV")?,
        DemoFormat::Json => {
            let mut response = ForecastResponse::from_series(&series);
            response.timezone = Some("GMT".to_string());
            serde_json::to_writer_pretty(writer, &response).context("Failed to write JSON")?;
        }
    }

    println!("Wrote {} samples to {}", series.len(), output.display());
    Ok(())
}

/// 48 hours before the current hour, so a fresh demo has past and future events
fn default_start() -> i64 {
    let now = Utc::now();
    let on_the_hour = now.timestamp() - i64::from(now.minute()) * 60 - i64::from(now.second());
    on_the_hour - 48 * HOUR
}

/// Two weather-scale swings plus a small semidiurnal tide
fn pressure_at(hour: f64) -> f64 {
    let synoptic = 6.0 * (TAU * hour / 40.0).sin();
    let front = 1.5 * (TAU * hour / 9.0 + 0.7).sin();
    let tide = 0.3 * (TAU * hour / 12.4).sin();
    let value = 1013.0 + synoptic + front + tide;
    (value * 100.0).round() / 100.0
}

fn generate_series(start: i64, hours: usize) -> Result<PressureSeries> {
    let samples = (0..hours)
        .map(|h| Sample::new(start + h as i64 * HOUR, pressure_at(h as f64)))
        .collect();
    PressureSeries::from_samples(samples).context("Generated series is invalid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use barotrend::events::EventPipeline;

    #[test]
    fn test_generated_series_is_hourly() {
        let series = generate_series(1_760_832_000, 72).unwrap();
        assert_eq!(series.len(), 72);
        let samples = series.samples();
        assert!(samples.windows(2).all(|w| w[1].timestamp - w[0].timestamp == HOUR));
        assert!(samples.iter().all(|s| (995.0..1025.0).contains(&s.value)));
    }

    #[test]
    fn test_generated_series_has_events() {
        let series = generate_series(0, 168).unwrap();
        let snapshot = EventPipeline::default().run(&series);
        assert!(!snapshot.events.is_empty());
    }

    #[test]
    fn test_default_start_on_the_hour() {
        assert_eq!(default_start() % HOUR, 0);
    }
}
