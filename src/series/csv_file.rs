//! `timestamp,pressure_hpa` CSV series files.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::error::SeriesError;
use super::ingest::{ingest_columns, IngestOptions};
use super::types::PressureSeries;

#[derive(Debug, Serialize, Deserialize)]
struct Row {
    timestamp: i64,
    pressure_hpa: Option<f64>,
}

/// Read a headered CSV series. Empty pressure cells count as missing.
pub fn read_csv<R: Read>(reader: R, options: &IngestOptions) -> Result<PressureSeries, SeriesError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut timestamps = Vec::new();
    let mut values = Vec::new();
    for row in rdr.deserialize() {
        let row: Row = row?;
        timestamps.push(row.timestamp);
        values.push(row.pressure_hpa);
    }

    ingest_columns(&timestamps, &values, options)
}

/// Write a series as headered CSV
pub fn write_csv<W: Write>(writer: W, series: &PressureSeries) -> Result<(), SeriesError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in series.samples() {
        wtr.serialize(Row {
            timestamp: sample.timestamp,
            pressure_hpa: Some(sample.value),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
