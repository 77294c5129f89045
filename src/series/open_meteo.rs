//! Open-Meteo forecast payloads (`timeformat=unixtime`, `hourly=surface_pressure`).
//!
//! Only the decoding of an already-fetched body lives here; the HTTP round
//! trip belongs to whoever drives the refresh.

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::error::SeriesError;
use super::ingest::{ingest_columns, IngestOptions};
use super::types::PressureSeries;

/// Top-level forecast response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Latitude of the grid cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude of the grid cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// IANA timezone name echoed by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Hourly columns
    pub hourly: HourlyColumns,
}

/// Hourly column block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyColumns {
    /// Unix timestamps in seconds
    pub time: Vec<i64>,
    /// Surface pressure in hPa; `null` where the model has no value
    pub surface_pressure: Vec<Option<f64>>,
}

impl ForecastResponse {
    /// Wrap an existing series in the forecast payload shape
    pub fn from_series(series: &PressureSeries) -> Self {
        Self {
            hourly: HourlyColumns {
                time: series.timestamps(),
                surface_pressure: series.values().into_iter().map(Some).collect(),
            },
            ..Self::default()
        }
    }

    /// Validate the hourly columns into a series
    pub fn into_series(self, options: &IngestOptions) -> Result<PressureSeries, SeriesError> {
        ingest_columns(
            &self.hourly.time,
            &self.hourly.surface_pressure,
            options,
        )
    }
}

/// Parse a forecast body held in memory
pub fn parse_forecast(body: &str, options: &IngestOptions) -> Result<PressureSeries, SeriesError> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    response.into_series(options)
}

/// Parse a forecast body from a reader
pub fn read_forecast<R: Read>(
    reader: R,
    options: &IngestOptions,
) -> Result<PressureSeries, SeriesError> {
    let response: ForecastResponse = serde_json::from_reader(reader)?;
    response.into_series(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Sample;

    const BODY: &str = r#"{
        "latitude": 43.7,
        "longitude": -79.42,
        "generationtime_ms": 0.05,
        "timezone": "America/New_York",
        "hourly_units": {"time": "unixtime", "surface_pressure": "hPa"},
        "hourly": {
            "time": [1760832000, 1760835600, 1760839200, 1760842800],
            "surface_pressure": [1003.14, 1004.27, null, 1002.9]
        }
    }"#;

    #[test]
    fn test_parse_forecast() {
        let series = parse_forecast(BODY, &IngestOptions::default()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.values(), vec![1003.1, 1004.3, 1002.9]);
        assert_eq!(series.timestamps(), vec![1760832000, 1760835600, 1760842800]);
    }

    #[test]
    fn test_parse_forecast_missing_hourly() {
        let err = parse_forecast(r#"{"latitude": 1.0}"#, &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, SeriesError::JsonError(_)));
    }

    #[test]
    fn test_read_forecast_from_reader() {
        let series = read_forecast(BODY.as_bytes(), &IngestOptions::strict());
        // strict mode refuses the null entry
        assert!(matches!(
            series,
            Err(SeriesError::MalformedSample { index: 2, .. })
        ));
    }

    #[test]
    fn test_from_series_serializes_hourly_block() {
        let series = PressureSeries::from_samples(vec![
            Sample::new(0, 1000.0),
            Sample::new(3600, 1000.5),
        ])
        .unwrap();
        let json = serde_json::to_string(&ForecastResponse::from_series(&series)).unwrap();
        assert_eq!(
            json,
            r#"{"hourly":{"time":[0,3600],"surface_pressure":[1000.0,1000.5]}}"#
        );
        let parsed = parse_forecast(&json, &IngestOptions::default()).unwrap();
        assert_eq!(parsed, series);
    }
}
