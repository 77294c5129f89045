use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;

use super::csv_file::read_csv;
use super::error::SeriesError;
use super::ingest::IngestOptions;
use super::open_meteo::read_forecast;
use super::types::PressureSeries;

/// Errors from the series acquisition collaborator
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The payload was read but violated the ingestion contract
    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),

    /// The source is temporarily unable to deliver data
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Something that can deliver a fresh pressure series on demand.
///
/// Implementations own retries and transport; the monitor only learns whether
/// a fetch succeeded.
pub trait SeriesSource: Send {
    /// Fetch the latest full series
    fn fetch(&mut self) -> Result<PressureSeries, SourceError>;

    /// Short label for logs
    fn describe(&self) -> String;
}

/// On-disk series encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFormat {
    /// `timestamp,pressure_hpa` CSV
    Csv,
    /// Open-Meteo forecast JSON
    OpenMeteoJson,
}

impl SeriesFormat {
    /// Guess the format from a file extension (`.csv`, `.json`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::OpenMeteoJson),
            _ => None,
        }
    }
}

/// Re-reads a series file on every fetch
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: SeriesFormat,
    options: IngestOptions,
}

impl FileSource {
    /// Create a file source with an explicit format
    pub fn new(path: impl Into<PathBuf>, format: SeriesFormat, options: IngestOptions) -> Self {
        Self {
            path: path.into(),
            format,
            options,
        }
    }

    /// Create a file source, inferring the format from the extension
    pub fn detect(path: impl Into<PathBuf>, options: IngestOptions) -> Option<Self> {
        let path = path.into();
        let format = SeriesFormat::from_path(&path)?;
        Some(Self::new(path, format, options))
    }

    /// Path being read
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encoding of the file
    pub fn format(&self) -> SeriesFormat {
        self.format
    }
}

impl SeriesSource for FileSource {
    fn fetch(&mut self) -> Result<PressureSeries, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);
        let series = match self.format {
            SeriesFormat::Csv => read_csv(reader, &self.options)?,
            SeriesFormat::OpenMeteoJson => read_forecast(reader, &self.options)?,
        };
        debug!("Read {} samples from {}", series.len(), self.path.display());
        Ok(series)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
