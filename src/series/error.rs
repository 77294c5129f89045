/// Errors raised when a raw series violates the ingestion contract
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// I/O error while reading or writing a series file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error decoding a JSON forecast payload
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error reading or writing CSV rows
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Timestamp and value columns have different lengths
    #[error("length mismatch: {timestamps} timestamps but {values} values")]
    LengthMismatch {
        /// Number of timestamps supplied
        timestamps: usize,
        /// Number of values supplied
        values: usize,
    },

    /// Timestamps must be strictly ascending
    #[error("timestamp at index {index} ({current}) does not follow {previous}")]
    NotAscending {
        /// Position of the offending sample in the input
        index: usize,
        /// Timestamp of the previously accepted sample
        previous: i64,
        /// Offending timestamp
        current: i64,
    },

    /// A sample is missing, non-finite or out of range
    #[error("malformed sample at index {index}: {reason}")]
    MalformedSample {
        /// Position of the offending sample in the input
        index: usize,
        /// Human-readable description
        reason: String,
    },
}
