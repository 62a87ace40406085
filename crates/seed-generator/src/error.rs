//! Error types for record generation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Invalid generation parameters, detected before any record is produced.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Batch size must be at least one.
    #[error("Batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    /// A set backing a random choice has no values.
    #[error("Choice set '{0}' must not be empty")]
    EmptyChoiceSet(&'static str),

    /// Date range is empty or inverted.
    #[error("Invalid date range: min {min} must be at least 1ms before max {max}")]
    InvalidDateRange {
        min: DateTime<Utc>,
        max: DateTime<Utc>,
    },

    /// Error reading a config file
    #[error("Failed to read field config: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse field config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A sink failed to accept a batch.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The sink refused the batch for a reason of its own.
    #[error("Batch rejected: {0}")]
    Rejected(String),

    /// Error from a storage backend (database driver, client library).
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl SinkError {
    /// Wrap a backend-specific error.
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(error))
    }
}

/// Error returned by [`crate::generate`].
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Flushing batch number `batch` (1-based) failed. Earlier batches stay in the sink.
    #[error("Sink error on batch {batch}: {source}")]
    Sink {
        batch: u64,
        #[source]
        source: SinkError,
    },

    /// The sink failed while finalising its output after the last batch.
    #[error("Sink error while finishing: {0}")]
    Finish(#[source] SinkError),
}
