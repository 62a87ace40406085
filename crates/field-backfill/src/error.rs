//! Error types for the backfill operation.

use thiserror::Error;

/// Errors that can occur while planning or running a backfill.
#[derive(Error, Debug)]
pub enum BackfillError {
    /// Per-rule match counts do not add up to the collection size.
    /// Raised before any update is applied.
    #[error(
        "Precondition failed: {total} documents in collection but rules match {matched} in total"
    )]
    Precondition { total: u64, matched: u64 },

    /// The plan itself is unusable.
    #[error("Invalid backfill plan: {0}")]
    InvalidPlan(String),

    /// A rule pattern does not compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] ::mongodb::error::Error),

    /// Error reading a plan file
    #[error("Failed to read backfill plan: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse backfill plan YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
