//! Error types for the MongoDB populator.

use seed_generator::{ConfigurationError, GenerateError};
use thiserror::Error;

/// Errors that can occur during MongoDB population.
#[derive(Error, Debug)]
pub enum MongoDBPopulatorError {
    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// Invalid generation parameters.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// The generate loop failed.
    #[error("Generation failed: {0}")]
    Generate(#[from] GenerateError),
}
