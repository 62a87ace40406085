//! Error types for the JSONL populator.

use seed_generator::{ConfigurationError, GenerateError};
use thiserror::Error;

/// Errors that can occur while writing seed files.
#[derive(Error, Debug)]
pub enum JsonlPopulatorError {
    /// IO error opening or inspecting the output file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid generation parameters.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// The generate loop failed.
    #[error("Generation failed: {0}")]
    Generate(#[from] GenerateError),
}
