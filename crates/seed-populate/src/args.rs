//! Common CLI argument definitions shared by all populators.

use clap::Args;
use seed_generator::{
    ConfigurationError, FieldConfig, GenerationContext, DEFAULT_BATCH_SIZE,
    DEFAULT_PROGRESS_INTERVAL,
};
use std::path::PathBuf;
use tracing::info;

/// Common arguments shared by all populators.
#[derive(Args, Clone, Debug)]
pub struct CommonSeedArgs {
    /// Path to a field config YAML file (defaults to the built-in materials config)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of records to generate
    #[arg(long, short = 'n', default_value = "1000")]
    pub count: u64,

    /// Number of records per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Random seed for deterministic generation (omit for a random seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Index of the first generated record (for appending to earlier runs)
    #[arg(long, default_value = "0")]
    pub start_index: u64,

    /// Use the six-value gender set instead of the config's genders
    #[arg(long)]
    pub extended_genders: bool,

    /// Log a progress line every N records (0 disables)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,

    /// Dry-run mode: generate records without writing them anywhere
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonSeedArgs {
    /// Load the field config named by `--config`, or the default one.
    pub fn field_config(&self) -> Result<FieldConfig, ConfigurationError> {
        let config = match &self.config {
            Some(path) => {
                info!("Loading field config from {}", path.display());
                FieldConfig::from_file(path)?
            }
            None => FieldConfig::default(),
        };
        if self.extended_genders {
            Ok(config.with_extended_genders())
        } else {
            Ok(config)
        }
    }

    /// Build the generation context for one run.
    pub fn generation_context(&self) -> Result<GenerationContext, ConfigurationError> {
        let config = self.field_config()?;
        let context = match self.seed {
            Some(seed) => GenerationContext::seeded(config, seed)?,
            None => GenerationContext::from_entropy(config)?,
        };
        Ok(context.with_start_index(self.start_index))
    }
}
