//! JSONL populator for seeding.

use crate::error::JsonlPopulatorError;
use crate::sink::{JsonArraySink, JsonlSink};
use seed_generator::{
    generate_with_progress, GenerationContext, GenerationSummary, DEFAULT_BATCH_SIZE,
    DEFAULT_PROGRESS_INTERVAL,
};
use std::path::Path;
use tracing::info;

/// Metrics from writing a seed file.
#[derive(Debug, Clone, Default)]
pub struct FilePopulateMetrics {
    pub summary: GenerationSummary,
    /// Output file size in bytes after the run.
    pub file_size_bytes: u64,
}

impl FilePopulateMetrics {
    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        let secs = self.summary.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.file_size_bytes as f64 / secs
        } else {
            0.0
        }
    }
}

/// Populator writing generated records to files or stdout.
#[derive(Debug, Clone)]
pub struct JsonlPopulator {
    batch_size: usize,
    progress_interval: u64,
}

impl Default for JsonlPopulator {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl JsonlPopulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    /// Generate `count` records into a JSONL file.
    ///
    /// With `append` the file is extended, otherwise it is truncated first.
    pub async fn populate_file<P: AsRef<Path>>(
        &self,
        output_path: P,
        append: bool,
        context: &mut GenerationContext,
        count: u64,
    ) -> Result<FilePopulateMetrics, JsonlPopulatorError> {
        let output_path = output_path.as_ref();
        info!(
            "Generating JSONL file '{}' with {} records{}",
            output_path.display(),
            count,
            if append { " (append)" } else { "" }
        );

        let mut sink = if append {
            JsonlSink::append(output_path)?
        } else {
            JsonlSink::create(output_path)?
        };

        let summary = generate_with_progress(
            context,
            count,
            self.batch_size,
            self.progress_interval,
            &mut sink,
        )
        .await?;
        drop(sink);

        let metrics = FilePopulateMetrics {
            summary,
            file_size_bytes: std::fs::metadata(output_path)?.len(),
        };

        info!(
            "JSONL generation complete: {} records, {} bytes in {:?}",
            metrics.summary.records_generated, metrics.file_size_bytes, metrics.summary.elapsed
        );

        Ok(metrics)
    }

    /// Print `count` records to stdout, as a JSON array or as JSON Lines.
    pub async fn print_to_console(
        &self,
        context: &mut GenerationContext,
        count: u64,
        lines: bool,
    ) -> Result<GenerationSummary, JsonlPopulatorError> {
        let summary = if lines {
            let mut sink = JsonlSink::stdout();
            generate_with_progress(
                context,
                count,
                self.batch_size,
                self.progress_interval,
                &mut sink,
            )
            .await?
        } else {
            let mut sink = JsonArraySink::stdout();
            generate_with_progress(
                context,
                count,
                self.batch_size,
                self.progress_interval,
                &mut sink,
            )
            .await?
        };
        Ok(summary)
    }
}
