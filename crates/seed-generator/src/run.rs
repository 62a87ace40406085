//! The generate-batch-flush loop.

use crate::error::{ConfigurationError, GenerateError};
use crate::generator::GenerationContext;
use crate::record::SyntheticRecord;
use crate::sink::RecordSink;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Batch size used by the seeding scripts.
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Log a progress line every this many records.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Summary of a finished generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationSummary {
    /// Number of records generated and flushed.
    pub records_generated: u64,
    /// Number of `insert_batch` calls made.
    pub batches_flushed: u64,
    /// Total wall-clock time.
    pub elapsed: Duration,
    /// Time spent generating records.
    pub generation_duration: Duration,
    /// Time spent inside the sink.
    pub flush_duration: Duration,
}

impl GenerationSummary {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.records_generated as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Generate `count` records and flush them to `sink` in batches of `batch_size`.
///
/// The trailing partial batch is always flushed, so the sink receives
/// `ceil(count / batch_size)` batches. Progress is logged every
/// [`DEFAULT_PROGRESS_INTERVAL`] records.
pub async fn generate<R, S>(
    context: &mut GenerationContext<R>,
    count: u64,
    batch_size: usize,
    sink: &mut S,
) -> Result<GenerationSummary, GenerateError>
where
    R: Rng,
    S: RecordSink + ?Sized,
{
    generate_with_progress(context, count, batch_size, DEFAULT_PROGRESS_INTERVAL, sink).await
}

/// Like [`generate`] with a custom progress interval. `0` disables progress lines.
pub async fn generate_with_progress<R, S>(
    context: &mut GenerationContext<R>,
    count: u64,
    batch_size: usize,
    progress_interval: u64,
    sink: &mut S,
) -> Result<GenerationSummary, GenerateError>
where
    R: Rng,
    S: RecordSink + ?Sized,
{
    if batch_size < 1 {
        return Err(ConfigurationError::InvalidBatchSize(batch_size).into());
    }

    let start_time = Instant::now();
    let mut summary = GenerationSummary::default();

    info!(
        "Generating {} records starting at index {} (batch size: {})",
        count,
        context.current_index(),
        batch_size
    );

    let capacity = usize::try_from(count).map_or(batch_size, |count| count.min(batch_size));
    let mut batch: Vec<SyntheticRecord> = Vec::with_capacity(capacity);

    for _ in 0..count {
        let gen_start = Instant::now();
        batch.push(context.next_record());
        summary.generation_duration += gen_start.elapsed();

        if batch.len() == batch_size {
            flush(sink, &mut batch, progress_interval, &mut summary).await?;
        }
    }

    if !batch.is_empty() {
        flush(sink, &mut batch, progress_interval, &mut summary).await?;
    }

    sink.finish().await.map_err(GenerateError::Finish)?;

    summary.elapsed = start_time.elapsed();

    info!(
        "Inserted {} documents in {:.3}s ({} batches, {:.2} docs/sec)",
        summary.records_generated,
        summary.elapsed.as_secs_f64(),
        summary.batches_flushed,
        summary.records_per_second()
    );

    Ok(summary)
}

async fn flush<S: RecordSink + ?Sized>(
    sink: &mut S,
    batch: &mut Vec<SyntheticRecord>,
    progress_interval: u64,
    summary: &mut GenerationSummary,
) -> Result<(), GenerateError> {
    let batch_number = summary.batches_flushed + 1;
    let flush_start = Instant::now();

    sink.insert_batch(batch.as_slice())
        .await
        .map_err(|source| GenerateError::Sink {
            batch: batch_number,
            source,
        })?;

    summary.flush_duration += flush_start.elapsed();
    summary.batches_flushed = batch_number;

    let before = summary.records_generated;
    summary.records_generated += batch.len() as u64;
    if crossed_progress_mark(before, summary.records_generated, progress_interval) {
        info!("Inserted {} documents.", summary.records_generated);
    }

    debug!("Batch {} complete: {} records", batch_number, batch.len());
    batch.clear();
    Ok(())
}

/// True when a flush moved the written count past a multiple of `interval`.
fn crossed_progress_mark(before: u64, after: u64, interval: u64) -> bool {
    interval > 0 && after / interval > before / interval
}
