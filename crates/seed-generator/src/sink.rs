//! Destination abstraction for generated batches.

use crate::error::SinkError;
use crate::record::SyntheticRecord;
use async_trait::async_trait;

/// Accepts batches of generated records.
///
/// Whether a batch is printed, appended to a file or bulk-inserted into a
/// database is up to the implementation. [`crate::generate`] awaits each
/// call before producing the next record.
#[async_trait]
pub trait RecordSink: Send {
    /// Write one batch. An error aborts the run; batches already written stay written.
    async fn insert_batch(&mut self, records: &[SyntheticRecord]) -> Result<(), SinkError>;

    /// Called once after the last batch, also when no batch was written.
    async fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that keeps every batch in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub batches: Vec<Vec<SyntheticRecord>>,
    pub finished: bool,
}

impl MemorySink {
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.iter().map(Vec::len).collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &SyntheticRecord> {
        self.batches.iter().flatten()
    }

    pub fn record_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn insert_batch(&mut self, records: &[SyntheticRecord]) -> Result<(), SinkError> {
        self.batches.push(records.to_vec());
        Ok(())
    }

    async fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}

/// Sink that discards records, counting them. Used for dry runs.
#[derive(Debug, Default)]
pub struct NullSink {
    pub records_discarded: u64,
}

#[async_trait]
impl RecordSink for NullSink {
    async fn insert_batch(&mut self, records: &[SyntheticRecord]) -> Result<(), SinkError> {
        self.records_discarded += records.len() as u64;
        Ok(())
    }
}
