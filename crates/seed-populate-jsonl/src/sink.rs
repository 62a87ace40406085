//! JSON sinks writing to any `std::io::Write`.

use async_trait::async_trait;
use seed_generator::{RecordSink, SinkError, SyntheticRecord};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Writes one JSON document per line.
pub struct JsonlSink<W: Write + Send> {
    writer: BufWriter<W>,
    records_written: u64,
}

impl JsonlSink<File> {
    /// Create (or truncate) `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }

    /// Open `path` for appending, creating it if missing.
    pub fn append<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl JsonlSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, writer),
            records_written: 0,
        }
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

#[async_trait]
impl<W: Write + Send> RecordSink for JsonlSink<W> {
    async fn insert_batch(&mut self, records: &[SyntheticRecord]) -> Result<(), SinkError> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer.write_all(b"\n")?;
        }
        self.records_written += records.len() as u64;
        Ok(())
    }

    async fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes every batch into a single JSON array, closed on [`RecordSink::finish`].
pub struct JsonArraySink<W: Write + Send> {
    writer: BufWriter<W>,
    records_written: u64,
    closed: bool,
}

impl JsonArraySink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonArraySink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, writer),
            records_written: 0,
            closed: false,
        }
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

#[async_trait]
impl<W: Write + Send> RecordSink for JsonArraySink<W> {
    async fn insert_batch(&mut self, records: &[SyntheticRecord]) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Rejected("JSON array already closed".to_string()));
        }
        for record in records {
            let separator: &[u8] = if self.records_written == 0 { b"[" } else { b"," };
            self.writer.write_all(separator)?;
            serde_json::to_writer(&mut self.writer, record)?;
            self.records_written += 1;
        }
        Ok(())
    }

    async fn finish(&mut self) -> Result<(), SinkError> {
        if !self.closed {
            let tail: &[u8] = if self.records_written == 0 { b"[]\n" } else { b"]\n" };
            self.writer.write_all(tail)?;
            self.closed = true;
        }
        self.writer.flush()?;
        Ok(())
    }
}
