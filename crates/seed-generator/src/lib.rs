//! Synthetic record generator for seeding the materials collection.
//!
//! This crate provides the [`GenerationContext`] which produces synthetic
//! material records from a [`FieldConfig`], and the [`generate`] loop which
//! buffers those records into fixed-size batches and flushes each batch to a
//! [`RecordSink`]. The context owns a seeded RNG so a given seed and config
//! reproduce the same records across runs.
//!
//! # Architecture
//!
//! ```text
//!   FieldConfig (YAML or defaults)
//!          │
//!          ▼
//! ┌────────────────────┐
//! │ GenerationContext  │
//! │                    │
//! │  - config          │
//! │  - rng (StdRng)    │
//! │  - index           │
//! └─────────┬──────────┘
//!           │ next_record()
//!           ▼
//!   batch buffer (≤ batch_size)
//!           │ insert_batch()
//!           ▼
//!      RecordSink  ──►  GenerationSummary
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_generator::{generate, FieldConfig, GenerationContext, MemorySink};
//!
//! # tokio_test::block_on(async {
//! let mut context = GenerationContext::seeded(FieldConfig::default(), 42).unwrap();
//! let mut sink = MemorySink::default();
//!
//! let summary = generate(&mut context, 250, 100, &mut sink).await.unwrap();
//!
//! assert_eq!(summary.records_generated, 250);
//! assert_eq!(sink.batch_sizes(), vec![100, 100, 50]);
//! # });
//! ```
//!
//! # Field rules
//!
//! - `id` - random UUID v4 drawn from the context RNG
//! - `category_ref`, `gender`, `scientific_name` - uniform choice from the configured set
//! - `supplier_name`, `donor_id`, `common_name` - `"<label> <index>"`
//! - `phenotype` - `"<label> <bucket>"` with `bucket = floor(index / 100) * 100`
//! - `date_of_receipt` - uniform timestamp in `[min, max)`
//! - `meta` - generation marker `"<marker> <index>"`

pub mod config;
pub mod error;
pub mod generator;
pub mod generators;
pub mod record;
pub mod run;
pub mod sink;

// Re-exports for convenience
pub use config::{DateRange, FieldConfig, FieldLabels};
pub use error::{ConfigurationError, GenerateError, SinkError};
pub use generator::{GenerationContext, RecordIterator};
pub use record::SyntheticRecord;
pub use run::{
    generate, generate_with_progress, GenerationSummary, DEFAULT_BATCH_SIZE,
    DEFAULT_PROGRESS_INTERVAL,
};
pub use sink::{MemorySink, NullSink, RecordSink};
