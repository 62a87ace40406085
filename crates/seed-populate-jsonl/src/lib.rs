//! File and console populators.
//!
//! [`JsonlSink`] writes one JSON document per line, [`JsonArraySink`] writes
//! the whole run as a single JSON array (handy for piping into `mongoimport
//! --jsonArray` or eyeballing a small sample on stdout).

pub mod args;
pub mod error;
pub mod populator;
pub mod sink;

pub use args::{ConsoleSeedArgs, JsonlSeedArgs};
pub use error::JsonlPopulatorError;
pub use populator::{FilePopulateMetrics, JsonlPopulator};
pub use sink::{JsonArraySink, JsonlSink};
