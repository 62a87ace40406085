//! MongoDB populator for the materials collection.
//!
//! Provides [`MongoDBSink`], a [`seed_generator::RecordSink`] that bulk-inserts
//! each batch with `insert_many`, and [`MongoDBPopulator`] which wires a
//! connection, a collection and the generate loop together.

pub mod args;
pub mod error;
pub mod insert;
pub mod populator;

pub use args::MongoDBSeedArgs;
pub use error::MongoDBPopulatorError;
pub use insert::{record_to_document, MongoDBSink};
pub use populator::MongoDBPopulator;
