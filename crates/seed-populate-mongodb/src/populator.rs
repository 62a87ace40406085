//! MongoDB populator for seeding.

use crate::error::MongoDBPopulatorError;
use crate::insert::{count_documents, drop_collection, MongoDBSink};
use bson::Document;
use mongodb::{Client, Collection, Database};
use seed_generator::{
    generate_with_progress, GenerationContext, GenerationSummary, DEFAULT_BATCH_SIZE,
    DEFAULT_PROGRESS_INTERVAL,
};
use tracing::info;

/// MongoDB populator that generates and inserts synthetic materials.
pub struct MongoDBPopulator {
    database: Database,
    batch_size: usize,
    progress_interval: u64,
}

impl MongoDBPopulator {
    /// Create a new MongoDB populator.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - MongoDB connection string (e.g., "mongodb://localhost:27017")
    /// * `database_name` - Name of the database to use
    ///
    /// # Example
    ///
    /// ```ignore
    /// let populator = MongoDBPopulator::new("mongodb://localhost:27017", "materials").await?;
    /// ```
    pub async fn new(
        connection_string: &str,
        database_name: &str,
    ) -> Result<Self, MongoDBPopulatorError> {
        let client = Client::with_uri_str(connection_string).await?;
        let database = client.database(database_name);

        // Test connection
        database.list_collection_names().await?;

        Ok(Self::with_database(database))
    }

    /// Create a new MongoDB populator with an existing database handle.
    pub fn with_database(database: Database) -> Self {
        Self {
            database,
            batch_size: DEFAULT_BATCH_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Set the number of documents per `insert_many`.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set how often progress is logged. `0` disables it.
    pub fn with_progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    fn get_collection(&self, collection_name: &str) -> Collection<Document> {
        self.database.collection(collection_name)
    }

    /// Drop the collection if it exists.
    pub async fn drop_collection(
        &self,
        collection_name: &str,
    ) -> Result<(), MongoDBPopulatorError> {
        info!("Dropping collection: {}", collection_name);
        drop_collection(&self.get_collection(collection_name)).await
    }

    /// Populate a collection with `count` generated documents.
    ///
    /// Batches already inserted when an error occurs stay in the collection.
    pub async fn populate(
        &self,
        collection_name: &str,
        context: &mut GenerationContext,
        count: u64,
    ) -> Result<GenerationSummary, MongoDBPopulatorError> {
        info!(
            "Populating collection '{}' with {} documents (batch size: {})",
            collection_name, count, self.batch_size
        );

        let mut sink = MongoDBSink::new(self.get_collection(collection_name));
        let summary = generate_with_progress(
            context,
            count,
            self.batch_size,
            self.progress_interval,
            &mut sink,
        )
        .await?;

        info!(
            "Population complete: {} documents in {:?} ({:.2} docs/sec)",
            sink.inserted(),
            summary.elapsed,
            summary.records_per_second()
        );

        Ok(summary)
    }

    /// Get the document count for a collection.
    pub async fn document_count(
        &self,
        collection_name: &str,
    ) -> Result<u64, MongoDBPopulatorError> {
        count_documents(&self.get_collection(collection_name)).await
    }
}
