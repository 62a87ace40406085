//! Batched INSERT logic for MongoDB population.

use crate::error::MongoDBPopulatorError;
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use mongodb::Collection;
use seed_generator::{RecordSink, SinkError, SyntheticRecord};
use tracing::debug;

/// Sink that bulk-inserts each batch into a collection.
pub struct MongoDBSink {
    collection: Collection<Document>,
    inserted: u64,
}

impl MongoDBSink {
    pub fn new(collection: Collection<Document>) -> Self {
        Self {
            collection,
            inserted: 0,
        }
    }

    /// Documents inserted so far by this sink.
    pub fn inserted(&self) -> u64 {
        self.inserted
    }
}

#[async_trait]
impl RecordSink for MongoDBSink {
    async fn insert_batch(&mut self, records: &[SyntheticRecord]) -> Result<(), SinkError> {
        let inserted = insert_batch(&self.collection, records)
            .await
            .map_err(SinkError::backend)?;
        if inserted != records.len() as u64 {
            return Err(SinkError::Rejected(format!(
                "expected {} inserted documents, server acknowledged {}",
                records.len(),
                inserted
            )));
        }
        self.inserted += inserted;
        debug!(
            "Inserted {} documents into {} ({} total)",
            inserted,
            self.collection.name(),
            self.inserted
        );
        Ok(())
    }
}

/// Insert a batch of records into a MongoDB collection.
pub async fn insert_batch(
    collection: &Collection<Document>,
    records: &[SyntheticRecord],
) -> Result<u64, MongoDBPopulatorError> {
    if records.is_empty() {
        return Ok(0);
    }

    let documents: Vec<Document> = records.iter().map(record_to_document).collect();
    let result = collection.insert_many(documents).await?;

    Ok(result.inserted_ids.len() as u64)
}

/// Convert a record to the BSON document stored in the materials collection.
///
/// `_id` is the hyphenated UUID string and `date_of_receipt` a BSON date.
pub fn record_to_document(record: &SyntheticRecord) -> Document {
    let mut doc = doc! {
        "_id": record.id.to_string(),
        "material_type": { "_id": record.category_ref.as_str() },
        "supplier_name": record.supplier_name.as_str(),
        "donor_id": record.donor_id.as_str(),
        "gender": record.gender.as_str(),
        "common_name": record.common_name.as_str(),
    };

    if let Some(scientific_name) = &record.scientific_name {
        doc.insert("scientific_name", scientific_name.as_str());
    }

    doc.insert("phenotype", record.phenotype.as_str());
    doc.insert(
        "date_of_receipt",
        Bson::DateTime(bson::DateTime::from_chrono(record.date_of_receipt)),
    );

    let meta: Document = record
        .meta
        .iter()
        .map(|(key, value)| (key.clone(), Bson::String(value.clone())))
        .collect();
    doc.insert("meta", meta);

    doc
}

/// Drop a collection if it exists.
pub async fn drop_collection(
    collection: &Collection<Document>,
) -> Result<(), MongoDBPopulatorError> {
    collection.drop().await?;
    Ok(())
}

/// Get the document count for a collection.
pub async fn count_documents(
    collection: &Collection<Document>,
) -> Result<u64, MongoDBPopulatorError> {
    let count = collection.count_documents(doc! {}).await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use seed_generator::{FieldConfig, GenerationContext};

    #[test]
    fn test_record_to_document() {
        let mut context = GenerationContext::seeded(FieldConfig::default(), 42).unwrap();
        let record = context.next_record();

        let doc = record_to_document(&record);

        assert_eq!(doc.get_str("_id").unwrap(), record.id.to_string());
        assert_eq!(
            doc.get_document("material_type")
                .unwrap()
                .get_str("_id")
                .unwrap(),
            record.category_ref
        );
        assert_eq!(doc.get_str("supplier_name").unwrap(), "Supplier Name 0");
        assert_eq!(doc.get_str("donor_id").unwrap(), "Donor ID 0");
        assert_eq!(doc.get_str("common_name").unwrap(), "Common Name 0");
        assert_eq!(doc.get_str("phenotype").unwrap(), "Phenotype 0");
        assert_eq!(doc.get_str("gender").unwrap(), record.gender);
        assert_eq!(
            doc.get_document("meta").unwrap().get_str("anything").unwrap(),
            "i like 0"
        );
        assert!(!doc.contains_key("scientific_name"));
    }

    #[test]
    fn test_date_of_receipt_is_bson_date() {
        let mut context = GenerationContext::seeded(FieldConfig::default(), 42).unwrap();
        let mut record = context.next_record();
        record.date_of_receipt = Utc.with_ymd_and_hms(2014, 6, 1, 12, 30, 0).unwrap();

        let doc = record_to_document(&record);
        let date = doc.get_datetime("date_of_receipt").unwrap();

        assert_eq!(date.to_chrono(), record.date_of_receipt);
    }

    #[test]
    fn test_scientific_name_included_when_present() {
        let config = FieldConfig {
            scientific_names: vec!["Mus musculus".to_string()],
            ..FieldConfig::default()
        };
        let mut context = GenerationContext::seeded(config, 42).unwrap();

        let doc = record_to_document(&context.next_record());

        assert_eq!(doc.get_str("scientific_name").unwrap(), "Mus musculus");
    }

    #[test]
    fn test_field_order_matches_materials_layout() {
        let mut context = GenerationContext::seeded(FieldConfig::default(), 42).unwrap();
        let doc = record_to_document(&context.next_record());

        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "_id",
                "material_type",
                "supplier_name",
                "donor_id",
                "gender",
                "common_name",
                "phenotype",
                "date_of_receipt",
                "meta"
            ]
        );
    }
}
