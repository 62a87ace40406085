//! MongoDB backfill target.

use crate::error::BackfillError;
use crate::plan::BackfillRule;
use crate::target::{BackfillTarget, UpdateOutcome};
use async_trait::async_trait;
use bson::{doc, Bson, Document, Regex};
use mongodb::{Client, Collection};
use tracing::{debug, warn};

/// Backfill target backed by a MongoDB collection.
pub struct MongoDBTarget {
    client: Client,
    collection: Collection<Document>,
    transactional: bool,
}

impl MongoDBTarget {
    /// Connect and select the collection.
    pub async fn new(
        connection_string: &str,
        database_name: &str,
        collection_name: &str,
    ) -> Result<Self, BackfillError> {
        let client = Client::with_uri_str(connection_string).await?;
        let database = client.database(database_name);

        // Test connection
        database.list_collection_names().await?;

        let collection = database.collection(collection_name);
        Ok(Self::with_collection(client, collection))
    }

    /// Wrap an existing client and collection handle.
    ///
    /// Updates run in transactions unless [`with_transactions(false)`](Self::with_transactions)
    /// is set.
    pub fn with_collection(client: Client, collection: Collection<Document>) -> Self {
        Self {
            client,
            collection,
            transactional: true,
        }
    }

    /// Run every `update_many` inside its own transaction.
    ///
    /// Transactions need a replica set or sharded cluster. Turning them off
    /// lets standalone servers run the backfill, but a failed update may then
    /// leave part of the matched set changed.
    pub fn with_transactions(mut self, transactional: bool) -> Self {
        self.transactional = transactional;
        self
    }
}

/// `{ <filter_field>: /<pattern>/<options> }`
pub fn rule_filter(rule: &BackfillRule) -> Document {
    let mut filter = Document::new();
    filter.insert(
        rule.filter_field.clone(),
        Bson::RegularExpression(Regex {
            pattern: rule.pattern.clone(),
            options: rule.regex_options().to_string(),
        }),
    );
    filter
}

/// `{ $set: { <target_field>: <value> } }`
pub fn rule_update(rule: &BackfillRule) -> Document {
    let mut set = Document::new();
    set.insert(rule.target_field.clone(), rule.value.as_str());
    doc! { "$set": set }
}

#[async_trait]
impl BackfillTarget for MongoDBTarget {
    async fn count_all(&mut self) -> Result<u64, BackfillError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn count_matching(&mut self, rule: &BackfillRule) -> Result<u64, BackfillError> {
        Ok(self.collection.count_documents(rule_filter(rule)).await?)
    }

    async fn apply(&mut self, rule: &BackfillRule) -> Result<UpdateOutcome, BackfillError> {
        let filter = rule_filter(rule);
        let update = rule_update(rule);

        let result = if self.transactional {
            let mut session = self.client.start_session().await?;
            session.start_transaction().await?;
            match self
                .collection
                .update_many(filter, update)
                .session(&mut session)
                .await
            {
                Ok(result) => {
                    session.commit_transaction().await?;
                    result
                }
                Err(e) => {
                    if let Err(abort_error) = session.abort_transaction().await {
                        debug!("Abort after failed update also failed: {}", abort_error);
                    }
                    return Err(e.into());
                }
            }
        } else {
            warn!(
                "Applying rule '{}' without a transaction: a failure can leave it partially applied",
                rule.name
            );
            self.collection.update_many(filter, update).await?
        };

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }
}
