//! Collections a backfill can run against.

use crate::error::BackfillError;
use crate::plan::BackfillRule;
use async_trait::async_trait;

/// Result of applying one rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents the rule's filter selected.
    pub matched: u64,
    /// Documents whose target field actually changed.
    pub modified: u64,
}

/// A collection that can count and update documents by rule.
#[async_trait]
pub trait BackfillTarget: Send {
    /// Number of documents in the collection.
    async fn count_all(&mut self) -> Result<u64, BackfillError>;

    /// Number of documents `rule` selects.
    async fn count_matching(&mut self, rule: &BackfillRule) -> Result<u64, BackfillError>;

    /// Set the rule's target field on every selected document.
    ///
    /// Implementations apply the update all-or-nothing for the matched set
    /// unless they are explicitly configured otherwise, as
    /// [`MongoDBTarget`](crate::MongoDBTarget) is without transactions.
    async fn apply(&mut self, rule: &BackfillRule) -> Result<UpdateOutcome, BackfillError>;
}
