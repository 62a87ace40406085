//! In-process backfill target.

use crate::error::BackfillError;
use crate::plan::BackfillRule;
use crate::target::{BackfillTarget, UpdateOutcome};
use async_trait::async_trait;
use bson::{Bson, Document};
use regex::Regex;

/// Documents held in memory, updated with the same semantics as `update_many`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCollection {
    documents: Vec<Document>,
}

impl MemoryCollection {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn matching_indices(&self, field: &str, matcher: &Regex) -> Vec<usize> {
        self.documents
            .iter()
            .enumerate()
            .filter(|(_, doc)| {
                doc.get_str(field)
                    .map(|value| matcher.is_match(value))
                    .unwrap_or(false)
            })
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[async_trait]
impl BackfillTarget for MemoryCollection {
    async fn count_all(&mut self) -> Result<u64, BackfillError> {
        Ok(self.documents.len() as u64)
    }

    async fn count_matching(&mut self, rule: &BackfillRule) -> Result<u64, BackfillError> {
        let matcher = rule.matcher()?;
        Ok(self.matching_indices(&rule.filter_field, &matcher).len() as u64)
    }

    async fn apply(&mut self, rule: &BackfillRule) -> Result<UpdateOutcome, BackfillError> {
        // Select the whole set before touching anything.
        let matcher = rule.matcher()?;
        let matched = self.matching_indices(&rule.filter_field, &matcher);
        let value = Bson::String(rule.value.clone());

        let mut modified = 0;
        for idx in &matched {
            let doc = &mut self.documents[*idx];
            if doc.get(&rule.target_field) != Some(&value) {
                doc.insert(rule.target_field.clone(), value.clone());
                modified += 1;
            }
        }

        Ok(UpdateOutcome {
            matched: matched.len() as u64,
            modified,
        })
    }
}
