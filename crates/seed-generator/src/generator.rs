//! Generation context producing synthetic records one at a time.

use crate::config::FieldConfig;
use crate::error::ConfigurationError;
use crate::generators::choice::choose_uniform;
use crate::generators::pattern::{labelled, phenotype_bucket};
use crate::generators::timestamp::generate_timestamp_in;
use crate::generators::uuid::generate_uuid_v4;
use crate::record::SyntheticRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// State of one generation run: the validated field config, the random
/// source and the index counter.
///
/// A context is created at run start and dropped after the run. Two contexts
/// never share state, so concurrent runs need no coordination.
pub struct GenerationContext<R: Rng = StdRng> {
    /// Validated at construction; private so the choice sets stay non-empty.
    config: FieldConfig,
    rng: R,
    index: u64,
}

impl GenerationContext<StdRng> {
    /// Create a context whose output is fully determined by `seed`.
    pub fn seeded(config: FieldConfig, seed: u64) -> Result<Self, ConfigurationError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Create a context seeded from OS entropy.
    pub fn from_entropy(config: FieldConfig) -> Result<Self, ConfigurationError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GenerationContext<R> {
    /// Create a context around an arbitrary RNG.
    pub fn with_rng(config: FieldConfig, rng: R) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            index: 0,
        })
    }

    /// Set the index the next record is numbered with.
    ///
    /// Used to append to a collection seeded by an earlier run without
    /// repeating supplier names, donor ids or phenotype buckets.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// Index the next record will get.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Synthesise the next record and advance the index by one.
    pub fn next_record(&mut self) -> SyntheticRecord {
        let index = self.index;
        let labels = &self.config.labels;

        let id = generate_uuid_v4(&mut self.rng);
        let category_ref = choose_uniform(&mut self.rng, &self.config.categories)
            .unwrap_or_default()
            .to_string();
        let gender = choose_uniform(&mut self.rng, &self.config.genders)
            .unwrap_or_default()
            .to_string();
        let scientific_name =
            choose_uniform(&mut self.rng, &self.config.scientific_names).map(str::to_string);
        let date_of_receipt = generate_timestamp_in(&mut self.rng, &self.config.date_range);

        let mut meta = BTreeMap::new();
        meta.insert(
            labels.meta_key.clone(),
            labelled(&labels.meta_marker, index),
        );

        self.index += 1;

        SyntheticRecord {
            index,
            id,
            category_ref,
            supplier_name: labelled(&labels.supplier_name, index),
            donor_id: labelled(&labels.donor_id, index),
            gender,
            common_name: labelled(&labels.common_name, index),
            scientific_name,
            phenotype: labelled(&labels.phenotype, phenotype_bucket(index)),
            date_of_receipt,
            meta,
        }
    }

    /// Lazily generate `count` records.
    pub fn records(&mut self, count: u64) -> RecordIterator<'_, R> {
        RecordIterator {
            context: self,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates records from a [`GenerationContext`].
pub struct RecordIterator<'a, R: Rng> {
    context: &'a mut GenerationContext<R>,
    remaining: u64,
}

impl<R: Rng> Iterator for RecordIterator<'_, R> {
    type Item = SyntheticRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.context.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
