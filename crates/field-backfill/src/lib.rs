//! Bulk field backfill with a count precondition.
//!
//! A [`BackfillPlan`] is an ordered list of rules, each saying "documents
//! whose `filter_field` matches `pattern` get `target_field` set to `value`".
//! [`run_backfill`] first checks that the rules partition the collection (the
//! per-rule match counts add up to the document count) and refuses to touch
//! anything otherwise. It then applies each rule as one update and reports
//! matched and modified counts.
//!
//! ```text
//!  count_all ─┐
//!             ├─► Σ matches == total ? ──no──► PreconditionError (no writes)
//!  count_matching(rule) × N ─┘      │
//!                                   yes
//!                                   ▼
//!                      apply(rule) × N ──► BackfillReport
//! ```
//!
//! Targets implement [`BackfillTarget`]; [`MongoDBTarget`] runs against a
//! live collection and [`MemoryCollection`] against in-process documents.

pub mod args;
pub mod error;
pub mod memory;
pub mod mongo;
pub mod plan;
pub mod run;
pub mod target;

pub use args::BackfillArgs;
pub use error::BackfillError;
pub use memory::MemoryCollection;
pub use mongo::MongoDBTarget;
pub use plan::{BackfillPlan, BackfillRule};
pub use run::{run_backfill, BackfillReport, RuleReport};
pub use target::{BackfillTarget, UpdateOutcome};
