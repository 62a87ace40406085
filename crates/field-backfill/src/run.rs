//! Running a backfill plan against a target.

use crate::error::BackfillError;
use crate::plan::BackfillPlan;
use crate::target::BackfillTarget;
use tracing::{info, warn};

/// Per-rule outcome of a backfill run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub name: String,
    /// Count from the precondition check.
    pub expected: u64,
    /// Documents the update selected. Zero for dry runs.
    pub matched: u64,
    /// Documents the update changed. Zero for dry runs.
    pub modified: u64,
}

/// Outcome of a backfill run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillReport {
    /// Documents in the collection when the precondition was checked.
    pub total: u64,
    pub rules: Vec<RuleReport>,
    /// True when the precondition passed but no update was applied.
    pub dry_run: bool,
}

impl BackfillReport {
    pub fn total_modified(&self) -> u64 {
        self.rules.iter().map(|rule| rule.modified).sum()
    }
}

/// Check the precondition, then apply every rule in order.
///
/// Fails with [`BackfillError::Precondition`] before any update when the
/// per-rule match counts do not sum to the collection size. A failure while
/// applying rule `k` leaves rules `0..k` applied.
pub async fn run_backfill<T>(
    target: &mut T,
    plan: &BackfillPlan,
    dry_run: bool,
) -> Result<BackfillReport, BackfillError>
where
    T: BackfillTarget + ?Sized,
{
    plan.validate()?;

    let total = target.count_all().await?;
    let mut rules = Vec::with_capacity(plan.rules.len());
    for rule in &plan.rules {
        let expected = target.count_matching(rule).await?;
        info!("Rule '{}' matches {} documents", rule.name, expected);
        rules.push(RuleReport {
            name: rule.name.clone(),
            expected,
            matched: 0,
            modified: 0,
        });
    }

    let matched: u64 = rules.iter().map(|rule| rule.expected).sum();
    if matched != total {
        return Err(BackfillError::Precondition { total, matched });
    }
    info!(
        "Precondition satisfied: {} documents covered by {} rules",
        total,
        plan.rules.len()
    );

    if dry_run {
        warn!("Dry run: no updates applied");
        return Ok(BackfillReport {
            total,
            rules,
            dry_run: true,
        });
    }

    for (rule, report) in plan.rules.iter().zip(rules.iter_mut()) {
        let outcome = target.apply(rule).await?;
        report.matched = outcome.matched;
        report.modified = outcome.modified;

        info!("{} records matched", outcome.matched);
        info!("{} records updated", outcome.modified);
    }

    Ok(BackfillReport {
        total,
        rules,
        dry_run: false,
    })
}
