//! materials-seed library
//!
//! Seeds the materials collection with synthetic records and runs one-off
//! field backfills against it.
//!
//! # Crates
//!
//! - `seed_generator` - record synthesis and the generate-batch-flush loop
//! - `seed_populate` - CLI arguments shared by every populator
//! - `seed_populate_mongodb` - bulk inserts into MongoDB
//! - `seed_populate_jsonl` - JSON Lines files and console output
//! - `field_backfill` - precondition-checked bulk field updates
//!
//! # CLI Usage
//!
//! ```bash
//! # Insert one million materials in batches of 5000
//! materials-seed seed mongodb \
//!   --mongodb-connection-string mongodb://localhost:27017 \
//!   --count 1000000 --batch-size 5000 --seed 42
//!
//! # Write a JSONL fixture file
//! materials-seed seed jsonl --output-file materials.jsonl --count 1000
//!
//! # Print a JSON array to stdout
//! materials-seed seed console --count 10
//!
//! # Add taxon ids to existing materials
//! materials-seed backfill mongodb --mongodb-connection-string mongodb://localhost:27017
//! ```

use anyhow::Context;
use field_backfill::{run_backfill, BackfillArgs, BackfillPlan, BackfillReport, MongoDBTarget};
use seed_generator::{generate_with_progress, GenerationSummary, NullSink};
use seed_populate::CommonSeedArgs;
use seed_populate_jsonl::{ConsoleSeedArgs, JsonlPopulator, JsonlSeedArgs};
use seed_populate_mongodb::{MongoDBPopulator, MongoDBSeedArgs};

pub use field_backfill as backfill;
pub use seed_generator as generator;

/// Generate records into a [`NullSink`] to validate parameters and measure throughput.
pub async fn seed_dry_run(common: &CommonSeedArgs) -> anyhow::Result<GenerationSummary> {
    tracing::warn!("Dry run: records are generated but not written");
    let mut context = common
        .generation_context()
        .context("Invalid field configuration")?;
    let mut sink = NullSink::default();
    let summary = generate_with_progress(
        &mut context,
        common.count,
        common.batch_size,
        common.progress_interval,
        &mut sink,
    )
    .await?;
    Ok(summary)
}

/// Seed a MongoDB collection.
pub async fn seed_mongodb(args: &MongoDBSeedArgs) -> anyhow::Result<GenerationSummary> {
    let common = &args.common;
    if common.dry_run {
        return seed_dry_run(common).await;
    }

    let mut context = common
        .generation_context()
        .context("Invalid field configuration")?;

    tracing::info!(
        "Populating MongoDB collection '{}' with {} documents (seed={:?})",
        args.collection,
        common.count,
        common.seed
    );

    let populator =
        MongoDBPopulator::new(&args.mongodb_connection_string, &args.mongodb_database)
            .await
            .context("Failed to connect to MongoDB")?
            .with_batch_size(common.batch_size)
            .with_progress_interval(common.progress_interval);

    if args.drop {
        populator
            .drop_collection(&args.collection)
            .await
            .with_context(|| format!("Failed to drop collection '{}'", args.collection))?;
    }

    let summary = populator
        .populate(&args.collection, &mut context, common.count)
        .await
        .with_context(|| format!("Failed to populate collection '{}'", args.collection))?;

    let total = populator
        .document_count(&args.collection)
        .await
        .with_context(|| format!("Failed to count collection '{}'", args.collection))?;
    tracing::info!("Collection '{}' now holds {} documents", args.collection, total);

    Ok(summary)
}

/// Seed a JSON Lines file.
pub async fn seed_jsonl(args: &JsonlSeedArgs) -> anyhow::Result<GenerationSummary> {
    let common = &args.common;
    if common.dry_run {
        return seed_dry_run(common).await;
    }

    let mut context = common
        .generation_context()
        .context("Invalid field configuration")?;

    let metrics = JsonlPopulator::new()
        .with_batch_size(common.batch_size)
        .with_progress_interval(common.progress_interval)
        .populate_file(&args.output_file, args.append, &mut context, common.count)
        .await
        .with_context(|| format!("Failed to write {:?}", args.output_file))?;

    tracing::info!(
        "Wrote {} records ({} bytes) to {:?}",
        metrics.summary.records_generated,
        metrics.file_size_bytes,
        args.output_file
    );

    Ok(metrics.summary)
}

/// Print generated records to stdout.
pub async fn seed_console(args: &ConsoleSeedArgs) -> anyhow::Result<GenerationSummary> {
    let common = &args.common;
    if common.dry_run {
        return seed_dry_run(common).await;
    }

    let mut context = common
        .generation_context()
        .context("Invalid field configuration")?;

    let summary = JsonlPopulator::new()
        .with_batch_size(common.batch_size)
        .with_progress_interval(common.progress_interval)
        .print_to_console(&mut context, common.count, args.lines)
        .await
        .context("Failed to print records")?;

    Ok(summary)
}

/// Load the plan named by `--plan`, or the taxon id plan.
pub fn load_backfill_plan(args: &BackfillArgs) -> anyhow::Result<BackfillPlan> {
    match &args.plan {
        Some(path) => BackfillPlan::from_file(path)
            .with_context(|| format!("Failed to load backfill plan from {path:?}")),
        None => Ok(BackfillPlan::taxon_id()),
    }
}

/// Run a backfill plan against a MongoDB collection.
pub async fn backfill_mongodb(args: &BackfillArgs) -> anyhow::Result<BackfillReport> {
    let plan = load_backfill_plan(args)?;

    let mut target = MongoDBTarget::new(
        &args.mongodb_connection_string,
        &args.mongodb_database,
        &args.collection,
    )
    .await
    .context("Failed to connect to MongoDB")?
    .with_transactions(!args.no_transaction);

    let report = run_backfill(&mut target, &plan, args.dry_run)
        .await
        .with_context(|| format!("Backfill of collection '{}' failed", args.collection))?;

    tracing::info!(
        "Backfill complete: {} documents, {} modified",
        report.total,
        report.total_modified()
    );

    Ok(report)
}
