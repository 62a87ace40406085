//! End-to-end runs of the library entry points without a database.

use bson::Document;
use clap::Parser;
use field_backfill::{run_backfill, BackfillArgs, BackfillPlan, MemoryCollection};
use materials_seed::{load_backfill_plan, seed_dry_run, seed_jsonl};
use seed_generator::{generate, ConfigurationError, GenerationContext, MemorySink};
use seed_populate::CommonSeedArgs;
use seed_populate_jsonl::JsonlSeedArgs;
use seed_populate_mongodb::record_to_document;
use std::io::{BufRead, BufReader};

const FIELD_CONFIG: &str = "tests/fixtures/field_config.yaml";
const TAXON_PLAN: &str = "tests/fixtures/taxon_backfill.yaml";

#[derive(Parser)]
struct JsonlCli {
    #[command(flatten)]
    args: JsonlSeedArgs,
}

#[derive(Parser)]
struct CommonCli {
    #[command(flatten)]
    common: CommonSeedArgs,
}

#[derive(Parser)]
struct BackfillCli {
    #[command(flatten)]
    args: BackfillArgs,
}

#[tokio::test]
async fn test_seed_jsonl_with_fixture_config() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("materials.jsonl");
    let cli = JsonlCli::parse_from([
        "seed",
        "--output-file",
        output.to_str().unwrap(),
        "--config",
        FIELD_CONFIG,
        "--count",
        "250",
        "--batch-size",
        "100",
        "--seed",
        "42",
    ]);

    let summary = seed_jsonl(&cli.args).await.unwrap();

    assert_eq!(summary.records_generated, 250);
    assert_eq!(summary.batches_flushed, 3);

    let file = std::fs::File::open(&output).unwrap();
    let docs: Vec<serde_json::Value> = BufReader::new(file)
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();
    assert_eq!(docs.len(), 250);
    assert_eq!(docs[249]["phenotype"], "Phenotype 200");
    for doc in &docs {
        let species = doc["scientific_name"].as_str().unwrap();
        assert!(species == "Homo sapiens" || species == "Mus musculus");
    }
}

/// Seed a JSONL file with a config that must be rejected; no output may appear.
async fn rejected_seed_jsonl(config_yaml: &str) -> anyhow::Error {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = temp_dir.path().join("field_config.yaml");
    std::fs::write(&config, config_yaml).unwrap();
    let output = temp_dir.path().join("materials.jsonl");
    let cli = JsonlCli::parse_from([
        "seed",
        "--output-file",
        output.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--count",
        "10",
    ]);

    let error = seed_jsonl(&cli.args).await.unwrap_err();
    assert!(!output.exists());
    error
}

#[tokio::test]
async fn test_empty_categories_write_nothing() {
    let error = rejected_seed_jsonl("categories: []\ngenders: [male]\n").await;

    assert!(matches!(
        error.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::EmptyChoiceSet("categories"))
    ));
}

#[tokio::test]
async fn test_inverted_date_range_writes_nothing() {
    let error = rejected_seed_jsonl(
        "categories: [cat-1]\ngenders: [male]\ndate_range:\n  min: 2017-01-01\n  max: 2010-01-01\n",
    )
    .await;

    assert!(matches!(
        error.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::InvalidDateRange { .. })
    ));
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let cli = CommonCli::parse_from(["seed", "--count", "1234", "--batch-size", "500", "--dry-run"]);

    let summary = seed_dry_run(&cli.common).await.unwrap();

    assert_eq!(summary.records_generated, 1234);
    assert_eq!(summary.batches_flushed, 3);
}

#[tokio::test]
async fn test_zero_batch_size_is_reported() {
    let cli = CommonCli::parse_from(["seed", "--count", "10", "--batch-size", "0"]);

    let error = seed_dry_run(&cli.common).await.unwrap_err();

    assert!(format!("{error:#}").contains("Batch size must be at least 1"));
}

#[test]
fn test_backfill_plan_loading() {
    let default_cli = BackfillCli::parse_from([
        "backfill",
        "--mongodb-connection-string",
        "mongodb://localhost:27017",
    ]);
    assert_eq!(
        load_backfill_plan(&default_cli.args).unwrap(),
        BackfillPlan::taxon_id()
    );

    let file_cli = BackfillCli::parse_from([
        "backfill",
        "--mongodb-connection-string",
        "mongodb://localhost:27017",
        "--plan",
        TAXON_PLAN,
    ]);
    assert_eq!(
        load_backfill_plan(&file_cli.args).unwrap(),
        BackfillPlan::taxon_id()
    );
}

/// Seed documents with species, then backfill taxon ids over them.
#[tokio::test]
async fn test_seeded_materials_can_be_backfilled() {
    let config = seed_generator::FieldConfig::from_file(FIELD_CONFIG).unwrap();
    let mut context = GenerationContext::seeded(config, 7).unwrap();
    let mut sink = MemorySink::default();
    generate(&mut context, 300, 64, &mut sink).await.unwrap();

    let documents: Vec<Document> = sink.records().map(record_to_document).collect();
    let mut collection = MemoryCollection::new(documents);

    let report = run_backfill(&mut collection, &BackfillPlan::taxon_id(), false)
        .await
        .unwrap();

    assert_eq!(report.total, 300);
    assert_eq!(report.total_modified(), 300);
    for doc in collection.documents() {
        let expected = match doc.get_str("scientific_name").unwrap() {
            "Mus musculus" => "10090",
            _ => "9606",
        };
        assert_eq!(doc.get_str("taxon_id").unwrap(), expected);
    }
}
