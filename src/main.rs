//! Command-line interface for materials-seed
//!
//! # Usage Examples
//!
//! ## Seeding
//! ```bash
//! # MongoDB, reproducible
//! materials-seed seed mongodb \
//!   --mongodb-connection-string mongodb://localhost:27017 \
//!   --mongodb-database materials --collection materials \
//!   --count 1000000 --batch-size 5000 --seed 42 --drop
//!
//! # JSONL file with a custom field config
//! materials-seed seed jsonl --config field_config.yaml \
//!   --output-file materials.jsonl --count 1000
//!
//! # JSON array on stdout
//! materials-seed seed console --count 10
//! ```
//!
//! ## Backfill
//! ```bash
//! # Check counts only
//! materials-seed backfill mongodb \
//!   --mongodb-connection-string mongodb://localhost:27017 --dry-run
//!
//! # Apply a custom plan
//! materials-seed backfill mongodb \
//!   --mongodb-connection-string mongodb://localhost:27017 --plan taxon.yaml
//! ```

use clap::{Parser, Subcommand};
use field_backfill::BackfillArgs;
use seed_populate_jsonl::{ConsoleSeedArgs, JsonlSeedArgs};
use seed_populate_mongodb::MongoDBSeedArgs;

#[derive(Parser)]
#[command(name = "materials-seed")]
#[command(about = "Seed the materials collection with synthetic records and run field backfills")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic materials and write them to a sink
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },

    /// Set a field on existing materials after checking the match counts
    Backfill {
        #[command(subcommand)]
        target: BackfillTarget,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Bulk-insert into a MongoDB collection
    #[command(name = "mongodb")]
    MongoDB {
        #[command(flatten)]
        args: MongoDBSeedArgs,
    },

    /// Write a JSON Lines file
    Jsonl {
        #[command(flatten)]
        args: JsonlSeedArgs,
    },

    /// Print to stdout
    Console {
        #[command(flatten)]
        args: ConsoleSeedArgs,
    },
}

#[derive(Subcommand)]
enum BackfillTarget {
    /// Backfill a MongoDB collection
    #[command(name = "mongodb")]
    MongoDB {
        #[command(flatten)]
        args: BackfillArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing. Logs go to stderr so console output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { target } => {
            let summary = match target {
                SeedTarget::MongoDB { args } => materials_seed::seed_mongodb(&args).await?,
                SeedTarget::Jsonl { args } => materials_seed::seed_jsonl(&args).await?,
                SeedTarget::Console { args } => materials_seed::seed_console(&args).await?,
            };
            tracing::info!(
                "Seeding finished: {} records in {:.3}s",
                summary.records_generated,
                summary.elapsed.as_secs_f64()
            );
        }
        Commands::Backfill { target } => match target {
            BackfillTarget::MongoDB { args } => {
                let report = materials_seed::backfill_mongodb(&args).await?;
                for rule in &report.rules {
                    tracing::info!(
                        "{}: expected {}, matched {}, modified {}",
                        rule.name,
                        rule.expected,
                        rule.matched,
                        rule.modified
                    );
                }
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_jsonl() {
        let cli = Cli::try_parse_from([
            "materials-seed",
            "seed",
            "jsonl",
            "--output-file",
            "out.jsonl",
            "--count",
            "25",
            "--batch-size",
            "10",
            "--seed",
            "42",
        ])
        .unwrap();

        match cli.command {
            Commands::Seed {
                target: SeedTarget::Jsonl { args },
            } => {
                assert_eq!(args.output_file.to_str(), Some("out.jsonl"));
                assert_eq!(args.common.count, 25);
                assert_eq!(args.common.batch_size, 10);
                assert_eq!(args.common.seed, Some(42));
            }
            _ => panic!("Expected seed jsonl"),
        }
    }

    #[test]
    fn test_parse_backfill_defaults() {
        let cli = Cli::try_parse_from([
            "materials-seed",
            "backfill",
            "mongodb",
            "--mongodb-connection-string",
            "mongodb://localhost:27017",
        ])
        .unwrap();

        match cli.command {
            Commands::Backfill {
                target: BackfillTarget::MongoDB { args },
            } => {
                assert_eq!(args.collection, "materials");
                assert!(args.plan.is_none());
                assert!(!args.dry_run);
                assert!(!args.no_transaction);
            }
            _ => panic!("Expected backfill mongodb"),
        }
    }
}
