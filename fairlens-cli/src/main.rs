//! FairLens CLI — loads a loan-approval dataset, runs the fairness
//! metrics engine, and prints the results.
//!
//! This binary is the presentation-layer collaborator of
//! `fairlens-core`: it owns I/O, argument parsing, and logging setup;
//! the core stays pure.

use anyhow::Context;
use clap::Parser;
use fairlens_core::config::FairlensConfig;
use fairlens_core::data::source::{CsvSource, HttpCsvSource, RowSource};
use fairlens_core::data::{ProtectedAttribute, ingest};
use fairlens_core::metrics::bias::reference_metrics;
use fairlens_core::metrics::importance::reference_features;
use fairlens_core::mitigation::{simulate, strategy_by_id, strategy_catalog};
use fairlens_core::report::FairnessReport;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// FairLens: fairness and bias analysis for loan-approval datasets
#[derive(Parser, Debug)]
#[command(name = "fairlens", version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (JSON) overriding the default weights
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compute the fairness report for a dataset
    Report {
        /// Path or http(s) URL of a CSV dataset
        dataset: String,

        /// Protected attributes to analyze (default: all)
        #[arg(short, long, value_delimiter = ',')]
        attribute: Vec<ProtectedAttributeArg>,

        /// Emit the full report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Run a mitigation strategy and compare disparity before/after
    Simulate {
        /// Path or http(s) URL of a CSV dataset
        dataset: String,

        /// Strategy id (see `fairlens strategies`)
        #[arg(short, long)]
        strategy: String,

        /// Protected attribute to mitigate against
        #[arg(short, long, default_value = "gender")]
        attribute: ProtectedAttributeArg,
    },
    /// List the known mitigation strategies
    Strategies,
}

/// clap-friendly wrapper so `--attribute race` parses directly.
#[derive(Debug, Clone, Copy)]
struct ProtectedAttributeArg(ProtectedAttribute);

impl std::str::FromStr for ProtectedAttributeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(ProtectedAttributeArg)
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<FairlensConfig> {
    match path {
        Some(path) => Ok(FairlensConfig::load(path)?),
        None => Ok(FairlensConfig::default()),
    }
}

/// Load and ingest a dataset, logging dropped rows.
async fn load_records(
    dataset: &str,
    config: &FairlensConfig,
) -> anyhow::Result<Vec<fairlens_core::ApplicantRecord>> {
    let source: Box<dyn RowSource> = if dataset.starts_with("http://") || dataset.starts_with("https://")
    {
        Box::new(HttpCsvSource::new(dataset))
    } else {
        Box::new(CsvSource::new(dataset))
    };

    let batch = source
        .load(None)
        .await
        .with_context(|| format!("loading dataset {dataset}"))?;
    let report = ingest(&batch, config);

    for error in &report.errors {
        tracing::warn!(
            row = error.row,
            field = error.field.as_deref().unwrap_or("-"),
            "{}",
            error.reason
        );
    }
    if report.records.is_empty() {
        anyhow::bail!(
            "no usable records in {dataset} ({} rows rejected)",
            report.errors.len()
        );
    }
    Ok(report.records)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Report {
            dataset,
            attribute,
            json,
        } => {
            let records = load_records(&dataset, &config).await?;
            let attributes: Vec<ProtectedAttribute> = if attribute.is_empty() {
                ProtectedAttribute::ALL.to_vec()
            } else {
                attribute.iter().map(|a| a.0).collect()
            };
            let report = FairnessReport::build(
                &records,
                &attributes,
                &reference_metrics(),
                &reference_features(),
                &config,
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report, &config);
            }
        }
        Commands::Simulate {
            dataset,
            strategy,
            attribute,
        } => {
            let strategy = strategy_by_id(&strategy)
                .with_context(|| format!("unknown or non-executable strategy: {strategy}"))?;
            let records = load_records(&dataset, &config).await?;
            let result = simulate(strategy.as_ref(), &records, attribute.0);
            println!(
                "{} on {}: disparity {:.4} -> {:.4} ({:.1}% reduction)",
                result.strategy,
                result.attribute.as_str(),
                result.original_disparity,
                result.mitigated_disparity,
                result.reduction * 100.0
            );
        }
        Commands::Strategies => {
            for descriptor in strategy_catalog() {
                let marker = if descriptor.executable { "*" } else { " " };
                println!("{marker} {:<22} {}", descriptor.id, descriptor.name);
            }
            println!("\n* = runnable with `fairlens simulate --strategy <id>`");
        }
    }

    Ok(())
}

fn print_summary(report: &FairnessReport, config: &FairlensConfig) {
    println!(
        "records: {}   overall approval rate: {:.1}%",
        report.total_records,
        report.overall_approval_rate * 100.0
    );

    for metric in &report.disparities {
        println!("\nby {}:", metric.attribute.as_str());
        for bucket in &metric.categories {
            println!(
                "  {:<12} {:>5} applicants  {:>5.1}% approved",
                bucket.category,
                bucket.total,
                bucket.approval_rate * 100.0
            );
        }
        if metric.insufficient_data {
            println!("  disparity: n/a (insufficient data)");
        } else {
            println!("  disparity: {:.4}", metric.disparity);
        }
    }

    println!("\nbias metrics:");
    for classified in &report.bias_metrics {
        println!(
            "  {:<38} {:.2} / {:.2}  {:?}",
            classified.metric.name,
            classified.metric.value,
            classified.metric.threshold,
            classified.status
        );
    }

    let concerning = report.concerning_attributes(config);
    if !concerning.is_empty() {
        let names: Vec<&str> = concerning.iter().map(|a| a.as_str()).collect();
        println!("\nattributes above disparity threshold: {}", names.join(", "));
    }
}
