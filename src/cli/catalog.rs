use std::path::{Path, PathBuf};

use clap::Args;

use crate::catalog::stats::compute_stats;
use crate::catalog::store::CompanyList;
use crate::cli::{build_engine, ListArgs, OutputFormat, ThresholdArgs};
use crate::core::types::CompanyStatus;

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// List every group of records sharing a normalized name
    #[arg(long)]
    pub show_duplicates: bool,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Output file path (JSON)
    #[arg(short, long, required = true)]
    pub output: PathBuf,
}

/// Execute stats subcommand
///
/// # Errors
///
/// Returns an error if the list cannot be loaded or the config is invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_stats(
    args: StatsArgs,
    format: OutputFormat,
    config_path: Option<&Path>,
    verbose: bool,
) -> anyhow::Result<()> {
    // The config still matters here: its normalizer decides what counts as a duplicate
    let engine = build_engine(&args.list, config_path, &ThresholdArgs::default(), verbose)?;
    let stats = engine.stats();
    let duplicates = if args.show_duplicates {
        engine.duplicate_groups()
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Text => {
            println!("Companies: {}", stats.total);
            for status in [
                CompanyStatus::Active,
                CompanyStatus::Inactive,
                CompanyStatus::Unknown,
            ] {
                println!("  {:<9} {}", format!("{status}:"), stats.count(status));
            }
            println!("Duplicate groups: {}", stats.duplicates);
            if !stats.categories.is_empty() {
                let categories: Vec<&str> = stats.categories.iter().map(String::as_str).collect();
                println!("Categories: {}", categories.join(", "));
            }

            for group in &duplicates {
                println!("\n  {}", group.normalized_name);
                for name in &group.raw_names {
                    println!("    - {name}");
                }
            }
        }
        OutputFormat::Json => {
            let mut output = serde_json::json!({ "stats": stats });
            if args.show_duplicates {
                output["duplicate_groups"] = serde_json::to_value(&duplicates)?;
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("total\tactive\tinactive\tunknown\tduplicates");
            println!(
                "{}\t{}\t{}\t{}\t{}",
                stats.total, stats.active, stats.inactive, stats.unknown, stats.duplicates
            );
            if args.show_duplicates {
                println!("\nnormalized_name\traw_names");
                for group in &duplicates {
                    println!("{}\t{}", group.normalized_name, group.raw_names.join("|"));
                }
            }
        }
    }

    Ok(())
}

/// Execute convert subcommand
///
/// # Errors
///
/// Returns an error if the list cannot be loaded or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_convert(args: ConvertArgs, verbose: bool) -> anyhow::Result<()> {
    let records = args.list.load()?;
    let stats = compute_stats(&records);
    let list = CompanyList::new(records);

    std::fs::write(&args.output, list.to_json()?)?;

    eprintln!(
        "Wrote {} companies to {}",
        list.len(),
        args.output.display()
    );
    if verbose && stats.duplicates > 0 {
        eprintln!("Note: {} duplicate normalized names", stats.duplicates);
    }

    Ok(())
}
