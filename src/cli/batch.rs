use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{build_engine, percent, ListArgs, OutputFormat, ThresholdArgs};
use crate::matching::engine::{BatchSummary, LookupRequest, LookupResult};
use crate::utils::validation::ValidationError;

#[derive(Args)]
pub struct BatchArgs {
    /// File with one company name per line. Use '-' for stdin
    #[arg(required = true)]
    pub queries: PathBuf,

    #[command(flatten)]
    pub list: ListArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Execute batch subcommand
///
/// # Errors
///
/// Returns an error if the list or the queries cannot be read, or the config is
/// invalid. Individual rejected queries are reported, not treated as failures.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: BatchArgs,
    format: OutputFormat,
    config_path: Option<&Path>,
    verbose: bool,
) -> anyhow::Result<()> {
    let engine = build_engine(&args.list, config_path, &args.thresholds, verbose)?;
    let requests = read_queries(&args.queries)?;

    if verbose {
        eprintln!("Looking up {} queries", requests.len());
    }

    let results = engine.lookup_batch(&requests);
    let summary = BatchSummary::from_results(&results);

    match format {
        OutputFormat::Text => print_text_results(&requests, &results, &summary),
        OutputFormat::Json => print_json_results(&requests, &results, &summary)?,
        OutputFormat::Tsv => print_tsv_results(&requests, &results),
    }

    Ok(())
}

/// Read one query per line, skipping blank lines and `#` comments
fn read_queries(path: &Path) -> anyhow::Result<Vec<LookupRequest>> {
    let text = if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(LookupRequest::new)
        .collect())
}

fn print_text_results(
    requests: &[LookupRequest],
    results: &[Result<LookupResult, ValidationError>],
    summary: &BatchSummary,
) {
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(r) => match &r.best_match {
                Some(best) => println!(
                    "{:<10} {} -> {} [{}] {}",
                    r.decision.to_string(),
                    request.query,
                    best.record.raw_name(),
                    best.record.status(),
                    percent(best.score)
                ),
                None => println!("{:<10} {}", r.decision.to_string(), request.query),
            },
            Err(e) => println!("{:<10} {} ({e})", "INVALID", request.query),
        }
    }

    println!(
        "\n{} queries: {} matched, {} ambiguous, {} no match, {} invalid",
        summary.total, summary.matched, summary.ambiguous, summary.no_match, summary.invalid
    );
}

fn print_json_results(
    requests: &[LookupRequest],
    results: &[Result<LookupResult, ValidationError>],
    summary: &BatchSummary,
) -> anyhow::Result<()> {
    let entries: Vec<serde_json::Value> = requests
        .iter()
        .zip(results)
        .map(|(request, result)| match result {
            Ok(r) => serde_json::to_value(r),
            Err(e) => Ok(serde_json::json!({
                "request": request,
                "error": e.to_string(),
            })),
        })
        .collect::<Result<_, _>>()?;

    let output = serde_json::json!({
        "results": entries,
        "summary": summary,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(requests: &[LookupRequest], results: &[Result<LookupResult, ValidationError>]) {
    println!("query\tdecision\tbest_match\tstatus\tscore\tmatch_kind\twarnings");
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(r) => {
                let (name, score, kind) = r.best_match.as_ref().map_or_else(
                    || (String::new(), String::new(), String::new()),
                    |b| {
                        (
                            b.record.raw_name().to_string(),
                            format!("{:.4}", b.score),
                            b.match_kind.to_string(),
                        )
                    },
                );
                let warnings: Vec<String> = r.warnings.iter().map(ToString::to_string).collect();
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    request.query,
                    r.decision,
                    name,
                    r.status,
                    score,
                    kind,
                    warnings.join(",")
                );
            }
            Err(e) => println!("{}\tINVALID\t\t\t\t\t{e}", request.query),
        }
    }
}
