use std::path::Path;

use clap::Args;

use crate::cli::{build_engine, percent, ListArgs, OutputFormat, ThresholdArgs};
use crate::core::types::Decision;
use crate::matching::engine::{LookupRequest, LookupResult};
use crate::matching::fuzzy::MatchCandidate;

#[derive(Args)]
pub struct LookupArgs {
    /// Company name to look up (matched verbatim first, then fuzzily)
    #[arg(required = true)]
    pub query: String,

    #[command(flatten)]
    pub list: ListArgs,

    /// Score required for a MATCHED decision, for this query only
    #[arg(short, long)]
    pub threshold: Option<f64>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Execute lookup subcommand
///
/// # Errors
///
/// Returns an error if the list cannot be loaded, the config is invalid or the
/// query is rejected.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: LookupArgs,
    format: OutputFormat,
    config_path: Option<&Path>,
    verbose: bool,
) -> anyhow::Result<()> {
    let engine = build_engine(&args.list, config_path, &args.thresholds, verbose)?;

    let mut request = LookupRequest::new(args.query.as_str());
    if let Some(t) = args.threshold {
        request = request.with_threshold(t);
    }
    let result = engine.lookup(&request)?;

    match format {
        OutputFormat::Text => print_text_result(&result, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Tsv => print_tsv_result(&result),
    }

    Ok(())
}

fn print_text_result(result: &LookupResult, verbose: bool) {
    println!("Query: {}", result.request.query);

    println!("Decision: {}", result.decision);
    println!("Status: {}", result.status);
    if !result.warnings.is_empty() {
        let warnings: Vec<String> = result.warnings.iter().map(ToString::to_string).collect();
        println!("Warnings: {}", warnings.join(", "));
    }

    if let Some(best) = &result.best_match {
        println!("\nBest match:");
        print_candidate_line(None, best, verbose);
    }

    if result.decision == Decision::Ambiguous {
        println!("\n   Not confirmed: review the candidates before relying on this match.");
    }

    if !result.alternates.is_empty() {
        let heading = if result.best_match.is_some() {
            "Alternates"
        } else {
            "Closest candidates"
        };
        println!("\n{heading}:");
        for (i, candidate) in result.alternates.iter().enumerate() {
            print_candidate_line(Some(i + 1), candidate, verbose);
        }
    }
}

fn print_candidate_line(rank: Option<usize>, candidate: &MatchCandidate, verbose: bool) {
    let prefix = rank.map_or_else(|| "   ".to_string(), |r| format!("{r:>2}."));
    println!(
        "{prefix} {} [{}] {} ({})",
        candidate.record.raw_name(),
        candidate.record.status(),
        percent(candidate.score),
        candidate.match_kind
    );
    if verbose {
        println!("      normalized: {}", candidate.record.normalized_name());
        for (key, value) in candidate.record.metadata() {
            println!("      {key}: {value}");
        }
    }
}

fn print_tsv_result(result: &LookupResult) {
    println!("rank\traw_name\tnormalized_name\tstatus\tscore\tmatch_kind\tdecision");
    let rows = result.best_match.iter().chain(&result.alternates);
    for (i, c) in rows.enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{:.4}\t{}\t{}",
            i + 1,
            c.record.raw_name(),
            c.record.normalized_name(),
            c.record.status(),
            c.score,
            c.match_kind,
            if i == 0 && result.best_match.is_some() {
                result.decision.to_string()
            } else {
                String::new()
            }
        );
    }
}
