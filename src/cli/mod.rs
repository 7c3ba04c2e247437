//! Command-line interface for company-lookup.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **lookup**: Look up one company name against a list
//! - **batch**: Look up many names (one per line) and summarize the decisions
//! - **stats**: Show status counts and duplicate groups for a list
//! - **convert**: Convert a TSV/CSV list to the JSON list format
//!
//! ## Usage
//!
//! ```text
//! # Look up a single name
//! company-lookup lookup --list companies.tsv "Müller & Schmidt"
//!
//! # Stricter acceptance for one query
//! company-lookup lookup --list companies.tsv --threshold 0.99 "Nordbau"
//!
//! # Pipe names in, JSON out for scripting
//! cat names.txt | company-lookup --format json batch --list companies.csv -
//!
//! # Inspect duplicates
//! company-lookup stats --list companies.json --show-duplicates
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::catalog::store::CompanyList;
use crate::core::record::CompanyRecord;
use crate::matching::config::LookupConfig;
use crate::matching::engine::LookupEngine;
use crate::parsing::tsv::parse_company_file;

pub mod batch;
pub mod catalog;
pub mod lookup;

#[derive(Parser)]
#[command(name = "company-lookup")]
#[command(version)]
#[command(about = "Fuzzy company-name lookup against a reference list")]
#[command(
    long_about = "company-lookup resolves free-form company names against a reference list of companies with an active/inactive status.\n\nEach lookup reports:\n- An exact match when the name appears verbatim in the list\n- A ranked fuzzy match with a MATCHED / AMBIGUOUS / NO MATCH decision otherwise\n- Alternates for operator inspection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// JSON config file (thresholds, scoring weights, normalization rules)
    #[arg(short, long, global = true, env = "COMPANY_LOOKUP_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a single company name
    Lookup(lookup::LookupArgs),

    /// Look up many company names, one per line
    Batch(batch::BatchArgs),

    /// Show statistics for a company list
    Stats(catalog::StatsArgs),

    /// Convert a company list to JSON
    Convert(catalog::ConvertArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    Tsv,
    Csv,
    Json,
}

impl ListFormat {
    /// Detect the list format from the file extension, defaulting to TSV
    pub fn detect(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Tsv,
        }
    }
}

/// Company list location, shared by every command
#[derive(clap::Args)]
pub struct ListArgs {
    /// Company list file (TSV, CSV or JSON)
    #[arg(short, long, env = "COMPANY_LOOKUP_LIST")]
    pub list: PathBuf,

    /// List format (auto-detected from the extension by default)
    #[arg(long, value_enum)]
    pub list_format: Option<ListFormat>,
}

impl ListArgs {
    /// Load records from the list file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> anyhow::Result<Vec<CompanyRecord>> {
        let format = self
            .list_format
            .unwrap_or_else(|| ListFormat::detect(&self.list));
        let records = match format {
            ListFormat::Json => CompanyList::load_from_file(&self.list)?.into_records(),
            ListFormat::Csv => parse_company_file(&self.list, b',')?,
            ListFormat::Tsv => parse_company_file(&self.list, b'\t')?,
        };
        Ok(records)
    }
}

/// Threshold overrides applied on top of the config file
#[derive(clap::Args, Default)]
pub struct ThresholdArgs {
    /// Score required for a MATCHED decision (default 0.95)
    #[arg(long, env = "COMPANY_LOOKUP_EXACT_THRESHOLD")]
    pub exact_threshold: Option<f64>,

    /// Score required for an AMBIGUOUS decision (default 0.80)
    #[arg(long, env = "COMPANY_LOOKUP_AMBIGUOUS_THRESHOLD")]
    pub ambiguous_threshold: Option<f64>,

    /// Maximum number of alternates per result (default 5)
    #[arg(long, env = "COMPANY_LOOKUP_MAX_ALTERNATES")]
    pub max_alternates: Option<usize>,
}

impl ThresholdArgs {
    fn apply(&self, config: &mut LookupConfig) {
        if let Some(t) = self.exact_threshold {
            config.exact_threshold = t;
        }
        if let Some(t) = self.ambiguous_threshold {
            config.ambiguous_threshold = t;
        }
        if let Some(n) = self.max_alternates {
            config.max_alternates = n;
        }
    }
}

/// Load the config file (if any) and apply command-line overrides
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn load_config(
    config_path: Option<&Path>,
    overrides: &ThresholdArgs,
) -> anyhow::Result<LookupConfig> {
    let mut config = match config_path {
        Some(path) => LookupConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LookupConfig::default(),
    };
    overrides.apply(&mut config);
    Ok(config)
}

/// Load a list and build an engine over it
///
/// # Errors
///
/// Returns an error if the list or config cannot be loaded, or the config is invalid.
pub fn build_engine(
    list: &ListArgs,
    config_path: Option<&Path>,
    overrides: &ThresholdArgs,
    verbose: bool,
) -> anyhow::Result<LookupEngine> {
    let config = load_config(config_path, overrides)?;
    let records = list
        .load()
        .with_context(|| format!("Failed to load company list {}", list.list.display()))?;

    if verbose {
        eprintln!(
            "Loaded {} companies from {}",
            records.len(),
            list.list.display()
        );
    }

    let engine = LookupEngine::new(records, config)?;
    if engine.is_empty() {
        eprintln!("Warning: Company list is empty, nothing to match against.");
    }
    Ok(engine)
}

/// Format a score in [0, 1] as a percentage
fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}
