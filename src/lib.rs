//! # company-lookup
//!
//! A library for resolving free-form company names against a reference list.
//!
//! Company names arrive in many spellings: with or without legal suffixes
//! ("GmbH", "AG", "Inc."), with umlauts or without, with "&" or "und", as one word
//! or two. `company-lookup` normalizes both sides, scores every candidate with an
//! auditable two-signal similarity and classifies the best match.
//!
//! ## Features
//!
//! - **Exact matching**: Verbatim names short-circuit to an exact match
//! - **Normalization**: Case, diacritics, punctuation and legal suffixes are folded away
//! - **Fuzzy scoring**: Token Jaccard blended with normalized edit distance
//! - **Deterministic ranking**: Ties are broken by name length, raw name, list order
//! - **Confidence classification**: `Matched`, `Ambiguous` or `NoMatch`
//! - **Duplicate detection**: Records sharing a normalized name are reported, never merged
//!
//! ## Example
//!
//! ```rust
//! use company_lookup::{CompanyRecord, CompanyStatus, Decision, LookupEngine, LookupRequest, MatchKind};
//!
//! let records = vec![
//!     CompanyRecord::new("Müller & Schmidt AG", CompanyStatus::Active),
//!     CompanyRecord::new("Beispiel GmbH", CompanyStatus::Inactive),
//! ];
//! let engine = LookupEngine::with_defaults(records).unwrap();
//!
//! let result = engine.lookup(&LookupRequest::new("Mueller und Schmidt")).unwrap();
//! println!("{} -> {:?}", result.decision, result.best_match.map(|m| m.score));
//!
//! let result = engine.lookup(&LookupRequest::new("beispiel")).unwrap();
//! assert_eq!(result.decision, Decision::Matched);
//! assert!(result.is_inactive());
//! assert_eq!(result.best_match.unwrap().match_kind, MatchKind::NormalizedExact);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Company list storage, indexing and statistics
//! - [`core`]: Core data types for records, statuses and decisions
//! - [`matching`]: Normalizer, scorer, fuzzy matcher and lookup engine
//! - [`parsing`]: TSV/CSV company list parser
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::stats::{compute_stats, CompanyListStats};
pub use catalog::store::CompanyList;
pub use core::record::CompanyRecord;
pub use core::types::*;
pub use matching::config::{ConfigError, LookupConfig};
pub use matching::engine::{BatchSummary, LookupEngine, LookupRequest, LookupResult};
pub use matching::fuzzy::{FuzzyMatcher, MatchCandidate};
pub use matching::normalize::normalize;
pub use matching::scoring::score;
pub use utils::validation::ValidationError;
