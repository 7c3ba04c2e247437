//! Company-name normalization, similarity scoring and the lookup engine.
//!
//! This module provides the core matching functionality:
//!
//! - [`LookupEngine`]: Main entry point; owns the record list and its indexes
//! - [`Normalizer`]: Canonical comparable form of a raw company name
//! - [`Scorer`]: Bounded, symmetric similarity between two normalized names
//! - [`FuzzyMatcher`]: Scores and ranks every record against a query
//!
//! ## Lookup Algorithm
//!
//! 1. **Exact check**: the raw query is looked up byte-for-byte in the raw-name index
//! 2. **Fuzzy search**: on a miss, the query is normalized and every record is scored
//! 3. **Classification**: the best candidate is compared against the exact and
//!    ambiguous thresholds, yielding `Matched`, `Ambiguous` or `NoMatch`
//!
//! ## Scoring
//!
//! The composite score is a weighted average of two signals:
//!
//! - **Token overlap**: Jaccard index of the whitespace-delimited token sets
//! - **Edit similarity**: `1 - levenshtein / max length`
//!
//! ## Example
//!
//! ```rust
//! use company_lookup::{CompanyRecord, CompanyStatus, Decision, LookupEngine, LookupRequest};
//!
//! let records = vec![
//!     CompanyRecord::new("Beispiel GmbH", CompanyStatus::Active),
//!     CompanyRecord::new("Nordbau AG", CompanyStatus::Inactive),
//! ];
//! let engine = LookupEngine::with_defaults(records).unwrap();
//!
//! let result = engine.lookup(&LookupRequest::new("beispiel")).unwrap();
//! assert_eq!(result.decision, Decision::Matched);
//! assert_eq!(result.status, CompanyStatus::Active);
//! ```

pub mod config;
pub mod engine;
pub mod fuzzy;
pub mod normalize;
pub mod scoring;

pub use config::{ConfigError, LookupConfig};
pub use engine::{BatchSummary, LookupEngine, LookupRequest, LookupResult};
pub use fuzzy::{FuzzyMatcher, MatchCandidate};
pub use normalize::{normalize, Normalizer, NormalizerConfig};
pub use scoring::{score, Scorer, ScoringConfig, SimilarityScore};
