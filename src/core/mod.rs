//! Core data types for company lookup.
//!
//! - [`CompanyRecord`]: A reference-list entry with its cached normalized name
//! - [`CompanyStatus`]: Closed set of business statuses (`Active`, `Inactive`, `Unknown`)
//! - [`MatchKind`], [`Decision`]: Result classification types
//!
//! Records are immutable once built; any extra columns from the data source travel
//! along untouched in the metadata map.

pub mod record;
pub mod types;

pub use record::CompanyRecord;
pub use types::{CompanyStatus, Decision, MatchKind};
