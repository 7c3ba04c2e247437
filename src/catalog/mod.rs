//! Company list storage, indexing and statistics.
//!
//! A company list is the reference set that lookups run against. Each entry carries
//! a raw name, a status and optional metadata. Lists are built once and never
//! mutated; a changed list means a new engine.
//!
//! - [`index::CompanyIndex`]: raw-name and normalized-name indexes over a record slice
//! - [`stats::compute_stats`]: status and duplicate counts
//! - [`store::CompanyList`]: JSON list format
//!
//! ## Duplicates
//!
//! Records whose names normalize to the same text ("Acme GmbH", "ACME Gmbh") are
//! duplicates. They are counted and reported but never merged, since they may carry
//! different statuses.
//!
//! ## Example
//!
//! ```rust,no_run
//! use company_lookup::catalog::store::CompanyList;
//! use std::path::Path;
//!
//! let list = CompanyList::load_from_file(Path::new("companies.json")).unwrap();
//! println!("{}", list.to_json().unwrap());
//! ```

pub mod index;
pub mod stats;
pub mod store;
