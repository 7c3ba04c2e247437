//! Parsers for company list files.
//!
//! - **TSV/CSV files**: one company per line, `name<delim>status[<delim>extra...]`
//!
//! JSON company lists are handled by [`crate::catalog::store::CompanyList`].
//!
//! ## Example
//!
//! ```rust
//! use company_lookup::parsing::tsv::parse_company_text;
//! use company_lookup::CompanyStatus;
//!
//! let text = "name\tstatus\nBeispiel GmbH\tactive\n";
//! let records = parse_company_text(text, b'\t').unwrap();
//! assert_eq!(records[0].status(), CompanyStatus::Active);
//! ```
//!
//! ## Status Values
//!
//! | Text | Status |
//! |------|--------|
//! | active, whitelisted, approved, allowed | Active |
//! | inactive, blacklisted, blocked, denied | Inactive |
//! | unknown, empty, anything else | Unknown |

pub mod tsv;

pub use tsv::ParseError;
