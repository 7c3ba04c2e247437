use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::record::CompanyRecord;
use crate::utils::validation::MAX_RECORDS;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read company list: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse company list: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords(usize),
}

/// Company list format version for compatibility checking
pub const COMPANY_LIST_VERSION: &str = "1.0.0";

/// Serializable company list
///
/// Normalized names are written out for readability but derived again on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyList {
    pub version: String,
    #[serde(default)]
    pub created_at: String,
    pub companies: Vec<CompanyRecord>,
}

impl CompanyList {
    /// Wrap records in a new list stamped with the current time
    pub fn new(companies: Vec<CompanyRecord>) -> Self {
        Self {
            version: COMPANY_LIST_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            companies,
        }
    }

    /// Load a company list from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a company list from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` on malformed JSON and
    /// `CatalogError::TooManyRecords` above the record limit.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let list: Self = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if list.version != COMPANY_LIST_VERSION {
            warn!(
                "Company list version mismatch (expected {}, found {})",
                COMPANY_LIST_VERSION, list.version
            );
        }

        if list.companies.len() > MAX_RECORDS {
            return Err(CatalogError::TooManyRecords(list.companies.len()));
        }

        Ok(list)
    }

    /// Export the list to pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn into_records(self) -> Vec<CompanyRecord> {
        self.companies
    }
}
