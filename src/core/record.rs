use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::CompanyStatus;
use crate::matching::normalize::{default_normalizer, Normalizer};

/// Metadata key holding a company's category
pub const CATEGORY_KEY: &str = "category";

/// A company entry from the reference list
///
/// The normalized name is derived from the raw name and cached. Records built with
/// [`CompanyRecord::new`] or deserialized are normalized with the default rules; a
/// [`LookupEngine`](crate::LookupEngine) re-derives it with its own configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordData")]
pub struct CompanyRecord {
    /// Name exactly as supplied by the data source
    raw_name: String,

    /// Canonical comparable form, never read from input
    normalized_name: String,

    /// Business status of the company
    status: CompanyStatus,

    /// Opaque passthrough fields (notes, category, ...)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

/// Serialized form of a record; the normalized name is always re-derived
#[derive(Deserialize)]
struct RecordData {
    raw_name: String,
    #[serde(default)]
    status: CompanyStatus,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

impl From<RecordData> for CompanyRecord {
    fn from(data: RecordData) -> Self {
        let mut record = Self::new(data.raw_name, data.status);
        record.metadata = data.metadata;
        record
    }
}

impl CompanyRecord {
    pub fn new(raw_name: impl Into<String>, status: CompanyStatus) -> Self {
        let raw_name = raw_name.into();
        let normalized_name = default_normalizer().normalize(&raw_name);
        Self {
            raw_name,
            normalized_name,
            status,
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    pub fn status(&self) -> CompanyStatus {
        self.status
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Non-empty `category` metadata value; the key is matched case-insensitively
    pub fn category(&self) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(CATEGORY_KEY))
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Re-derive the cached normalized name when an engine uses non-default
    /// normalization rules.
    pub(crate) fn renormalize(&mut self, normalizer: &Normalizer) {
        self.normalized_name = normalizer.normalize(&self.raw_name);
    }
}
