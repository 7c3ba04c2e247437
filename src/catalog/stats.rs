use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::core::record::CompanyRecord;
use crate::core::types::CompanyStatus;

/// Aggregate counts over a company list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyListStats {
    /// Total number of records
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub unknown: usize,
    /// Number of normalized names shared by more than one record
    pub duplicates: usize,
    /// Distinct `category` metadata values, sorted
    pub categories: BTreeSet<String>,
}

impl CompanyListStats {
    /// Count for a single status
    #[must_use]
    pub fn count(&self, status: CompanyStatus) -> usize {
        match status {
            CompanyStatus::Active => self.active,
            CompanyStatus::Inactive => self.inactive,
            CompanyStatus::Unknown => self.unknown,
        }
    }
}

/// Aggregate status, duplicate and category counts over a record list.
///
/// Duplicates are detected on each record's cached normalized name; a group of N
/// records sharing a name counts once. Records built with [`CompanyRecord::new`],
/// deserialized, or taken from an engine always carry that name.
#[must_use]
pub fn compute_stats(records: &[CompanyRecord]) -> CompanyListStats {
    let mut stats = CompanyListStats {
        total: records.len(),
        ..CompanyListStats::default()
    };
    let mut name_counts: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match record.status() {
            CompanyStatus::Active => stats.active += 1,
            CompanyStatus::Inactive => stats.inactive += 1,
            CompanyStatus::Unknown => stats.unknown += 1,
        }
        *name_counts.entry(record.normalized_name()).or_default() += 1;
        if let Some(category) = record.category() {
            stats.categories.insert(category.to_string());
        }
    }

    stats.duplicates = name_counts.values().filter(|&&n| n > 1).count();
    stats
}
