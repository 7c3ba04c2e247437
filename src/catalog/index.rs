use serde::Serialize;
use std::collections::HashMap;

use crate::core::record::CompanyRecord;

/// Records sharing one normalized name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub normalized_name: String,
    /// Raw names of every member, in list order
    pub raw_names: Vec<String>,
}

/// Lookup indexes over a record list
///
/// Both indexes map to positions in the record slice they were built from, in list
/// order. Duplicates are kept side by side, never merged.
#[derive(Debug, Default)]
pub struct CompanyIndex {
    /// Index: raw name (byte-exact) -> record positions
    by_raw: HashMap<String, Vec<usize>>,

    /// Index: normalized name -> record positions
    by_normalized: HashMap<String, Vec<usize>>,
}

impl CompanyIndex {
    pub fn build(records: &[CompanyRecord]) -> Self {
        let mut index = Self::default();
        for (position, record) in records.iter().enumerate() {
            index
                .by_raw
                .entry(record.raw_name().to_string())
                .or_default()
                .push(position);
            index
                .by_normalized
                .entry(record.normalized_name().to_string())
                .or_default()
                .push(position);
        }
        index
    }

    /// Positions of records whose raw name equals `raw` exactly
    pub fn find_raw(&self, raw: &str) -> &[usize] {
        self.by_raw.get(raw).map(Vec::as_slice).unwrap_or_default()
    }

    /// Positions of records whose normalized name equals `normalized`
    pub fn find_normalized(&self, normalized: &str) -> &[usize] {
        self.by_normalized
            .get(normalized)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of normalized names shared by more than one record
    pub fn duplicate_count(&self) -> usize {
        self.by_normalized.values().filter(|v| v.len() > 1).count()
    }

    /// Every duplicate group, sorted by normalized name
    pub fn duplicate_groups(&self, records: &[CompanyRecord]) -> Vec<DuplicateGroup> {
        let mut groups: Vec<DuplicateGroup> = self
            .by_normalized
            .iter()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(name, positions)| DuplicateGroup {
                normalized_name: name.clone(),
                raw_names: positions
                    .iter()
                    .filter_map(|&p| records.get(p))
                    .map(|r| r.raw_name().to_string())
                    .collect(),
            })
            .collect();
        groups.sort_by(|a, b| a.normalized_name.cmp(&b.normalized_name));
        groups
    }
}
