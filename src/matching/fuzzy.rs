use serde::Serialize;
use std::cmp::Ordering;

use crate::core::record::CompanyRecord;
use crate::core::types::MatchKind;
use crate::matching::config::DEFAULT_CANDIDATE_FLOOR;
use crate::matching::scoring::Scorer;

/// A record matched against a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    /// The matched record
    pub record: CompanyRecord,

    /// Similarity in [0, 1]
    pub score: f64,

    /// How the record was matched
    pub match_kind: MatchKind,
}

/// A scored record, identified by its position in the record slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub position: usize,
    pub score: f64,
    pub match_kind: MatchKind,
}

impl RankedCandidate {
    /// Materialize against the record slice this candidate was ranked over
    pub fn to_candidate(&self, records: &[CompanyRecord]) -> Option<MatchCandidate> {
        records.get(self.position).map(|record| MatchCandidate {
            record: record.clone(),
            score: self.score,
            match_kind: self.match_kind,
        })
    }
}

/// Deterministic candidate order: score descending, then shorter normalized name,
/// then raw name (byte order), then list position.
pub(crate) fn rank_order(
    a: (f64, &CompanyRecord, usize),
    b: (f64, &CompanyRecord, usize),
) -> Ordering {
    let (a_score, a_record, a_position) = a;
    let (b_score, b_record, b_position) = b;

    b_score
        .total_cmp(&a_score)
        .then_with(|| {
            a_record
                .normalized_name()
                .chars()
                .count()
                .cmp(&b_record.normalized_name().chars().count())
        })
        .then_with(|| a_record.raw_name().cmp(b_record.raw_name()))
        .then_with(|| a_position.cmp(&b_position))
}

/// Scores every record against a normalized query and ranks the survivors
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    scorer: Scorer,
    /// Candidates scoring below this are discarded before ranking
    floor: f64,
}

impl FuzzyMatcher {
    pub fn new(scorer: Scorer, floor: f64) -> Self {
        Self { scorer, floor }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Rank records by similarity to `query_normalized`.
    ///
    /// Records scoring below the floor are dropped. An empty record slice yields an
    /// empty ranking.
    #[must_use]
    pub fn rank(&self, query_normalized: &str, records: &[CompanyRecord]) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = records
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let score = self.scorer.score(query_normalized, record.normalized_name());
                if score < self.floor {
                    return None;
                }
                let match_kind = if score >= 1.0 && record.normalized_name() == query_normalized
                {
                    MatchKind::NormalizedExact
                } else {
                    MatchKind::Fuzzy
                };
                Some(RankedCandidate {
                    position,
                    score,
                    match_kind,
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            rank_order(
                (a.score, &records[a.position], a.position),
                (b.score, &records[b.position], b.position),
            )
        });
        ranked
    }

    /// Rank records and return them as match candidates
    #[must_use]
    pub fn find(&self, query_normalized: &str, records: &[CompanyRecord]) -> Vec<MatchCandidate> {
        self.rank(query_normalized, records)
            .iter()
            .filter_map(|c| c.to_candidate(records))
            .collect()
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(Scorer::default(), DEFAULT_CANDIDATE_FLOOR)
    }
}
