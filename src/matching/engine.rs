use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::index::{CompanyIndex, DuplicateGroup};
use crate::catalog::stats::{compute_stats, CompanyListStats};
use crate::core::record::CompanyRecord;
use crate::core::types::{CompanyStatus, Decision, LookupWarning, MatchKind};
use crate::matching::config::{ConfigError, LookupConfig};
use crate::matching::fuzzy::{rank_order, FuzzyMatcher, MatchCandidate, RankedCandidate};
use crate::matching::normalize::Normalizer;
use crate::matching::scoring::Scorer;
use crate::utils::validation::{validate_query, validate_threshold, ValidationError};

/// Batches at least this large are looked up in parallel
const PARALLEL_THRESHOLD: usize = 100;

/// Runner-up within this score gap of the best match raises `CloseRunnerUp`
const CLOSE_RUNNER_UP_GAP: f64 = 0.05;

/// Fuzzy best match within this distance of the threshold raises `NearThreshold`
const NEAR_THRESHOLD_MARGIN: f64 = 0.10;

/// A single lookup query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRequest {
    /// Raw query text, used untrimmed for exact matching
    pub query: String,

    /// Replaces the configured exact threshold for this request only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_override: Option<f64>,
}

impl LookupRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            threshold_override: None,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold_override = Some(threshold);
        self
    }
}

/// Outcome of one lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    /// Echo of the request
    pub request: LookupRequest,

    /// Best candidate; `None` when the decision is `NoMatch`
    pub best_match: Option<MatchCandidate>,

    /// Remaining candidates in rank order, capped at `max_alternates`
    pub alternates: Vec<MatchCandidate>,

    pub decision: Decision,

    /// Status of the best match when `Matched`, otherwise `Unknown`
    pub status: CompanyStatus,

    /// Review signals, in a fixed order; empty for clean matches
    pub warnings: Vec<LookupWarning>,
}

impl LookupResult {
    /// Confidently matched to an active company
    pub fn is_active(&self) -> bool {
        self.decision == Decision::Matched && self.status == CompanyStatus::Active
    }

    /// Confidently matched to an inactive company
    pub fn is_inactive(&self) -> bool {
        self.decision == Decision::Matched && self.status == CompanyStatus::Inactive
    }

    /// Score of the best match, if any
    pub fn top_score(&self) -> Option<f64> {
        self.best_match.as_ref().map(|c| c.score)
    }

    pub fn has_warning(&self, warning: LookupWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Decision counts over a batch of lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub ambiguous: usize,
    pub no_match: usize,
    /// Requests rejected by validation
    pub invalid: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[Result<LookupResult, ValidationError>]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result {
                Ok(r) => match r.decision {
                    Decision::Matched => summary.matched += 1,
                    Decision::Ambiguous => summary.ambiguous += 1,
                    Decision::NoMatch => summary.no_match += 1,
                },
                Err(_) => summary.invalid += 1,
            }
        }
        summary
    }
}

/// Fuzzy company-name lookup over one immutable record list
///
/// The record list, its indexes and its statistics are built once in
/// [`LookupEngine::new`] and never change afterwards, so a shared engine can serve
/// lookups from many threads at once. A new list requires a new engine.
#[derive(Debug)]
pub struct LookupEngine {
    records: Vec<CompanyRecord>,
    index: CompanyIndex,
    matcher: FuzzyMatcher,
    normalizer: Normalizer,
    config: LookupConfig,
    stats: CompanyListStats,
}

impl LookupEngine {
    /// Build an engine over `records`.
    ///
    /// Each record's normalized name is re-derived with the configured normalizer.
    /// Records sharing a normalized name are kept side by side and logged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfig` if the configuration fails validation.
    pub fn new(mut records: Vec<CompanyRecord>, config: LookupConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let normalizer = Normalizer::new(&config.normalizer);
        for record in &mut records {
            record.renormalize(&normalizer);
        }

        let index = CompanyIndex::build(&records);
        let stats = compute_stats(&records);
        let matcher = FuzzyMatcher::new(Scorer::new(&config.scoring), config.candidate_floor);

        for group in index.duplicate_groups(&records) {
            warn!(
                "Duplicate normalized name '{}': {}",
                group.normalized_name,
                group.raw_names.join(" | ")
            );
        }
        info!(
            "Built lookup engine over {} companies ({} active, {} inactive, {} duplicate groups)",
            stats.total, stats.active, stats.inactive, stats.duplicates
        );

        Ok(Self {
            records,
            index,
            matcher,
            normalizer,
            config,
            stats,
        })
    }

    /// Build an engine with the default configuration
    ///
    /// # Errors
    ///
    /// Never fails in practice; the default configuration is valid.
    pub fn with_defaults(records: Vec<CompanyRecord>) -> Result<Self, ConfigError> {
        Self::new(records, LookupConfig::default())
    }

    /// Look up one query.
    ///
    /// A query equal to a raw record name byte-for-byte short-circuits to an exact
    /// match. Otherwise the query is normalized, every record is scored and the best
    /// candidate is classified against the thresholds.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyQuery` for blank queries and
    /// `ValidationError::InvalidThreshold` for an out-of-range override.
    pub fn lookup(&self, request: &LookupRequest) -> Result<LookupResult, ValidationError> {
        validate_query(&request.query)?;
        let threshold = match request.threshold_override {
            Some(t) => {
                validate_threshold(t)?;
                t
            }
            None => self.config.exact_threshold,
        };

        let result = match self.exact_lookup(request) {
            Some(result) => result,
            None => self.fuzzy_lookup(request, threshold),
        };

        debug!(
            "Lookup '{}': {} (top score {:.4})",
            request.query,
            result.decision,
            result.top_score().unwrap_or(0.0)
        );
        Ok(result)
    }

    /// Look up many queries; results are returned in request order
    pub fn lookup_batch(
        &self,
        requests: &[LookupRequest],
    ) -> Vec<Result<LookupResult, ValidationError>> {
        if requests.len() >= PARALLEL_THRESHOLD {
            requests.par_iter().map(|r| self.lookup(r)).collect()
        } else {
            requests.iter().map(|r| self.lookup(r)).collect()
        }
    }

    pub fn stats(&self) -> &CompanyListStats {
        &self.stats
    }

    /// All records in list order
    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn records_with_status(
        &self,
        status: CompanyStatus,
    ) -> impl Iterator<Item = &CompanyRecord> + '_ {
        self.records.iter().filter(move |r| r.status() == status)
    }

    /// Normalized names shared by more than one record, for operator inspection
    pub fn duplicate_groups(&self) -> Vec<DuplicateGroup> {
        self.index.duplicate_groups(&self.records)
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Normalize text with this engine's rules
    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn exact_lookup(&self, request: &LookupRequest) -> Option<LookupResult> {
        let raw_hits = self.index.find_raw(&request.query);
        let (&best_position, other_raw) = raw_hits.split_first()?;
        let best_record = &self.records[best_position];

        let mut group: Vec<usize> = self
            .index
            .find_normalized(best_record.normalized_name())
            .iter()
            .copied()
            .filter(|p| !raw_hits.contains(p))
            .collect();
        group.sort_by(|&a, &b| {
            rank_order((1.0, &self.records[a], a), (1.0, &self.records[b], b))
        });

        let alternates: Vec<MatchCandidate> = other_raw
            .iter()
            .map(|&p| exact_candidate(p, MatchKind::Exact))
            .chain(group.into_iter().map(|p| exact_candidate(p, MatchKind::NormalizedExact)))
            .take(self.config.max_alternates)
            .filter_map(|c| c.to_candidate(&self.records))
            .collect();

        let status = best_record.status();
        let mut warnings = Vec::new();
        if self.config.status_conflict_check
            && alternates.iter().any(|c| c.record.status() != status)
        {
            warnings.push(LookupWarning::StatusConflict);
        }

        Some(LookupResult {
            request: request.clone(),
            best_match: Some(MatchCandidate {
                record: best_record.clone(),
                score: 1.0,
                match_kind: MatchKind::Exact,
            }),
            alternates,
            decision: Decision::Matched,
            status,
            warnings,
        })
    }

    fn fuzzy_lookup(&self, request: &LookupRequest, threshold: f64) -> LookupResult {
        let query_normalized = self.normalizer.normalize(&request.query);
        let ranked = self.matcher.rank(&query_normalized, &self.records);

        let Some((top, rest)) = ranked.split_first() else {
            return LookupResult {
                request: request.clone(),
                best_match: None,
                alternates: Vec::new(),
                decision: Decision::NoMatch,
                status: CompanyStatus::Unknown,
                warnings: Vec::new(),
            };
        };

        let ambiguous_threshold = self.config.ambiguous_threshold;
        let top_status = self.records[top.position].status();
        let status_conflict = self.config.status_conflict_check
            && rest.iter().any(|c| {
                c.score >= ambiguous_threshold && self.records[c.position].status() != top_status
            });

        let decision = if top.score >= threshold && !status_conflict {
            Decision::Matched
        } else if top.score >= ambiguous_threshold {
            Decision::Ambiguous
        } else {
            Decision::NoMatch
        };

        // Below the ambiguous threshold the top candidates are only shown for inspection
        let (best_match, alternates, warnings) = if decision == Decision::NoMatch {
            (None, self.materialize(&ranked), Vec::new())
        } else {
            let mut warnings = Vec::new();
            if status_conflict {
                warnings.push(LookupWarning::StatusConflict);
            }
            if rest
                .first()
                .is_some_and(|second| top.score - second.score < CLOSE_RUNNER_UP_GAP)
            {
                warnings.push(LookupWarning::CloseRunnerUp);
            }
            if top.match_kind == MatchKind::Fuzzy
                && (top.score - threshold).abs() < NEAR_THRESHOLD_MARGIN
            {
                warnings.push(LookupWarning::NearThreshold);
            }
            (top.to_candidate(&self.records), self.materialize(rest), warnings)
        };

        LookupResult {
            request: request.clone(),
            best_match,
            alternates,
            decision,
            status: if decision == Decision::Matched {
                top_status
            } else {
                CompanyStatus::Unknown
            },
            warnings,
        }
    }

    fn materialize(&self, ranked: &[RankedCandidate]) -> Vec<MatchCandidate> {
        ranked
            .iter()
            .take(self.config.max_alternates)
            .filter_map(|c| c.to_candidate(&self.records))
            .collect()
    }
}

fn exact_candidate(position: usize, match_kind: MatchKind) -> RankedCandidate {
    RankedCandidate {
        position,
        score: 1.0,
        match_kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(records: &[(&str, CompanyStatus)]) -> LookupEngine {
        let records = records
            .iter()
            .map(|&(name, status)| CompanyRecord::new(name, status))
            .collect();
        LookupEngine::with_defaults(records).unwrap()
    }

    fn sample_engine() -> LookupEngine {
        engine(&[
            ("Müller & Schmidt AG", CompanyStatus::Active),
            ("Beispiel GmbH", CompanyStatus::Active),
            ("Nord Bau AG", CompanyStatus::Active),
            ("Nordbau GmbH", CompanyStatus::Inactive),
            ("Nord Bau Logistik GmbH", CompanyStatus::Active),
            ("Fake Company Ltd", CompanyStatus::Inactive),
        ])
    }

    #[test]
    fn test_invalid_config_refuses_construction() {
        let config = LookupConfig {
            exact_threshold: 0.7,
            ambiguous_threshold: 0.9,
            ..LookupConfig::default()
        };
        let err = LookupEngine::new(vec![], config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_exact_hit() {
        let engine = sample_engine();
        let result = engine
            .lookup(&LookupRequest::new("Müller & Schmidt AG"))
            .unwrap();
        assert_eq!(result.decision, Decision::Matched);
        assert_eq!(result.status, CompanyStatus::Active);
        let best = result.best_match.unwrap();
        assert_eq!(best.match_kind, MatchKind::Exact);
        assert!((best.score - 1.0).abs() < f64::EPSILON);
        assert!(result.alternates.is_empty());
    }

    #[test]
    fn test_exact_check_is_case_sensitive_and_untrimmed() {
        let engine = sample_engine();
        let result = engine
            .lookup(&LookupRequest::new(" Beispiel GmbH"))
            .unwrap();
        assert_eq!(
            result.best_match.unwrap().match_kind,
            MatchKind::NormalizedExact
        );

        let result = engine.lookup(&LookupRequest::new("beispiel gmbh")).unwrap();
        assert_eq!(
            result.best_match.unwrap().match_kind,
            MatchKind::NormalizedExact
        );
    }

    #[test]
    fn test_exact_hit_reports_duplicate_variants() {
        let engine = engine(&[
            ("Acme GmbH", CompanyStatus::Active),
            ("ACME Gmbh", CompanyStatus::Inactive),
            ("Zeta AG", CompanyStatus::Active),
            ("Acme GmbH", CompanyStatus::Unknown),
        ]);
        let result = engine.lookup(&LookupRequest::new("Acme GmbH")).unwrap();

        assert_eq!(result.decision, Decision::Matched);
        assert_eq!(result.status, CompanyStatus::Active);
        assert!(result.has_warning(LookupWarning::StatusConflict));

        let alternates: Vec<(&str, CompanyStatus, MatchKind)> = result
            .alternates
            .iter()
            .map(|c| (c.record.raw_name(), c.record.status(), c.match_kind))
            .collect();
        assert_eq!(
            alternates,
            vec![
                ("Acme GmbH", CompanyStatus::Unknown, MatchKind::Exact),
                ("ACME Gmbh", CompanyStatus::Inactive, MatchKind::NormalizedExact),
            ]
        );
    }

    #[test]
    fn test_suffix_insensitive_match() {
        let engine = sample_engine();
        let result = engine.lookup(&LookupRequest::new("beispiel")).unwrap();
        assert_eq!(result.decision, Decision::Matched);
        assert!(result.is_active());
        let best = result.best_match.unwrap();
        assert_eq!(best.record.raw_name(), "Beispiel GmbH");
        assert_eq!(best.match_kind, MatchKind::NormalizedExact);
        assert!((best.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_conflicting_status_is_ambiguous() {
        let engine = sample_engine();
        let result = engine.lookup(&LookupRequest::new("Nordbau")).unwrap();

        assert_eq!(result.decision, Decision::Ambiguous);
        assert_eq!(result.status, CompanyStatus::Unknown);
        assert!(result.has_warning(LookupWarning::StatusConflict));
        assert!(!result.is_active() && !result.is_inactive());

        let best = result.best_match.as_ref().unwrap();
        assert_eq!(best.record.raw_name(), "Nordbau GmbH");
        let nord_bau = result
            .alternates
            .iter()
            .find(|c| c.record.raw_name() == "Nord Bau AG")
            .unwrap();
        assert!((nord_bau.score - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_review_warnings() {
        let sample = sample_engine();
        let result = sample.lookup(&LookupRequest::new("Nordbau")).unwrap();
        assert_eq!(result.warnings, vec![LookupWarning::StatusConflict]);

        // Clean normalized-exact match carries no warnings
        let result = sample.lookup(&LookupRequest::new("beispiel")).unwrap();
        assert!(result.warnings.is_empty());

        // Fuzzy match at ~0.97 against a 0.95 threshold
        let single = engine(&[("Nord Bau Logistik GmbH", CompanyStatus::Active)]);
        let result = single
            .lookup(&LookupRequest::new("Nordbau Logistik"))
            .unwrap();
        assert_eq!(result.decision, Decision::Matched);
        assert_eq!(result.warnings, vec![LookupWarning::NearThreshold]);
    }

    #[test]
    fn test_close_runner_up_warning() {
        let records = vec![
            CompanyRecord::new("Alpha Beta Gamma Delta", CompanyStatus::Active),
            CompanyRecord::new("Alpha Beta Gamma Delte", CompanyStatus::Active),
        ];
        let config = LookupConfig {
            ambiguous_threshold: 0.7,
            ..LookupConfig::default()
        };
        let engine = LookupEngine::new(records, config).unwrap();

        // Both score (0.75 + 16/22) / 2
        let result = engine
            .lookup(&LookupRequest::new("Alpha Beta Gamma"))
            .unwrap();
        assert_eq!(result.decision, Decision::Ambiguous);
        assert_eq!(result.warnings, vec![LookupWarning::CloseRunnerUp]);
    }

    #[test]
    fn test_no_match_has_no_warnings() {
        let engine = sample_engine();
        let result = engine
            .lookup(&LookupRequest::new("Völlig Unbekannt"))
            .unwrap();
        assert_eq!(result.decision, Decision::NoMatch);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_chained_diacritic_table_refused() {
        let mut config = LookupConfig::default();
        config
            .normalizer
            .diacritics
            .insert("a".to_string(), "b".to_string());
        let err = LookupEngine::new(vec![], config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_conflict_check_can_be_disabled() {
        let records = vec![
            CompanyRecord::new("Nord Bau AG", CompanyStatus::Active),
            CompanyRecord::new("Nordbau GmbH", CompanyStatus::Inactive),
        ];
        let config = LookupConfig {
            status_conflict_check: false,
            ..LookupConfig::default()
        };
        let engine = LookupEngine::new(records, config).unwrap();
        let result = engine.lookup(&LookupRequest::new("Nordbau")).unwrap();
        assert_eq!(result.decision, Decision::Matched);
        assert!(result.is_inactive());
        assert!(!result.has_warning(LookupWarning::StatusConflict));
    }

    #[test]
    fn test_threshold_override() {
        let engine = engine(&[("Nord Bau Logistik GmbH", CompanyStatus::Active)]);

        // Compound fusion gives Jaccard 1.0; edit similarity 16/17
        let result = engine
            .lookup(&LookupRequest::new("Nordbau Logistik"))
            .unwrap();
        assert_eq!(result.decision, Decision::Matched);
        assert_eq!(
            result.best_match.as_ref().unwrap().match_kind,
            MatchKind::Fuzzy
        );

        let result = engine
            .lookup(&LookupRequest::new("Nordbau Logistik").with_threshold(0.99))
            .unwrap();
        assert_eq!(result.decision, Decision::Ambiguous);
        assert!(result.best_match.is_some());
        assert_eq!(result.status, CompanyStatus::Unknown);
    }

    #[test]
    fn test_no_match_keeps_candidates_for_inspection() {
        let engine = engine(&[
            ("Acme Bauten GmbH", CompanyStatus::Active),
            ("Zebra Logistik AG", CompanyStatus::Active),
        ]);
        // "acme bau" vs "acme bauten" scores about 0.53: above the floor, below ambiguous
        let result = engine.lookup(&LookupRequest::new("Acme Bau")).unwrap();
        assert_eq!(result.decision, Decision::NoMatch);
        assert!(result.best_match.is_none());
        assert_eq!(result.status, CompanyStatus::Unknown);
        assert_eq!(result.alternates.len(), 1);
        assert_eq!(result.alternates[0].record.raw_name(), "Acme Bauten GmbH");

        let result = engine.lookup(&LookupRequest::new("Quux")).unwrap();
        assert_eq!(result.decision, Decision::NoMatch);
        assert!(result.alternates.is_empty());
    }

    #[test]
    fn test_alternates_are_capped() {
        let records: Vec<CompanyRecord> = (0..10)
            .map(|i| CompanyRecord::new(format!("Acme {i} GmbH"), CompanyStatus::Active))
            .collect();
        let config = LookupConfig {
            max_alternates: 3,
            ..LookupConfig::default()
        };
        let engine = LookupEngine::new(records, config).unwrap();
        let result = engine.lookup(&LookupRequest::new("Acme 1")).unwrap();
        assert_eq!(result.alternates.len(), 3);
    }

    #[test]
    fn test_validation_errors() {
        let engine = sample_engine();
        assert_eq!(
            engine.lookup(&LookupRequest::new("   ")),
            Err(ValidationError::EmptyQuery)
        );
        assert_eq!(
            engine.lookup(&LookupRequest::new("")),
            Err(ValidationError::EmptyQuery)
        );
        assert!(matches!(
            engine.lookup(&LookupRequest::new("Acme").with_threshold(1.5)),
            Err(ValidationError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_empty_engine() {
        let engine = LookupEngine::with_defaults(vec![]).unwrap();
        assert!(engine.is_empty());
        let result = engine.lookup(&LookupRequest::new("Acme")).unwrap();
        assert_eq!(result.decision, Decision::NoMatch);
        assert!(result.best_match.is_none());
        assert_eq!(engine.stats(), &CompanyListStats::default());
    }

    #[test]
    fn test_stats_and_accessors() {
        let engine = engine(&[
            ("Acme GmbH", CompanyStatus::Active),
            ("ACME Gmbh", CompanyStatus::Inactive),
        ]);
        assert_eq!(engine.stats().duplicates, 1);
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.duplicate_groups().len(), 1);
        assert_eq!(engine.records_with_status(CompanyStatus::Inactive).count(), 1);
        assert_eq!(engine.normalize("ACME Gmbh"), "acme");
    }

    #[test]
    fn test_custom_normalizer_is_applied_to_records() {
        let mut config = LookupConfig::default();
        config.normalizer.legal_suffixes = vec!["holding".to_string()];
        let records = vec![CompanyRecord::new("Schmidt Holding", CompanyStatus::Active)];
        let engine = LookupEngine::new(records, config).unwrap();
        assert_eq!(engine.records()[0].normalized_name(), "schmidt");

        let result = engine.lookup(&LookupRequest::new("Schmidt")).unwrap();
        assert_eq!(
            result.best_match.unwrap().match_kind,
            MatchKind::NormalizedExact
        );
    }

    #[test]
    fn test_lookup_batch_preserves_order() {
        let engine = sample_engine();
        let mut requests: Vec<LookupRequest> = (0..150)
            .map(|i| {
                if i % 3 == 0 {
                    LookupRequest::new("beispiel")
                } else if i % 3 == 1 {
                    LookupRequest::new(" ")
                } else {
                    LookupRequest::new("Nordbau")
                }
            })
            .collect();
        requests.push(LookupRequest::new("Quux"));

        let results = engine.lookup_batch(&requests);
        assert_eq!(results.len(), requests.len());
        for (request, result) in requests.iter().zip(&results) {
            match result {
                Ok(r) => assert_eq!(&r.request, request),
                Err(e) => {
                    assert_eq!(request.query, " ");
                    assert_eq!(e, &ValidationError::EmptyQuery);
                }
            }
        }

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total, 151);
        assert_eq!(summary.matched, 50);
        assert_eq!(summary.invalid, 50);
        assert_eq!(summary.ambiguous, 50);
        assert_eq!(summary.no_match, 1);
    }

    #[test]
    fn test_concurrent_lookups_are_deterministic() {
        let engine = sample_engine();
        let expected = engine.lookup(&LookupRequest::new("Nordbau")).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| engine.lookup(&LookupRequest::new("Nordbau")).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
