//! Property tests for the normalizer, scorer and engine.

use proptest::prelude::*;

use company_lookup::matching::scoring::{edit_similarity, token_jaccard};
use company_lookup::{
    normalize, score, CompanyRecord, CompanyStatus, Decision, LookupConfig, LookupEngine,
    LookupRequest, MatchKind,
};

/// Company-name-like text: letters, digits, German/French diacritics, punctuation
fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9äöüÄÖÜßéèÉçñ&.,()+\\- ]{0,40}"
}

fn arb_status() -> impl Strategy<Value = CompanyStatus> {
    prop_oneof![
        Just(CompanyStatus::Active),
        Just(CompanyStatus::Inactive),
        Just(CompanyStatus::Unknown),
    ]
}

fn arb_records() -> impl Strategy<Value = Vec<CompanyRecord>> {
    prop::collection::vec(
        (arb_name(), arb_status()).prop_map(|(name, status)| CompanyRecord::new(name, status)),
        0..12,
    )
}

fn decision_rank(decision: Decision) -> u8 {
    match decision {
        Decision::Matched => 2,
        Decision::Ambiguous => 1,
        Decision::NoMatch => 0,
    }
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in arb_name()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_is_canonical(s in arb_name()) {
        let n = normalize(&s);
        prop_assert_eq!(n.trim(), n.as_str());
        prop_assert!(!n.contains("  "));
        prop_assert!(n.chars().all(|c| c == ' ' || c == '&' || c.is_lowercase() || c.is_numeric()));
    }

    #[test]
    fn score_is_symmetric(a in arb_name(), b in arb_name()) {
        let (a, b) = (normalize(&a), normalize(&b));
        prop_assert_eq!(score(&a, &b).to_bits(), score(&b, &a).to_bits());
    }

    #[test]
    fn score_is_reflexive_and_bounded(a in arb_name(), b in arb_name()) {
        let (a, b) = (normalize(&a), normalize(&b));
        prop_assert!((score(&a, &a) - 1.0).abs() < f64::EPSILON);
        let s = score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn components_are_bounded(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}", compound in any::<bool>()) {
        let j = token_jaccard(&a, &b, compound);
        let e = edit_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&j));
        prop_assert!((0.0..=1.0).contains(&e));
        prop_assert_eq!(j.to_bits(), token_jaccard(&b, &a, compound).to_bits());
    }

    #[test]
    fn every_record_matches_itself(records in arb_records()) {
        let engine = LookupEngine::with_defaults(records).unwrap();
        for record in engine.records() {
            if record.raw_name().trim().is_empty() {
                continue;
            }
            let result = engine.lookup(&LookupRequest::new(record.raw_name())).unwrap();
            prop_assert_eq!(result.decision, Decision::Matched);
            let best = result.best_match.unwrap();
            prop_assert_eq!(best.match_kind, MatchKind::Exact);
            prop_assert!((best.score - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn raising_exact_threshold_never_promotes(
        records in arb_records(),
        query in "[A-Za-zäöü ]{1,20}",
        low in 0.81f64..0.9,
        high in 0.9f64..=1.0,
    ) {
        prop_assume!(!query.trim().is_empty());
        let lenient = LookupEngine::new(
            records.clone(),
            LookupConfig { exact_threshold: low, ..LookupConfig::default() },
        ).unwrap();
        let strict = LookupEngine::new(
            records,
            LookupConfig { exact_threshold: high, ..LookupConfig::default() },
        ).unwrap();

        let request = LookupRequest::new(query);
        let l = lenient.lookup(&request).unwrap().decision;
        let s = strict.lookup(&request).unwrap().decision;
        prop_assert!(decision_rank(s) <= decision_rank(l));
    }

    #[test]
    fn lookups_are_deterministic(records in arb_records(), query in "[A-Za-z ]{1,20}") {
        prop_assume!(!query.trim().is_empty());
        let engine = LookupEngine::with_defaults(records).unwrap();
        let request = LookupRequest::new(query);
        let first = engine.lookup(&request).unwrap();
        let second = engine.lookup(&request).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn alternates_respect_cap_and_order(records in arb_records(), query in "[A-Za-z ]{1,20}") {
        prop_assume!(!query.trim().is_empty());
        let engine = LookupEngine::with_defaults(records).unwrap();
        let result = engine.lookup(&LookupRequest::new(query)).unwrap();
        prop_assert!(result.alternates.len() <= engine.config().max_alternates);
        prop_assert!(result.alternates.windows(2).all(|w| w[0].score >= w[1].score));
        if let Some(best) = &result.best_match {
            prop_assert!(result.alternates.iter().all(|c| c.score <= best.score));
        }
    }
}
