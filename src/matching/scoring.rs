use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

use crate::matching::config::ConfigError;

/// Longest run of tokens that may be fused into one compound token
const MAX_COMPOUND_PARTS: usize = 4;

/// Safely convert usize to f64 for ratio calculations
///
/// Token counts are far below the range where f64 loses integer precision.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Weights and options for the two-signal similarity blend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight for token-set Jaccard similarity
    pub token_weight: f64,
    /// Weight for normalized edit similarity
    pub edit_weight: f64,
    /// Fuse split compound words ("nord bau" vs "nordbau") before token comparison
    pub compound_tokens: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            token_weight: 0.5, // 50%
            edit_weight: 0.5,  // 50%
            compound_tokens: true,
        }
    }
}

impl ScoringConfig {
    /// Weights must be finite, non-negative and not both zero.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfig` if the weights cannot be normalized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        if !valid(self.token_weight) || !valid(self.edit_weight) {
            return Err(ConfigError::InvalidConfig(format!(
                "scoring weights must be finite and non-negative (token {}, edit {})",
                self.token_weight, self.edit_weight
            )));
        }
        if self.token_weight + self.edit_weight <= 0.0 {
            return Err(ConfigError::InvalidConfig(
                "scoring weights must not both be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalize weights to sum to 1.0
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.token_weight + self.edit_weight;
        if !total.is_finite() || total <= 0.0 {
            return Self {
                compound_tokens: self.compound_tokens,
                ..Self::default()
            };
        }
        Self {
            token_weight: self.token_weight / total,
            edit_weight: self.edit_weight / total,
            compound_tokens: self.compound_tokens,
        }
    }
}

/// Component scores between two normalized names
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityScore {
    /// Jaccard index of the token sets
    pub token_overlap: f64,
    /// `1 - levenshtein / max_len`
    pub edit_similarity: f64,
    /// Weighted blend, in [0, 1]
    pub composite: f64,
}

/// Similarity scorer over normalized names
///
/// Symmetric, reflexive (identical inputs score exactly 1.0) and bounded to [0, 1].
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringConfig,
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            weights: config.normalized(),
        }
    }

    /// Composite similarity of two normalized names
    #[must_use]
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.breakdown(a, b).composite
    }

    /// Composite similarity together with its components
    #[must_use]
    pub fn breakdown(&self, a: &str, b: &str) -> SimilarityScore {
        if a == b {
            return SimilarityScore {
                token_overlap: 1.0,
                edit_similarity: 1.0,
                composite: 1.0,
            };
        }

        let token_overlap = token_jaccard(a, b, self.weights.compound_tokens);
        let edit_similarity = edit_similarity(a, b);
        let composite = (self.weights.token_weight * token_overlap
            + self.weights.edit_weight * edit_similarity)
            .clamp(0.0, 1.0);

        SimilarityScore {
            token_overlap,
            edit_similarity,
            composite,
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

/// Score two normalized names with the default weights
#[must_use]
pub fn score(a: &str, b: &str) -> f64 {
    Scorer::default().score(a, b)
}

/// Jaccard similarity of whitespace-delimited token sets: |A ∩ B| / |A ∪ B|
///
/// Two empty names are identical (1.0); one empty name shares nothing (0.0).
/// With `compound_tokens`, runs of tokens on either side whose concatenation is a
/// token of the other side are fused first.
#[must_use]
pub fn token_jaccard(a: &str, b: &str, compound_tokens: bool) -> f64 {
    let a_tokens: Vec<&str> = a.split_whitespace().collect();
    let b_tokens: Vec<&str> = b.split_whitespace().collect();
    let a_set: HashSet<&str> = a_tokens.iter().copied().collect();
    let b_set: HashSet<&str> = b_tokens.iter().copied().collect();

    if !compound_tokens {
        return jaccard_similarity(&a_set, &b_set);
    }

    // Both sides fuse against the other's original set, keeping the score symmetric
    let a_fused = fuse_compounds(&a_tokens, &b_set);
    let b_fused = fuse_compounds(&b_tokens, &a_set);
    let a_fused_set: HashSet<&str> = a_fused.iter().map(|t| &**t).collect();
    let b_fused_set: HashSet<&str> = b_fused.iter().map(|t| &**t).collect();

    jaccard_similarity(&a_fused_set, &b_fused_set)
}

/// Normalized edit similarity: `1 - levenshtein(a, b) / max(len(a), len(b))`
///
/// Lengths are counted in characters. Two empty strings are identical (1.0).
#[must_use]
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Levenshtein distance in characters
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

fn jaccard_similarity(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    count_to_f64(intersection) / count_to_f64(union)
}

/// Greedily fuse the longest run (2..=MAX_COMPOUND_PARTS tokens) whose concatenation
/// is a token of `other`.
fn fuse_compounds<'a>(tokens: &[&'a str], other: &HashSet<&str>) -> Vec<Cow<'a, str>> {
    let mut fused = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let max_end = (i + MAX_COMPOUND_PARTS).min(tokens.len());
        let run = (i + 2..=max_end).rev().find_map(|end| {
            let joined = tokens[i..end].concat();
            other.contains(joined.as_str()).then_some((joined, end))
        });

        match run {
            Some((joined, end)) => {
                fused.push(Cow::Owned(joined));
                i = end;
            }
            None => {
                fused.push(Cow::Borrowed(tokens[i]));
                i += 1;
            }
        }
    }

    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("nordbau", "nord bau"), 1);
        assert_eq!(levenshtein("müller", "muller"), 1);
    }

    #[test]
    fn test_edit_similarity() {
        assert!((edit_similarity("", "") - 1.0).abs() < f64::EPSILON);
        assert!((edit_similarity("abcd", "abcx") - 0.75).abs() < 1e-9);
        assert!((edit_similarity("abc", "") - 0.0).abs() < 1e-9);
        // Counted in characters, not bytes
        assert!((edit_similarity("müller", "muller") - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_token_jaccard() {
        // {schmidt, holding} vs {holding, schmidt, gruppe}
        let j = token_jaccard("schmidt holding", "holding schmidt gruppe", false);
        assert!((j - 2.0 / 3.0).abs() < 1e-9);

        assert!((token_jaccard("", "", false) - 1.0).abs() < 1e-9);
        assert!((token_jaccard("acme", "", false) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_compound_tokens() {
        assert!((token_jaccard("nordbau", "nord bau", false) - 0.0).abs() < 1e-9);
        assert!((token_jaccard("nordbau", "nord bau", true) - 1.0).abs() < 1e-9);
        assert!((token_jaccard("nord bau", "nordbau", true) - 1.0).abs() < 1e-9);
        // Partial fusion: "nord bau" fuses, "gruppe" stays
        let j = token_jaccard("nord bau gruppe", "nordbau", true);
        assert!((j - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_reflexive_and_symmetric() {
        let scorer = Scorer::default();
        for name in ["", "acme", "muller & schmidt", "nord bau"] {
            assert!((scorer.score(name, name) - 1.0).abs() < f64::EPSILON);
        }
        let pairs = [
            ("nordbau", "nord bau"),
            ("schmidt holding", "holding schmidt"),
            ("acme", "acne corp"),
            ("", "x"),
        ];
        for (a, b) in pairs {
            assert_eq!(scorer.score(a, b).to_bits(), scorer.score(b, a).to_bits());
        }
    }

    #[test]
    fn test_score_blend() {
        // Jaccard 1.0 (fused), edit 1 - 1/8
        let s = score("nordbau", "nord bau");
        assert!((s - 0.9375).abs() < 1e-12);

        // Reordered tokens: Jaccard 1.0, edit similarity low
        let breakdown = Scorer::default().breakdown("schmidt holding", "holding schmidt");
        assert!((breakdown.token_overlap - 1.0).abs() < 1e-9);
        assert!(breakdown.edit_similarity < 0.5);
        assert!(breakdown.composite > 0.5);
    }

    #[test]
    fn test_custom_weights_normalized() {
        let scorer = Scorer::new(&ScoringConfig {
            token_weight: 3.0,
            edit_weight: 1.0,
            compound_tokens: false,
        });
        // Jaccard 0.0, edit 0.75
        let s = scorer.score("abcd", "abcx");
        assert!((s - 0.1875).abs() < 1e-9);
    }

    #[test]
    fn test_validate_weights() {
        assert!(ScoringConfig::default().validate().is_ok());
        let zero = ScoringConfig {
            token_weight: 0.0,
            edit_weight: 0.0,
            compound_tokens: true,
        };
        assert!(zero.validate().is_err());
        let negative = ScoringConfig {
            token_weight: -1.0,
            ..ScoringConfig::default()
        };
        assert!(negative.validate().is_err());
        let nan = ScoringConfig {
            edit_weight: f64::NAN,
            ..ScoringConfig::default()
        };
        assert!(nan.validate().is_err());
    }
}
