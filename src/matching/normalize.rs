//! Company name normalization.
//!
//! Turns a raw company name into a canonical comparable form:
//!
//! 1. Lowercase
//! 2. Fold diacritics via an explicit table, then (optionally) NFKD decomposition
//!    with combining marks dropped
//! 3. Drop parenthetical content ("BMW (Automotive)" -> "bmw")
//! 4. Turn ampersand variants (`&`, `＆`, `+`, "and", "und") into a single `&` token
//! 5. Turn separators (hyphens, dashes, slashes, underscores) into spaces and drop
//!    all other punctuation
//! 6. Collapse whitespace
//! 7. Strip trailing legal-entity suffixes ("GmbH", "AG", "Inc", ...)
//!
//! The suffix list and diacritic table live in [`NormalizerConfig`] so the rules are
//! auditable and can be tuned per data set. Normalization is total, deterministic and
//! idempotent.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::matching::config::ConfigError;

/// Legal-entity suffixes stripped from the end of a name
pub const DEFAULT_LEGAL_SUFFIXES: &[&str] = &[
    "gmbh",
    "mbh",
    "ag",
    "se",
    "kg",
    "kgaa",
    "cokg",
    "ohg",
    "gbr",
    "e.V.",
    "ug",
    "co",
    "company",
    "inc",
    "incorporated",
    "ltd",
    "limited",
    "llc",
    "llp",
    "lp",
    "plc",
    "corp",
    "corporation",
    "sa",
    "sarl",
    "sas",
    "bv",
    "nv",
];

/// Characters folded to their base Latin spelling before Unicode decomposition.
///
/// Covers letters NFKD leaves intact (ß, æ, ø, ł, ...) alongside the common accented
/// vowels so the table is complete on its own when decomposition is disabled.
pub const DEFAULT_DIACRITICS: &[(char, &str)] = &[
    ('ä', "a"),
    ('ö', "o"),
    ('ü', "u"),
    ('ß', "ss"),
    ('à', "a"),
    ('á', "a"),
    ('â', "a"),
    ('ã', "a"),
    ('å', "a"),
    ('æ', "ae"),
    ('ç', "c"),
    ('č', "c"),
    ('ď', "d"),
    ('đ', "d"),
    ('ð', "d"),
    ('è', "e"),
    ('é', "e"),
    ('ê', "e"),
    ('ë', "e"),
    ('ě', "e"),
    ('ì', "i"),
    ('í', "i"),
    ('î', "i"),
    ('ï', "i"),
    ('ł', "l"),
    ('ñ', "n"),
    ('ň', "n"),
    ('ò', "o"),
    ('ó', "o"),
    ('ô', "o"),
    ('õ', "o"),
    ('ø', "o"),
    ('œ', "oe"),
    ('ř', "r"),
    ('š', "s"),
    ('ť', "t"),
    ('ù', "u"),
    ('ú', "u"),
    ('û', "u"),
    ('ů', "u"),
    ('ý', "y"),
    ('ÿ', "y"),
    ('ž', "z"),
    ('þ', "th"),
];

/// Words treated as an ampersand
pub const DEFAULT_AMPERSAND_WORDS: &[&str] = &["and", "und"];

const AMPERSAND_TOKEN: &str = "&";

/// Configuration of the normalization rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Legal-entity suffixes removed when they appear as trailing tokens
    pub legal_suffixes: Vec<String>,
    /// Single character -> lowercase ASCII replacement
    pub diacritics: BTreeMap<String, String>,
    /// Whole words that mean "&"
    pub ampersand_words: Vec<String>,
    /// Remove text in parentheses
    pub strip_parentheticals: bool,
    /// NFKD-decompose characters not in the diacritic table and drop combining marks
    pub decompose_unicode: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            legal_suffixes: DEFAULT_LEGAL_SUFFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            diacritics: DEFAULT_DIACRITICS
                .iter()
                .map(|(c, r)| (c.to_string(), (*r).to_string()))
                .collect(),
            ampersand_words: DEFAULT_AMPERSAND_WORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            strip_parentheticals: true,
            decompose_unicode: true,
        }
    }
}

impl NormalizerConfig {
    /// Check the diacritic table: keys must be single non-ASCII characters and
    /// replacements lowercase ASCII alphanumerics (anything else would break
    /// idempotence).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfig` describing the first offending entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, replacement) in &self.diacritics {
            if key.chars().count() != 1 {
                return Err(ConfigError::InvalidConfig(format!(
                    "diacritic table key '{key}' must be a single character"
                )));
            }
            // Replacements are ASCII, so ASCII keys could fold text a second time
            if key.is_ascii() {
                return Err(ConfigError::InvalidConfig(format!(
                    "diacritic table key '{key}' must be a non-ASCII character"
                )));
            }
            if !replacement
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            {
                return Err(ConfigError::InvalidConfig(format!(
                    "diacritic replacement '{replacement}' for '{key}' must be lowercase ASCII letters or digits"
                )));
            }
        }
        Ok(())
    }
}

/// Compiled normalization rules
#[derive(Debug, Clone)]
pub struct Normalizer {
    diacritics: HashMap<char, String>,
    /// Suffix token sequences, longest first
    suffixes: Vec<Vec<String>>,
    ampersand_words: HashSet<String>,
    strip_parentheticals: bool,
    decompose_unicode: bool,
}

impl Normalizer {
    /// Compile a normalizer from its configuration.
    ///
    /// Table entries that fail [`NormalizerConfig::validate`] are sanitized rather than
    /// rejected, so the resulting normalizer is always total.
    pub fn new(config: &NormalizerConfig) -> Self {
        let mut diacritics = HashMap::new();
        for (key, replacement) in &config.diacritics {
            let Some(c) = key.chars().next().filter(|c| !c.is_ascii()) else {
                continue;
            };
            let replacement: String = replacement
                .to_lowercase()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect();
            for lower in c.to_lowercase() {
                diacritics.insert(lower, replacement.clone());
            }
        }

        let mut normalizer = Self {
            diacritics,
            suffixes: Vec::new(),
            ampersand_words: config
                .ampersand_words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            strip_parentheticals: config.strip_parentheticals,
            decompose_unicode: config.decompose_unicode,
        };

        // Suffixes go through the same folding as names so "e.V." matches "ev"
        let mut suffixes: Vec<Vec<String>> = config
            .legal_suffixes
            .iter()
            .map(|s| normalizer.tokenize(&normalizer.fold(s)))
            .filter(|tokens| !tokens.is_empty())
            .collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        suffixes.dedup();
        normalizer.suffixes = suffixes;

        normalizer
    }

    /// Normalize a raw company name
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let folded = self.fold(raw);
        let mut tokens = self.tokenize(&folded);
        self.strip_suffixes(&mut tokens);
        tokens.join(" ")
    }

    /// Lowercase and fold diacritics
    fn fold(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for c in raw.chars() {
            for lower in c.to_lowercase() {
                self.push_folded(lower, &mut out);
            }
        }

        if self.strip_parentheticals {
            remove_parentheticals(&out)
        } else {
            out
        }
    }

    fn push_folded(&self, c: char, out: &mut String) {
        if let Some(replacement) = self.diacritics.get(&c) {
            out.push_str(replacement);
            return;
        }
        if !self.decompose_unicode || c.is_ascii() {
            out.push(c);
            return;
        }
        for d in std::iter::once(c).nfkd() {
            if is_combining_mark(d) {
                continue;
            }
            for lower in d.to_lowercase() {
                match self.diacritics.get(&lower) {
                    Some(replacement) => out.push_str(replacement),
                    None => out.push(lower),
                }
            }
        }
    }

    /// Split folded text into tokens, dropping punctuation
    fn tokenize(&self, folded: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        for c in folded.chars() {
            if is_ampersand(c) {
                self.flush(&mut current, &mut tokens);
                tokens.push(AMPERSAND_TOKEN.to_string());
            } else if c.is_whitespace() || is_separator(c) {
                self.flush(&mut current, &mut tokens);
            } else if c.is_alphanumeric() {
                current.push(c);
            }
            // Other punctuation is dropped without splitting: "e.V." -> "ev"
        }
        self.flush(&mut current, &mut tokens);

        tokens
    }

    fn flush(&self, current: &mut String, tokens: &mut Vec<String>) {
        if current.is_empty() {
            return;
        }
        let token = std::mem::take(current);
        if self.ampersand_words.contains(&token) {
            tokens.push(AMPERSAND_TOKEN.to_string());
        } else {
            tokens.push(token);
        }
    }

    /// Remove trailing suffixes and dangling "&" until a fixpoint, never removing
    /// the last remaining token.
    fn strip_suffixes(&self, tokens: &mut Vec<String>) {
        loop {
            if tokens.len() > 1 && tokens.last().is_some_and(|t| t == AMPERSAND_TOKEN) {
                tokens.pop();
                continue;
            }

            let matched = self
                .suffixes
                .iter()
                .find(|suffix| tokens.len() > suffix.len() && tokens.ends_with(suffix));

            match matched {
                Some(suffix) => {
                    let keep = tokens.len() - suffix.len();
                    tokens.truncate(keep);
                }
                None => break,
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

/// Shared normalizer with the default rules
pub fn default_normalizer() -> &'static Normalizer {
    static DEFAULT: OnceLock<Normalizer> = OnceLock::new();
    DEFAULT.get_or_init(Normalizer::default)
}

/// Normalize a company name with the default rules
#[must_use]
pub fn normalize(raw: &str) -> String {
    default_normalizer().normalize(raw)
}

fn is_ampersand(c: char) -> bool {
    matches!(c, '&' | '＆' | '+')
}

fn is_separator(c: char) -> bool {
    matches!(
        c,
        '-' | '\u{2010}'
            | '\u{2011}'
            | '\u{2012}'
            | '\u{2013}'
            | '\u{2014}'
            | '\u{2015}'
            | '/'
            | '\\'
            | '_'
            | '|'
    )
}

/// Drop text inside parentheses. If nothing alphanumeric would survive, the text is
/// returned unchanged and the parentheses are later dropped as punctuation.
fn remove_parentheticals(s: &str) -> String {
    if !s.contains('(') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => {
                depth += 1;
                out.push(' ');
            }
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    if out.chars().any(char::is_alphanumeric) {
        out
    } else {
        s.to_string()
    }
}
