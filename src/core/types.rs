use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Business status attached to a company in the reference list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    Active,
    Inactive,
    #[default]
    Unknown,
}

impl CompanyStatus {
    /// Parse a status cell leniently, mapping anything unrecognized to `Unknown`.
    ///
    /// Returns the status and whether the text was recognized. Empty text counts as
    /// recognized (an intentionally blank status).
    #[must_use]
    pub fn parse_lenient(text: &str) -> (Self, bool) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return (Self::Unknown, true);
        }
        match trimmed.parse() {
            Ok(status) => (status, true),
            Err(_) => (Self::Unknown, false),
        }
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized company status: '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for CompanyStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "whitelisted" | "whitelist" | "approved" | "allowed" => Ok(Self::Active),
            "inactive" | "blacklisted" | "blacklist" | "blocked" | "denied" => Ok(Self::Inactive),
            "unknown" => Ok(Self::Unknown),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// How a candidate was matched against the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Raw query equals the raw record name byte-for-byte
    Exact,
    /// Normalized query equals the normalized record name
    NormalizedExact,
    /// Similarity above the candidate floor but not identical
    Fuzzy,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::NormalizedExact => write!(f, "normalized_exact"),
            Self::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Outcome of classifying the best candidate of a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Best match is confident enough for automatic acceptance
    Matched,
    /// Best match is reported but must be treated as unconfirmed
    Ambiguous,
    /// No candidate reached the ambiguous threshold
    NoMatch,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "MATCHED"),
            Self::Ambiguous => write!(f, "AMBIGUOUS"),
            Self::NoMatch => write!(f, "NO MATCH"),
        }
    }
}

/// Review signal attached to a lookup result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupWarning {
    /// A strong alternate carries a different status than the best match
    StatusConflict,
    /// The runner-up scores almost as high as the best match
    CloseRunnerUp,
    /// The best fuzzy score lies close to the acceptance threshold
    NearThreshold,
}

impl std::fmt::Display for LookupWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusConflict => write!(f, "status_conflict"),
            Self::CloseRunnerUp => write!(f, "close_runner_up"),
            Self::NearThreshold => write!(f, "near_threshold"),
        }
    }
}
