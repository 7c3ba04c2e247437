//! Centralized validation and helper functions.

/// Maximum number of records accepted from a single list file (DOS protection)
pub const MAX_RECORDS: usize = 1_000_000;

/// Per-request validation errors
///
/// These are recoverable: the caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Query is empty or whitespace-only")]
    EmptyQuery,
    #[error("Threshold override must be a finite number in [0, 1], got {0}")]
    InvalidThreshold(f64),
}

/// Reject queries that are empty after trimming.
///
/// The query itself is not modified; exact matching runs on the untrimmed text.
///
/// # Errors
///
/// Returns `ValidationError::EmptyQuery` for empty or whitespace-only input.
pub fn validate_query(query: &str) -> Result<(), ValidationError> {
    if query.trim().is_empty() {
        Err(ValidationError::EmptyQuery)
    } else {
        Ok(())
    }
}

/// Check that a per-request threshold lies in [0, 1].
///
/// # Errors
///
/// Returns `ValidationError::InvalidThreshold` for NaN, infinite or out-of-range values.
pub fn validate_threshold(threshold: f64) -> Result<(), ValidationError> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ValidationError::InvalidThreshold(threshold))
    }
}

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}
