use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::core::record::CompanyRecord;
use crate::core::types::CompanyStatus;
use crate::utils::validation::{check_record_limit, MAX_RECORDS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed list: {0}")]
    Csv(#[from] csv::Error),

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords(usize),
}

/// First-column values that mark a header row
const HEADER_NAMES: &[&str] = &["name", "company", "company name", "company_name"];

/// Parse a TSV/CSV company list with columns: name, [status], [extra...]
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_company_file(path: &Path, delimiter: u8) -> Result<Vec<CompanyRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_company_text(&content, delimiter)
}

/// Parse TSV/CSV text with columns: name, [status], [extra...]
///
/// Fields may be quoted, so names containing the delimiter survive
/// (`"Apple, Inc.",active`). Blank lines and `#` comments are skipped. If the first
/// data row starts with a header name, the names of any extra columns become
/// metadata keys; otherwise extra columns are keyed `column_N` (1-based). Status text
/// is parsed leniently and unrecognized values become `Unknown`.
///
/// # Errors
///
/// Returns `ParseError::Csv` for malformed rows and `ParseError::TooManyRecords` if
/// the limit is exceeded. An empty list is not an error.
pub fn parse_company_text(text: &str, delimiter: u8) -> Result<Vec<CompanyRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut extra_columns: Vec<String> = Vec::new();
    let mut first_data_row = true;

    for row in reader.records() {
        let row = row?;
        let fields: Vec<&str> = row.iter().collect();

        // Whitespace-only lines and indented comments
        if fields.iter().all(|f| f.is_empty()) || fields[0].starts_with('#') {
            continue;
        }

        // Check if first non-empty/non-comment row is a header
        if first_data_row {
            first_data_row = false;
            if HEADER_NAMES.contains(&fields[0].to_lowercase().as_str()) {
                extra_columns = fields.iter().skip(2).map(|s| s.to_string()).collect();
                continue;
            }
        }

        let line_num = row.position().map_or(0, csv::Position::line);

        let name = fields[0];
        if name.is_empty() {
            warn!("Skipping line {line_num}: empty company name");
            continue;
        }

        let status_text = fields.get(1).copied().unwrap_or_default();
        let (status, recognized) = CompanyStatus::parse_lenient(status_text);
        if !recognized {
            warn!("Unrecognized status '{status_text}' on line {line_num}, using 'unknown'");
        }

        let mut record = CompanyRecord::new(name, status);
        for (column, value) in fields.iter().enumerate().skip(2) {
            if value.is_empty() {
                continue;
            }
            let key = extra_columns
                .get(column - 2)
                .filter(|k| !k.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("column_{}", column + 1));
            record = record.with_metadata(key, *value);
        }

        // Check record limit for DOS protection
        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(record);
    }

    Ok(records)
}
