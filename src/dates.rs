use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("expected eight digits (YYYYMMDD)")]
    Layout,
    #[error("not a calendar date")]
    Calendar,
}

/// Parses a `YYYYMMDD` bibliographic date. Empty and all-zero values mean
/// "not stated" and give `Ok(None)`.
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, DateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.bytes().all(|b| b == b'0') {
        return Ok(None);
    }
    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::Layout);
    }
    NaiveDate::parse_from_str(trimmed, "%Y%m%d")
        .map(Some)
        .map_err(|_| DateError::Calendar)
}

/// Formats a date back into the `YYYYMMDD` layout; empty for an absent date.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y%m%d").to_string())
        .unwrap_or_default()
}
