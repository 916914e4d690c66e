//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use self::error::MalformedArticleError;

/// Number of leading characters of a timestamp that hold the calendar date
pub const DATE_PREFIX_LEN: usize = 10;

/// Parse the `YYYY-MM-DD` prefix of an ISO-8601-like timestamp
///
/// Only the first ten characters are considered, so `2024-05-01T09:30:00Z`
/// and `2024-05-01` both yield 2024-05-01.
pub fn parse_date_prefix(timestamp: &str) -> Result<NaiveDate, MalformedArticleError> {
    let prefix = timestamp
        .get(..DATE_PREFIX_LEN)
        .ok_or_else(|| MalformedArticleError::TruncatedTimestamp(timestamp.to_string()))?;

    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|_| MalformedArticleError::InvalidDate(prefix.to_string()))
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Truncate text to a maximum number of characters
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
