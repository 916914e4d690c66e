//! Error types for the sentiment pipeline
//!
//! This module defines the domain error types raised by the pipeline stages.

use thiserror::Error;

/// Errors that can occur while fetching articles from the search provider
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the API key
    #[error("Invalid or rejected API credential: {0}")]
    InvalidCredential(String),

    /// No API key was configured
    #[error("No API credential configured")]
    MissingCredential,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Provider reported an error
    #[error("Provider error (status {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body could not be decoded
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// A single article could not be turned into an annotated row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedArticleError {
    /// Timestamp shorter than a calendar date
    #[error("Timestamp too short for a date: {0:?}")]
    TruncatedTimestamp(String),

    /// Date prefix did not parse as YYYY-MM-DD
    #[error("Invalid date format: {0:?}")]
    InvalidDate(String),
}

/// Errors raised by a forecasting model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Not enough observations to fit
    #[error("Insufficient data points: need at least {0}, got {1}")]
    InsufficientData(usize, usize),

    /// All observations share the same time coordinate
    #[error("Degenerate series: {0}")]
    Degenerate(String),

    /// Observed or fitted values are not finite
    #[error("Non-finite value in series at {0}")]
    NonFinite(String),
}

impl FetchError {
    /// Whether a later run could plausibly succeed without operator action
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimit | Self::Timeout => true,
            Self::Api { status, .. } => *status >= 500,
            Self::InvalidCredential(_)
            | Self::MissingCredential
            | Self::Decode(_)
            | Self::InvalidUrl(_) => false,
        }
    }
}
