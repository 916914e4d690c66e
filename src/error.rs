//! Unified error handling for the sentiscope crate
//!
//! This module provides a unified error type that consolidates the domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`ErrorClassification`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use sentiscope::error::{Error, ErrorClassification};
//!
//! fn handle_error(err: Error) {
//!     if err.is_recoverable() {
//!         println!("Try again later: {}", err.user_message());
//!     } else {
//!         eprintln!("Fatal error: {}", err);
//!     }
//! }
//! ```

use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::utils::error::{FetchError, ForecastError, MalformedArticleError};

/// Common trait for all sentiscope error types
pub trait ErrorClassification: std::error::Error {
    /// Check if a later attempt could succeed without changing anything
    fn is_recoverable(&self) -> bool;

    /// Message suitable for an inline dashboard notice
    fn user_message(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, rate limit, credentials)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Model fitting errors
    Forecast,
    /// Template rendering errors
    Rendering,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    /// Human-readable category name
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parsing error",
            Self::Forecast => "forecast error",
            Self::Rendering => "rendering error",
            Self::Config => "configuration error",
        }
    }
}

impl ErrorClassification for FetchError {
    fn is_recoverable(&self) -> bool {
        self.is_transient()
    }

    fn user_message(&self) -> String {
        match self {
            Self::InvalidCredential(_) | Self::MissingCredential => {
                "The news service rejected the API key. Check the configured credential.".to_string()
            }
            Self::RateLimit => {
                "The news service rate limit was exceeded. Try again later.".to_string()
            }
            Self::Timeout => "The news service did not answer in time.".to_string(),
            other => format!("Could not fetch news articles: {other}"),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Decode(_) => ErrorCategory::Parsing,
            Self::InvalidUrl(_) | Self::MissingCredential => ErrorCategory::Config,
            _ => ErrorCategory::Network,
        }
    }
}

impl ErrorClassification for ForecastError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn user_message(&self) -> String {
        "Not enough data points to forecast sentiment. Try increasing the number of articles."
            .to_string()
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Forecast
    }
}

/// Unified error type for the sentiscope crate
#[derive(Error, Debug)]
pub enum Error {
    /// Article search errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Per-article parse errors
    #[error("Malformed article: {0}")]
    Malformed(#[from] MalformedArticleError),

    /// Model fitting errors
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Template registration errors
    #[error("Template registration error: {0}")]
    TemplateRegistration(#[from] Box<handlebars::TemplateError>),
}

impl ErrorClassification for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Forecast(e) => e.is_recoverable(),
            Self::Malformed(_) | Self::Template(_) | Self::TemplateRegistration(_) => false,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Fetch(e) => e.user_message(),
            Self::Forecast(e) => e.user_message(),
            other => format!("{}: {other}", other.category().description()),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Malformed(_) => ErrorCategory::Parsing,
            Self::Forecast(_) => ErrorCategory::Forecast,
            Self::Template(_) | Self::TemplateRegistration(_) => ErrorCategory::Rendering,
        }
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::TemplateRegistration(Box::new(err))
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
