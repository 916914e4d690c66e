//! Configuration management for sentiscope
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files. Every constant the pipeline depends on (search language, sort order,
//! article bounds, forecast horizon) is a named field here rather than a literal.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::models::SortOrder;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// News search provider configuration
    pub news: NewsApiConfig,

    /// Pipeline behaviour
    pub pipeline: PipelineConfig,

    /// Sentiment analyzer configuration
    pub sentiment: SentimentConfig,

    /// Dashboard server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// NewsAPI client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsApiConfig {
    /// API base URL (without the `/v2/everything` path)
    pub base_url: String,

    /// Static API credential
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Article language filter
    pub language: String,

    /// Result ordering
    pub sort_by: SortOrder,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Client-side throttle (requests per minute)
    pub requests_per_minute: u32,

    /// User agent string
    pub user_agent: String,
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input bounds and defaults
    pub limits: QueryLimits,

    /// Number of future days to forecast
    pub forecast_horizon_days: u32,

    /// Minimum number of distinct dates before the forecaster runs
    pub min_forecast_points: usize,
}

/// Bounds and defaults applied by the input collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    pub min_articles: u32,
    pub max_articles: u32,
    pub default_articles: u32,
    /// Placeholder used when the keyword is empty
    pub default_keyword: String,
}

/// Sentiment analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Shift VADER scores by market headline vocabulary
    pub market_terms: bool,
}

/// Dashboard server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable CORS for the JSON API
    pub enable_cors: bool,

    /// Enable request logging
    pub enable_request_logging: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://newsapi.org"),
            api_key: None,
            language: String::from("en"),
            sort_by: SortOrder::Relevancy,
            request_timeout_secs: 30,
            requests_per_minute: 30,
            user_agent: format!("sentiscope/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NewsApiConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            limits: QueryLimits::default(),
            forecast_horizon_days: 7,
            min_forecast_points: 3,
        }
    }
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            min_articles: 5,
            max_articles: 50,
            default_articles: 20,
            default_keyword: String::from("Pakistan economy"),
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self { market_terms: true }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8501)),
            enable_cors: false,
            enable_request_logging: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `SENTISCOPE_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(key) = std::env::var("NEWSAPI_API_KEY").or_else(|_| std::env::var("SENTISCOPE_API_KEY")) {
            if !key.trim().is_empty() {
                self.news.api_key = Some(key.trim().to_string());
            }
        }

        if let Ok(url) = std::env::var("SENTISCOPE_NEWSAPI_URL") {
            self.news.base_url = url;
        }

        if let Some(timeout) = std::env::var("SENTISCOPE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.news.request_timeout_secs = timeout;
        }

        if let Some(horizon) = std::env::var("SENTISCOPE_FORECAST_HORIZON")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            self.pipeline.forecast_horizon_days = horizon;
        }

        if let Ok(keyword) = std::env::var("SENTISCOPE_DEFAULT_KEYWORD") {
            self.pipeline.limits.default_keyword = keyword;
        }

        if let Some(enabled) = std::env::var("SENTISCOPE_MARKET_TERMS")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
        {
            self.sentiment.market_terms = enabled;
        }

        if let Ok(addr) = std::env::var("SENTISCOPE_BIND") {
            self.server.bind_address = addr
                .parse()
                .with_context(|| format!("Invalid SENTISCOPE_BIND address: {addr}"))?;
        }

        if let Ok(level) = std::env::var("SENTISCOPE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("SENTISCOPE_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.news.base_url)
            .with_context(|| format!("news.base_url is not a valid URL: {}", self.news.base_url))?;

        if self.news.language.trim().is_empty() {
            anyhow::bail!("news.language must not be empty");
        }

        if self.news.requests_per_minute == 0 {
            anyhow::bail!("news.requests_per_minute must be greater than 0");
        }

        if self.news.request_timeout_secs == 0 {
            anyhow::bail!("news.request_timeout_secs must be greater than 0");
        }

        let limits = &self.pipeline.limits;
        if limits.min_articles == 0 {
            anyhow::bail!("pipeline.limits.min_articles must be greater than 0");
        }

        if limits.min_articles > limits.max_articles {
            anyhow::bail!("pipeline.limits.min_articles must not exceed max_articles");
        }

        if !(limits.min_articles..=limits.max_articles).contains(&limits.default_articles) {
            anyhow::bail!("pipeline.limits.default_articles must lie within [min_articles, max_articles]");
        }

        if limits.default_keyword.trim().is_empty() {
            anyhow::bail!("pipeline.limits.default_keyword must not be empty");
        }

        if self.pipeline.forecast_horizon_days == 0 {
            anyhow::bail!("pipeline.forecast_horizon_days must be greater than 0");
        }

        if self.pipeline.min_forecast_points < 2 {
            anyhow::bail!("pipeline.min_forecast_points must be at least 2");
        }

        Ok(())
    }
}
