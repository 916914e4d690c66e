//! NewsAPI `/v2/everything` client
//!
//! This module provides the HTTP client used to fetch articles with
//! features including:
//! - Static API key sent in the `X-Api-Key` header
//! - Client-side throttling with governor
//! - Mapping of provider error codes onto [`FetchError`]
//!
//! Failed requests are never retried; the error is returned to the caller.

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client, StatusCode,
};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;

use super::ArticleSearch;
use crate::config::NewsApiConfig;
use crate::models::{RawArticle, SearchRequest};
use crate::utils::error::FetchError;

const EVERYTHING_PATH: &str = "/v2/everything";
const API_KEY_HEADER: &str = "X-Api-Key";

/// NewsAPI error codes that mean the credential itself was rejected
const CREDENTIAL_CODES: &[&str] = &[
    "apiKeyDisabled",
    "apiKeyExhausted",
    "apiKeyInvalid",
    "apiKeyMissing",
];

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<WireArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<WireSource>,
}

#[derive(Debug, Deserialize)]
struct WireSource {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<WireArticle> for RawArticle {
    fn from(article: WireArticle) -> Self {
        Self {
            published_at: article.published_at.unwrap_or_default(),
            title: article.title.unwrap_or_default(),
            source: article.source.and_then(|s| s.name),
            url: article.url,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// NewsAPI client
pub struct NewsApiClient {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    /// Base URL, e.g. `https://newsapi.org`
    base_url: String,

    /// Static API credential
    api_key: String,
}

impl NewsApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingCredential` if no API key is configured and
    /// `FetchError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &NewsApiConfig) -> Result<Self, FetchError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(FetchError::MissingCredential)?;

        Self::with_config(
            &config.base_url,
            &api_key,
            config.requests_per_minute,
            config.request_timeout(),
            &config.user_agent,
        )
    }

    /// Create a client with explicit settings
    ///
    /// # Arguments
    ///
    /// * `base_url` - Provider base URL (a mock server in tests)
    /// * `api_key` - Static API credential
    /// * `requests_per_minute` - Client-side throttle
    /// * `timeout` - Request timeout duration
    /// * `user_agent` - Value of the `User-Agent` header
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for an unparseable base URL and
    /// `FetchError::Http` if the HTTP client cannot be created
    pub fn with_config(
        base_url: &str,
        api_key: &str,
        requests_per_minute: u32,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        url::Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(agent) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .default_headers(headers)
            .build()?;

        let rate = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_minute(rate));

        Ok(Self {
            client,
            rate_limiter,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a client pointed at a custom base URL for testing
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, FetchError> {
        let defaults = NewsApiConfig::default();
        Self::with_config(
            base_url,
            api_key,
            600,
            defaults.request_timeout(),
            &defaults.user_agent,
        )
    }

    /// Full URL of the search endpoint
    fn endpoint(&self) -> String {
        format!("{}{EVERYTHING_PATH}", self.base_url)
    }

    /// Map a non-success status and its body onto a fetch error
    fn classify_failure(status: StatusCode, body: &str) -> FetchError {
        let wire: WireError = serde_json::from_str(body).unwrap_or_default();
        let code = wire.code.unwrap_or_else(|| status.as_str().to_string());
        let message = wire
            .message
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        if status == StatusCode::UNAUTHORIZED || CREDENTIAL_CODES.contains(&code.as_str()) {
            return FetchError::InvalidCredential(message);
        }

        if status == StatusCode::TOO_MANY_REQUESTS || code == "rateLimited" {
            return FetchError::RateLimit;
        }

        FetchError::Api {
            status: status.as_u16(),
            code,
            message,
        }
    }

    /// Decode a success body into articles, truncated to the page size
    fn decode_articles(body: &str, page_size: u32) -> Result<Vec<RawArticle>, FetchError> {
        let response: EverythingResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

        if response.status == "error" {
            let code = response.code.unwrap_or_default();
            if CREDENTIAL_CODES.contains(&code.as_str()) {
                return Err(FetchError::InvalidCredential(response.message.unwrap_or(code)));
            }
            if code == "rateLimited" {
                return Err(FetchError::RateLimit);
            }
            return Err(FetchError::Api {
                status: StatusCode::OK.as_u16(),
                code,
                message: response.message.unwrap_or_default(),
            });
        }

        let limit = usize::try_from(page_size).unwrap_or(usize::MAX);
        Ok(response
            .articles
            .into_iter()
            .take(limit)
            .map(RawArticle::from)
            .collect())
    }
}

#[async_trait]
impl ArticleSearch for NewsApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawArticle>, FetchError> {
        self.rate_limiter.until_ready().await;

        let page_size = request.page_size.to_string();
        let params = [
            ("q", request.query.as_str()),
            ("language", request.language.as_str()),
            ("sortBy", request.sort_by.as_str()),
            ("pageSize", page_size.as_str()),
        ];

        tracing::debug!(
            query = %request.query,
            language = %request.language,
            sort_by = request.sort_by.as_str(),
            page_size = request.page_size,
            "Requesting articles from NewsAPI"
        );

        let response = self
            .client
            .get(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { FetchError::Timeout } else { FetchError::Http(e) })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Decode(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(Self::classify_failure(status, &body));
        }

        Self::decode_articles(&body, request.page_size)
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}
