// Core data structures for the sentiment pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::QueryLimits;

/// Validated user input for a single pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free-text search keyword (never empty)
    pub text: String,

    /// Upper bound on fetched articles, clamped into the configured range
    pub article_count: u32,
}

impl Query {
    /// Collect a query from raw user input
    ///
    /// Never fails: an empty or missing keyword falls back to the configured
    /// placeholder, a missing count to the configured default, and any count
    /// outside `[min_articles, max_articles]` is clamped.
    #[must_use]
    pub fn collect(text: Option<&str>, article_count: Option<i64>, limits: &QueryLimits) -> Self {
        let text = text
            .map(crate::utils::normalize_whitespace)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| limits.default_keyword.clone());

        let requested = article_count.unwrap_or(i64::from(limits.default_articles));
        let clamped = requested.clamp(
            i64::from(limits.min_articles),
            i64::from(limits.max_articles),
        );

        Self {
            text,
            // Clamped into a u32 range above
            article_count: u32::try_from(clamped).unwrap_or(limits.default_articles),
        }
    }

    /// Collect a query where the count arrives as unparsed text (form fields)
    #[must_use]
    pub fn collect_raw(text: Option<&str>, article_count: Option<&str>, limits: &QueryLimits) -> Self {
        let count = article_count.and_then(|raw| raw.trim().parse::<i64>().ok());
        Self::collect(text, count, limits)
    }
}

/// Article ordering requested from the search provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Relevancy,
    Popularity,
    PublishedAt,
}

impl SortOrder {
    /// Wire value for the `sortBy` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevancy => "relevancy",
            Self::Popularity => "popularity",
            Self::PublishedAt => "publishedAt",
        }
    }
}

/// Parameters for one article search call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub language: String,
    pub sort_by: SortOrder,
    pub page_size: u32,
}

/// Article record as returned by the search provider, in provider order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawArticle {
    /// ISO-8601-like timestamp; the first ten characters are the date
    pub published_at: String,
    pub title: String,
    pub source: Option<String>,
    pub url: Option<String>,
}

impl RawArticle {
    /// Create an article with just a timestamp and title
    pub fn new(published_at: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            published_at: published_at.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Article with its parsed date and headline sentiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedArticle {
    pub published_date: NaiveDate,
    pub title: String,
    /// Compound score in [-1, 1]
    pub sentiment: f64,
    pub source: Option<String>,
    pub url: Option<String>,
}

/// Mean sentiment of all articles published on one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub mean_sentiment: f64,
    pub article_count: usize,
}

/// Model estimate for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_sentiment: f64,
    /// Lower edge of the uncertainty band
    pub lower: f64,
    /// Upper edge of the uncertainty band
    pub upper: f64,
}
