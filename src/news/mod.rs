//! Article search providers
//!
//! The pipeline only depends on the [`ArticleSearch`] capability; the NewsAPI
//! client is one implementation of it.

pub mod newsapi;

use async_trait::async_trait;

use crate::models::{RawArticle, SearchRequest};
use crate::utils::error::FetchError;

pub use newsapi::NewsApiClient;

/// Capability: search articles by query
#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Run one search and return at most `request.page_size` articles in provider order
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawArticle>, FetchError>;

    /// Short provider name used in logs and metrics
    fn name(&self) -> &'static str;
}
