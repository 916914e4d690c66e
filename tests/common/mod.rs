//! Common test utilities

use async_trait::async_trait;
use sentiscope::config::PipelineConfig;
use sentiscope::forecast::TrendForecaster;
use sentiscope::models::{RawArticle, SearchRequest};
use sentiscope::news::{ArticleSearch, NewsApiClient};
use sentiscope::pipeline::Pipeline;
use sentiscope::sentiment::VaderAnalyzer;
use sentiscope::utils::error::FetchError;
use serde_json::{json, Value};
use std::sync::Arc;

/// Build a NewsAPI `/v2/everything` success body
#[allow(dead_code)]
pub fn everything_body(articles: &[(&str, &str)]) -> Value {
    let articles: Vec<Value> = articles
        .iter()
        .enumerate()
        .map(|(i, (published_at, title))| {
            json!({
                "source": { "id": null, "name": "Test Wire" },
                "author": null,
                "title": title,
                "description": null,
                "url": format!("https://news.example.com/{i}"),
                "publishedAt": published_at,
                "content": null
            })
        })
        .collect();

    json!({
        "status": "ok",
        "totalResults": articles.len(),
        "articles": articles
    })
}

/// NewsAPI error body
#[allow(dead_code)]
pub fn error_body(code: &str, message: &str) -> Value {
    json!({ "status": "error", "code": code, "message": message })
}

/// Search provider returning a fixed article list
#[allow(dead_code)]
pub struct StubSearch {
    pub result: Result<Vec<RawArticle>, fn() -> FetchError>,
}

#[allow(dead_code)]
impl StubSearch {
    pub fn articles(articles: &[(&str, &str)]) -> Self {
        Self {
            result: Ok(articles
                .iter()
                .map(|(published_at, title)| RawArticle::new(*published_at, *title))
                .collect()),
        }
    }

    pub fn failing(make: fn() -> FetchError) -> Self {
        Self { result: Err(make) }
    }
}

#[async_trait]
impl ArticleSearch for StubSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawArticle>, FetchError> {
        match &self.result {
            Ok(articles) => Ok(articles
                .iter()
                .take(request.page_size as usize)
                .cloned()
                .collect()),
            Err(make) => Err(make()),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Pipeline with default scorer and forecaster around a search provider
#[allow(dead_code)]
pub fn pipeline_with(search: impl ArticleSearch + 'static) -> Pipeline {
    Pipeline::new(
        Arc::new(search),
        Arc::new(VaderAnalyzer::new()),
        Arc::new(TrendForecaster::default()),
        PipelineConfig::default(),
    )
}

/// Pipeline talking to a mock NewsAPI server
#[allow(dead_code)]
pub fn pipeline_for_server(uri: &str, api_key: &str) -> Pipeline {
    pipeline_with(NewsApiClient::with_base_url(uri, api_key).unwrap())
}
