//! sentiscope - News sentiment trend and forecast dashboard
//!
//! Fetches recent news articles for a keyword, scores each headline's
//! sentiment, aggregates the scores per day and extrapolates a short-term
//! forecast.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`news`] - Article search providers (NewsAPI)
//! - [`sentiment`] - VADER headline sentiment scoring
//! - [`analytics`] - Annotation and daily aggregation
//! - [`forecast`] - Trend and weekly seasonality forecasting
//! - [`pipeline`] - One run from query to render model
//! - [`render`] - SVG charts, HTML dashboard and text reports
//! - [`server`] - axum dashboard server
//! - [`metrics`] - Prometheus metrics
//! - [`utils`] - Common utilities and domain errors
//!
//! # Example
//!
//! ```no_run
//! use sentiscope::config::Config;
//! use sentiscope::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = Pipeline::from_config(&config)?;
//!     let query = pipeline.collect_query(Some("stock market"), Some(20));
//!     let model = pipeline.run(&query).await?;
//!     println!("{}", sentiscope::render::render_report(&model));
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod news;
pub mod pipeline;
pub mod render;
pub mod sentiment;
pub mod server;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, ErrorClassification, Result};
    pub use crate::forecast::{Forecaster, TrendForecaster};
    pub use crate::models::{AnnotatedArticle, DailyAggregate, ForecastPoint, Query, RawArticle};
    pub use crate::news::{ArticleSearch, NewsApiClient};
    pub use crate::pipeline::{ForecastOutcome, Pipeline, RenderModel};
    pub use crate::sentiment::{SentimentScorer, VaderAnalyzer};
}

// Direct re-exports for convenience
pub use models::{AnnotatedArticle, DailyAggregate, ForecastPoint, Query, RawArticle};
pub use pipeline::{ForecastOutcome, Pipeline, RenderModel};
