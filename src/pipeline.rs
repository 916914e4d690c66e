//! Pipeline orchestration
//!
//! One run is strictly sequential:
//!
//! ```text
//! Query -> ArticleSearch -> annotate -> trend_series
//!                                    -> aggregate_daily -> Forecaster
//! ```
//!
//! The only network call is the article search. Everything after it is a pure
//! transformation, so a [`RenderModel`] can be rendered by any shell (HTML
//! dashboard, JSON API or CLI).

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::analytics::{aggregate_daily, annotate, trend_series};
use crate::config::{Config, NewsApiConfig, PipelineConfig};
use crate::error::ErrorClassification;
use crate::forecast::{Forecaster, TrendForecaster};
use crate::metrics;
use crate::models::{AnnotatedArticle, DailyAggregate, ForecastPoint, Query, SearchRequest, SortOrder};
use crate::news::{ArticleSearch, NewsApiClient};
use crate::sentiment::{SentimentScorer, VaderAnalyzer};
use crate::utils::error::FetchError;

/// Outcome of the forecast stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    /// Historical dates plus the horizon, ascending
    Forecast { points: Vec<ForecastPoint> },

    /// Too few distinct dates to fit a model
    InsufficientData { distinct_dates: usize },

    /// The model rejected the series
    Failed { reason: String },
}

impl ForecastOutcome {
    /// Notice shown instead of the forecast chart
    pub const NOTICE: &'static str =
        "Not enough data points to forecast sentiment. Try increasing the number of articles.";

    /// Forecast points, if the model produced any
    pub fn points(&self) -> Option<&[ForecastPoint]> {
        match self {
            Self::Forecast { points } => Some(points.as_slice()),
            _ => None,
        }
    }

    /// Warning text for the non-forecast outcomes
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Forecast { .. } => None,
            Self::InsufficientData { .. } | Self::Failed { .. } => Some(Self::NOTICE),
        }
    }

    fn metric_label(&self) -> &'static str {
        match self {
            Self::Forecast { .. } => "fitted",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Everything a shell needs to draw one dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub query: Query,

    /// Annotated articles sorted by date, for the trend chart
    pub trend: Vec<AnnotatedArticle>,

    /// Mean sentiment per date
    pub daily: Vec<DailyAggregate>,

    pub forecast: ForecastOutcome,

    /// Annotated articles in fetch order, for the table
    pub table: Vec<AnnotatedArticle>,

    /// Articles dropped because of malformed timestamps
    pub skipped_articles: usize,
}

/// The sentiment pipeline and its collaborators
#[derive(Clone)]
pub struct Pipeline {
    search: Arc<dyn ArticleSearch>,
    scorer: Arc<dyn SentimentScorer>,
    forecaster: Arc<dyn Forecaster>,
    settings: PipelineConfig,
    language: String,
    sort_by: SortOrder,
}

impl Pipeline {
    /// Assemble a pipeline from explicit collaborators
    pub fn new(
        search: Arc<dyn ArticleSearch>,
        scorer: Arc<dyn SentimentScorer>,
        forecaster: Arc<dyn Forecaster>,
        settings: PipelineConfig,
    ) -> Self {
        let defaults = NewsApiConfig::default();
        Self {
            search,
            scorer,
            forecaster,
            settings,
            language: defaults.language,
            sort_by: defaults.sort_by,
        }
    }

    /// Override the search language and ordering
    #[must_use]
    pub fn with_search_options(mut self, language: impl Into<String>, sort_by: SortOrder) -> Self {
        self.language = language.into();
        self.sort_by = sort_by;
        self
    }

    /// Build the default pipeline (NewsAPI, VADER analyzer, trend model)
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured or the HTTP client cannot be built
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let search = NewsApiClient::from_config(&config.news)?;

        Ok(Self::new(
            Arc::new(search),
            Arc::new(VaderAnalyzer::from_config(&config.sentiment)),
            Arc::new(TrendForecaster::default()),
            config.pipeline.clone(),
        )
        .with_search_options(config.news.language.clone(), config.news.sort_by))
    }

    /// Pipeline settings
    pub fn settings(&self) -> &PipelineConfig {
        &self.settings
    }

    /// Collect a query with this pipeline's limits
    pub fn collect_query(&self, text: Option<&str>, article_count: Option<i64>) -> Query {
        Query::collect(text, article_count, &self.settings.limits)
    }

    /// Execute one run
    ///
    /// # Errors
    ///
    /// A [`FetchError`] aborts the run; nothing downstream executes.
    pub async fn run(&self, query: &Query) -> Result<RenderModel, FetchError> {
        let started = Instant::now();
        tracing::info!(
            query = %query.text,
            article_count = query.article_count,
            provider = self.search.name(),
            "Starting sentiment pipeline run"
        );

        let request = SearchRequest {
            query: query.text.clone(),
            language: self.language.clone(),
            sort_by: self.sort_by,
            page_size: query.article_count,
        };

        let fetched = {
            let _timer = metrics::start_fetch_timer(self.search.name());
            self.search.search(&request).await
        };

        let mut articles = match fetched {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!(
                    query = %query.text,
                    error = %e,
                    recoverable = e.is_recoverable(),
                    "Article search failed"
                );
                metrics::record_run("fetch_error");
                return Err(e);
            }
        };

        // Providers are asked for at most page_size, but do not trust them
        let limit = usize::try_from(query.article_count).unwrap_or(usize::MAX);
        articles.truncate(limit);

        let annotation = annotate(&articles, self.scorer.as_ref());
        metrics::record_articles(articles.len(), annotation.skipped.len());
        tracing::debug!(
            fetched = articles.len(),
            annotated = annotation.articles.len(),
            skipped = annotation.skipped.len(),
            "Annotated headlines"
        );

        let trend = trend_series(&annotation.articles);
        let daily = aggregate_daily(&annotation.articles);
        tracing::debug!(distinct_dates = daily.len(), "Aggregated daily sentiment");

        let forecast = self.forecast_stage(&daily);
        metrics::record_forecast(forecast.metric_label());
        metrics::record_run("ok");

        tracing::info!(
            query = %query.text,
            articles = annotation.articles.len(),
            distinct_dates = daily.len(),
            forecast = forecast.metric_label(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Sentiment pipeline run complete"
        );

        Ok(RenderModel {
            query: query.clone(),
            trend,
            daily,
            forecast,
            skipped_articles: annotation.skipped.len(),
            table: annotation.articles,
        })
    }

    /// Apply the minimum-dates precondition and run the forecaster
    pub fn forecast_stage(&self, daily: &[DailyAggregate]) -> ForecastOutcome {
        if daily.len() < self.settings.min_forecast_points {
            tracing::warn!(
                distinct_dates = daily.len(),
                required = self.settings.min_forecast_points,
                "Not enough distinct dates to forecast"
            );
            return ForecastOutcome::InsufficientData {
                distinct_dates: daily.len(),
            };
        }

        match self
            .forecaster
            .forecast(daily, self.settings.forecast_horizon_days)
        {
            Ok(points) => ForecastOutcome::Forecast { points },
            Err(e) => {
                tracing::warn!(
                    model = self.forecaster.name(),
                    error = %e,
                    "Forecast model failed"
                );
                ForecastOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
