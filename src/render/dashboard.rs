//! HTML dashboard rendering with the Handlebars template engine

use handlebars::Handlebars;
use serde::Serialize;

use super::chart::{forecast_chart, trend_chart};
use crate::config::QueryLimits;
use crate::error::Result;
use crate::models::{AnnotatedArticle, Query};
use crate::pipeline::RenderModel;

/// Dashboard page template
const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.hbs");

/// Page heading
pub const DASHBOARD_TITLE: &str = "Business & Stock Market Sentiment Forecasting";

/// One table row
#[derive(Debug, Serialize)]
struct RowData {
    date: String,
    title: String,
    source: String,
    url: Option<String>,
    sentiment: String,
}

impl From<&AnnotatedArticle> for RowData {
    fn from(article: &AnnotatedArticle) -> Self {
        Self {
            date: article.published_date.format("%Y-%m-%d").to_string(),
            title: article.title.clone(),
            source: article.source.clone().unwrap_or_default(),
            url: article.url.clone().filter(|u| is_http_url(u)),
            sentiment: format!("{:.3}", article.sentiment),
        }
    }
}

/// Template data for the whole page
#[derive(Debug, Serialize)]
struct PageData {
    title: &'static str,
    query: String,
    count: u32,
    default_keyword: String,
    min_articles: u32,
    max_articles: u32,
    error: Option<String>,
    trend_svg: String,
    forecast_svg: Option<String>,
    forecast_notice: Option<&'static str>,
    skipped: usize,
    rows: Vec<RowData>,
}

impl PageData {
    fn form(query: &Query, limits: &QueryLimits) -> Self {
        Self {
            title: DASHBOARD_TITLE,
            query: query.text.clone(),
            count: query.article_count,
            default_keyword: limits.default_keyword.clone(),
            min_articles: limits.min_articles,
            max_articles: limits.max_articles,
            error: None,
            trend_svg: String::new(),
            forecast_svg: None,
            forecast_notice: None,
            skipped: 0,
            rows: Vec::new(),
        }
    }
}

/// Links only point at web pages
fn is_http_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Dashboard renderer
pub struct DashboardRenderer<'a> {
    handlebars: Handlebars<'a>,
    limits: QueryLimits,
}

impl<'a> DashboardRenderer<'a> {
    /// Create a renderer with the built-in template
    pub fn new(limits: QueryLimits) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("dashboard", DASHBOARD_TEMPLATE)?;

        Ok(Self { handlebars, limits })
    }

    /// Render a completed run: both charts (or the forecast notice) and the table
    pub fn render(&self, model: &RenderModel) -> Result<String> {
        let mut data = PageData::form(&model.query, &self.limits);

        data.trend_svg = trend_chart(&model.trend).render_svg();
        data.forecast_svg = model
            .forecast
            .points()
            .map(|points| forecast_chart(points, &model.daily).render_svg());
        data.forecast_notice = model.forecast.notice();
        data.skipped = model.skipped_articles;
        data.rows = model.table.iter().map(RowData::from).collect();

        Ok(self.handlebars.render("dashboard", &data)?)
    }

    /// Render the form and an error notice; no charts and no table
    pub fn render_error(&self, query: &Query, message: &str) -> Result<String> {
        let mut data = PageData::form(query, &self.limits);
        data.error = Some(message.to_string());

        Ok(self.handlebars.render("dashboard", &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ForecastOutcome;
    use chrono::NaiveDate;

    fn renderer() -> DashboardRenderer<'static> {
        DashboardRenderer::new(QueryLimits::default()).unwrap()
    }

    fn article(day: u32, title: &str, sentiment: f64) -> AnnotatedArticle {
        AnnotatedArticle {
            published_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            title: title.to_string(),
            sentiment,
            source: Some("Dawn".to_string()),
            url: Some(format!("https://example.com/{day}")),
        }
    }

    fn model(forecast: ForecastOutcome) -> RenderModel {
        let table = vec![article(2, "Economy grows 5%", 0.4), article(1, "Economy in crisis", -0.6)];
        RenderModel {
            query: Query { text: "economy".into(), article_count: 20 },
            trend: crate::analytics::trend_series(&table),
            daily: crate::analytics::aggregate_daily(&table),
            forecast,
            table,
            skipped_articles: 0,
        }
    }

    #[test]
    fn test_render_page_with_notice() {
        let html = renderer()
            .render(&model(ForecastOutcome::InsufficientData { distinct_dates: 2 }))
            .unwrap();

        assert!(html.contains(DASHBOARD_TITLE.replace('&', "&amp;").as_str()));
        assert!(html.contains("Sentiment Trend for"));
        assert!(html.contains(ForecastOutcome::NOTICE));
        assert!(html.contains("0.400"));
        assert!(html.contains("-0.600"));
        assert!(html.contains("href=\"https://example.com/2\""));

        // Table keeps fetch order
        let grows = html.find("Economy grows 5%").unwrap();
        let crisis = html.find("Economy in crisis").unwrap();
        assert!(grows < crisis);
    }

    #[test]
    fn test_render_error_page_has_only_form_and_notice() {
        let query = Query { text: "economy".into(), article_count: 20 };
        let html = renderer().render_error(&query, "The API key was rejected").unwrap();

        assert!(html.contains("The API key was rejected"));
        assert!(html.contains("name=\"q\""));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let mut model = model(ForecastOutcome::InsufficientData { distinct_dates: 2 });
        model.table[0].title = "<b>bold</b>".into();
        let html = renderer().render(&model).unwrap();
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_non_http_links_are_dropped() {
        let mut article = article(1, "x", 0.0);
        article.url = Some("javascript:alert(1)".into());
        assert_eq!(RowData::from(&article).url, None);
    }
}
