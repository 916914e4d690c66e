//! End-to-end pipeline tests
//!
//! Runs complete queries through the pipeline with a stub search provider
//! or a mock NewsAPI server.

mod common;

use chrono::{Days, NaiveDate};
use common::{error_body, everything_body, pipeline_for_server, pipeline_with, StubSearch};
use sentiscope::pipeline::ForecastOutcome;
use sentiscope::utils::error::FetchError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Two headlines of opposite polarity on the same date
#[tokio::test]
async fn test_opposite_headlines_on_one_date() {
    let pipeline = pipeline_with(StubSearch::articles(&[
        ("2024-05-01T09:00:00Z", "Economy grows 5%"),
        ("2024-05-01T15:00:00Z", "Economy in crisis"),
    ]));
    let query = pipeline.collect_query(Some("economy"), Some(10));
    let model = pipeline.run(&query).await.unwrap();

    assert_eq!(model.table.len(), 2);
    let grows = model.table[0].sentiment;
    let crisis = model.table[1].sentiment;
    assert!(grows > 0.0, "expected positive score, got {grows}");
    assert!(crisis < 0.0, "expected negative score, got {crisis}");

    assert_eq!(model.daily.len(), 1);
    let mean = model.daily[0].mean_sentiment;
    assert!(crisis < mean && mean < grows);
    assert!((mean - (grows + crisis) / 2.0).abs() < 1e-9);

    // A single date cannot be forecast
    assert_eq!(
        model.forecast,
        ForecastOutcome::InsufficientData { distinct_dates: 1 }
    );
    assert_eq!(model.forecast.notice(), Some(ForecastOutcome::NOTICE));
}

/// Exactly two distinct dates yields the notice
#[tokio::test]
async fn test_two_dates_is_insufficient() {
    let pipeline = pipeline_with(StubSearch::articles(&[
        ("2024-05-01T09:00:00Z", "Stocks rally"),
        ("2024-05-02T09:00:00Z", "Stocks slump"),
        ("2024-05-02T12:00:00Z", "Investors cautious"),
    ]));
    let query = pipeline.collect_query(Some("stocks"), Some(10));
    let model = pipeline.run(&query).await.unwrap();

    assert_eq!(model.daily.len(), 2);
    assert!(model.forecast.points().is_none());
    assert_eq!(model.forecast.notice(), Some(ForecastOutcome::NOTICE));
}

/// Three distinct dates invoke the model and extend seven days past the last date
#[tokio::test]
async fn test_three_dates_forecast_horizon() {
    let pipeline = pipeline_with(StubSearch::articles(&[
        ("2024-05-03T09:00:00Z", "Markets slide"),
        ("2024-05-01T09:00:00Z", "Strong growth lifts markets"),
        ("2024-05-02T09:00:00Z", "Exports improve"),
    ]));
    let query = pipeline.collect_query(Some("markets"), Some(10));
    let model = pipeline.run(&query).await.unwrap();

    assert_eq!(model.daily.len(), 3);
    let points = model.forecast.points().expect("forecast should be produced");

    let first = points.first().unwrap().date;
    let last = points.last().unwrap().date;
    assert_eq!(first, date("2024-05-01"));
    assert_eq!(last, date("2024-05-03").checked_add_days(Days::new(7)).unwrap());
    assert_eq!(points.len(), 3 + 7);
    assert!(points.iter().all(|p| p.date >= date("2024-05-01")));
    assert!(points.windows(2).all(|w| w[0].date < w[1].date));
}

/// Trend view is sorted by date while the table keeps fetch order
#[tokio::test]
async fn test_trend_sorted_table_in_fetch_order() {
    let pipeline = pipeline_with(StubSearch::articles(&[
        ("2024-05-03T09:00:00Z", "Third"),
        ("2024-05-01T09:00:00Z", "First"),
        ("2024-05-02T09:00:00Z", "Second"),
    ]));
    let query = pipeline.collect_query(Some("order"), Some(10));
    let model = pipeline.run(&query).await.unwrap();

    let table: Vec<&str> = model.table.iter().map(|a| a.title.as_str()).collect();
    let trend: Vec<&str> = model.trend.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(table, ["Third", "First", "Second"]);
    assert_eq!(trend, ["First", "Second", "Third"]);
}

/// Malformed timestamps are dropped, the rest of the run continues
#[tokio::test]
async fn test_malformed_dates_are_skipped() {
    let pipeline = pipeline_with(StubSearch::articles(&[
        ("2024-05-01T09:00:00Z", "Valid headline"),
        ("yesterday", "Bad timestamp"),
        ("", "Missing timestamp"),
        ("2024-13-45T00:00:00Z", "Impossible date"),
    ]));
    let query = pipeline.collect_query(Some("economy"), Some(10));
    let model = pipeline.run(&query).await.unwrap();

    assert_eq!(model.table.len(), 1);
    assert_eq!(model.skipped_articles, 3);
    assert_eq!(model.table[0].title, "Valid headline");
}

/// No articles at all
#[tokio::test]
async fn test_empty_result() {
    let pipeline = pipeline_with(StubSearch::articles(&[]));
    let query = pipeline.collect_query(Some("nothing"), Some(10));
    let model = pipeline.run(&query).await.unwrap();

    assert!(model.table.is_empty());
    assert!(model.trend.is_empty());
    assert!(model.daily.is_empty());
    assert_eq!(
        model.forecast,
        ForecastOutcome::InsufficientData { distinct_dates: 0 }
    );
}

/// Annotating the same input twice yields the same output
#[tokio::test]
async fn test_runs_are_deterministic() {
    let articles = [
        ("2024-05-01T09:00:00Z", "Economy grows 5%"),
        ("2024-05-02T09:00:00Z", "Economy in crisis!!"),
        ("2024-05-03T09:00:00Z", "Markets are NOT good"),
        ("2024-05-04T09:00:00Z", "Stocks surge but inflation worries remain"),
    ];
    let pipeline = pipeline_with(StubSearch::articles(&articles));
    let query = pipeline.collect_query(Some("economy"), Some(10));

    let first = pipeline.run(&query).await.unwrap();
    let second = pipeline.run(&query).await.unwrap();
    assert_eq!(first, second);
}

/// Empty keyword and a low count collect into the placeholder and the minimum
#[tokio::test]
async fn test_query_defaults_reach_the_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "Pakistan economy"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(everything_body(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for_server(&mock_server.uri(), "test-key");
    let query = pipeline.collect_query(Some(""), Some(3));
    assert_eq!(query.text, "Pakistan economy");
    assert_eq!(query.article_count, 5);

    let model = pipeline.run(&query).await.unwrap();
    assert!(model.table.is_empty());
}

/// A rejected credential aborts the run with no partial result
#[tokio::test]
async fn test_rejected_credential_aborts_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_body("apiKeyInvalid", "Your API key is invalid.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for_server(&mock_server.uri(), "revoked");
    let query = pipeline.collect_query(Some("economy"), Some(20));
    let result = pipeline.run(&query).await;

    assert!(matches!(result, Err(FetchError::InvalidCredential(_))));
}

/// Provider failures from any search implementation propagate unchanged
#[tokio::test]
async fn test_stub_failure_propagates() {
    let pipeline = pipeline_with(StubSearch::failing(|| FetchError::Timeout));
    let query = pipeline.collect_query(Some("economy"), None);

    assert!(matches!(pipeline.run(&query).await, Err(FetchError::Timeout)));
}

/// Fetched rows never exceed the clamped count
#[tokio::test]
async fn test_fetch_bounded_by_count() {
    let rows: Vec<(String, String)> = (0..60)
        .map(|i| (format!("2024-05-{:02}T00:00:00Z", 1 + i % 28), format!("Headline {i}")))
        .collect();
    let rows: Vec<(&str, &str)> = rows.iter().map(|(d, t)| (d.as_str(), t.as_str())).collect();
    let pipeline = pipeline_with(StubSearch::articles(&rows));

    for requested in [1_i64, 5, 17, 50, 99] {
        let query = pipeline.collect_query(Some("economy"), Some(requested));
        let model = pipeline.run(&query).await.unwrap();
        assert!(model.table.len() <= query.article_count as usize);
        assert!((5..=50).contains(&query.article_count));
    }
}
