//! Prometheus metrics for the sentiment pipeline and dashboard
//!
//! This module provides metrics tracking for:
//! - Pipeline runs by outcome
//! - Articles fetched and skipped
//! - Forecast outcomes
//! - Article search latency
//! - Dashboard requests
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter, register_counter_vec, register_histogram_vec, Counter, CounterVec, Encoder,
    HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all pipeline metrics
struct PipelineMetrics {
    runs: CounterVec,
    articles_fetched: Counter,
    articles_skipped: Counter,
    forecasts: CounterVec,
    fetch_duration: HistogramVec,
    http_requests: CounterVec,
}

/// Global storage for pipeline metrics
static PIPELINE_METRICS: OnceLock<PipelineMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// This function should be called once at application startup.
/// If metric registration fails, errors are logged by the caller and
/// subsequent metric operations become no-ops.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = sentiscope::metrics::init_metrics() {
///     eprintln!("Warning: Metrics initialization failed: {}", e);
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    // Prevent double initialization
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = PipelineMetrics {
        runs: register_counter_vec!(
            "sentiscope_pipeline_runs_total",
            "Total pipeline runs by outcome",
            &["outcome"]
        )?,
        articles_fetched: register_counter!(
            "sentiscope_articles_fetched_total",
            "Total articles returned by the search provider"
        )?,
        articles_skipped: register_counter!(
            "sentiscope_articles_skipped_total",
            "Total articles dropped because of malformed timestamps"
        )?,
        forecasts: register_counter_vec!(
            "sentiscope_forecasts_total",
            "Total forecast attempts by outcome",
            &["outcome"]
        )?,
        fetch_duration: register_histogram_vec!(
            "sentiscope_fetch_duration_seconds",
            "Article search latency in seconds",
            &["provider"],
            vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
        )?,
        http_requests: register_counter_vec!(
            "sentiscope_http_requests_total",
            "Dashboard requests by endpoint and status",
            &["endpoint", "status"]
        )?,
    };

    PIPELINE_METRICS
        .set(metrics)
        .map_err(|_| "Pipeline metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record the outcome of a pipeline run (`ok` or `fetch_error`)
pub fn record_run(outcome: &str) {
    if let Some(m) = PIPELINE_METRICS.get() {
        m.runs.with_label_values(&[outcome]).inc();
    }
}

/// Record fetched and skipped article counts
pub fn record_articles(fetched: usize, skipped: usize) {
    let Some(m) = PIPELINE_METRICS.get() else {
        return;
    };

    if fetched > 0 {
        m.articles_fetched.inc_by(fetched as f64);
    }
    if skipped > 0 {
        m.articles_skipped.inc_by(skipped as f64);
    }
}

/// Record a forecast outcome (`fitted`, `insufficient_data` or `failed`)
pub fn record_forecast(outcome: &str) {
    if let Some(m) = PIPELINE_METRICS.get() {
        m.forecasts.with_label_values(&[outcome]).inc();
    }
}

/// Record a dashboard request
pub fn record_http_request(endpoint: &str, status: u16) {
    if let Some(m) = PIPELINE_METRICS.get() {
        let status_str = status.to_string();
        m.http_requests
            .with_label_values(&[endpoint, status_str.as_str()])
            .inc();
    }
}

/// Histogram timer guard that records duration on drop
pub struct MetricsTimer {
    timer: Option<prometheus::HistogramTimer>,
}

impl MetricsTimer {
    fn new(timer: prometheus::HistogramTimer) -> Self {
        Self { timer: Some(timer) }
    }

    /// Create a no-op timer when metrics are not initialized
    fn noop() -> Self {
        Self { timer: None }
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop_and_record();
        }
    }
}

/// Start a fetch timer for a search provider
pub fn start_fetch_timer(provider: &str) -> MetricsTimer {
    match PIPELINE_METRICS.get() {
        Some(m) => MetricsTimer::new(
            m.fetch_duration
                .with_label_values(&[provider])
                .start_timer(),
        ),
        None => MetricsTimer::noop(),
    }
}

// ============================================================================
// Tests
// ============================================================================
