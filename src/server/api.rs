//! HTTP handlers for the dashboard server
//!
//! Routes:
//! - `GET /` - HTML dashboard (`?q=<keyword>&count=<n>`)
//! - `GET /api/analyze` - the same run as JSON
//! - `GET /api/health` - liveness and uptime
//! - `GET /metrics` - Prometheus text exposition

use axum::{
    extract::{Query as QueryParams, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::ErrorClassification;
use crate::metrics;
use crate::models::Query;

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Dashboard query string; both fields are collected leniently
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    pub q: Option<String>,
    pub count: Option<String>,
}

impl AnalyzeParams {
    fn to_query(&self, state: &AppState) -> Query {
        Query::collect_raw(
            self.q.as_deref(),
            self.count.as_deref(),
            &state.pipeline.settings().limits,
        )
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the dashboard router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/analyze", get(analyze))
        .route("/api/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// HTML dashboard
async fn dashboard(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AnalyzeParams>,
) -> Response {
    let query = params.to_query(&state);

    let (status, page) = match state.pipeline.run(&query).await {
        Ok(model) => (StatusCode::OK, state.renderer.render(&model)),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            state.renderer.render_error(&query, &e.user_message()),
        ),
    };

    let response = match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render dashboard");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render dashboard").into_response()
        }
    };

    metrics::record_http_request("/", response.status().as_u16());
    response
}

/// JSON view of one run
async fn analyze(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AnalyzeParams>,
) -> Response {
    let query = params.to_query(&state);

    let response = match state.pipeline.run(&query).await {
        Ok(model) => (StatusCode::OK, Json(ApiResponse::success(model))).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(e.user_message())),
        )
            .into_response(),
    };

    metrics::record_http_request("/api/analyze", response.status().as_u16());
    response
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();

    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
    }))
}

/// Prometheus exposition
async fn metrics_endpoint() -> Response {
    match metrics::encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!("Failed to encode metrics: {e}"))),
        )
            .into_response(),
    }
}
