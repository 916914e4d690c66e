//! Dashboard HTTP server (axum)

pub mod api;
#[allow(clippy::module_inception)]
pub mod server;

pub use api::{create_router, AnalyzeParams, ApiResponse, ErrorResponse, HealthResponse};
pub use server::{shutdown_signal, AppState, DashboardServer, ServerError, ServerInfo};
