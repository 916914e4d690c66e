//! Rendering of a completed run
//!
//! - [`chart`] - SVG line charts for the trend and forecast views
//! - [`dashboard`] - HTML page via Handlebars
//! - [`text`] - plain-text report for the CLI

pub mod chart;
pub mod dashboard;
pub mod text;

pub use chart::{forecast_chart, trend_chart, Band, LineChart, Series};
pub use dashboard::{DashboardRenderer, DASHBOARD_TITLE};
pub use text::{render_report, render_table};
