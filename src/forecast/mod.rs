//! Forecasting of the daily sentiment series
//!
//! The pipeline depends on the [`Forecaster`] capability only. The default
//! model is [`TrendForecaster`].

pub mod trend;

use crate::models::{DailyAggregate, ForecastPoint};
use crate::utils::error::ForecastError;

pub use trend::TrendForecaster;

/// Capability: fit a daily series and forecast it
pub trait Forecaster: Send + Sync {
    /// Fit `series` (ascending, one row per date) and predict every historical
    /// date plus `horizon_days` consecutive days after the last one
    fn forecast(
        &self,
        series: &[DailyAggregate],
        horizon_days: u32,
    ) -> Result<Vec<ForecastPoint>, ForecastError>;

    /// Short model name used in logs
    fn name(&self) -> &'static str;
}
