//! Additive trend + weekly seasonality model
//!
//! `yhat(t) = a + b·t + s(weekday)` where `t` is days since the first
//! observation, `a, b` come from ordinary least squares, and `s` is the mean
//! residual per weekday (centred to zero). Seasonality is only fitted when the
//! history spans at least two weeks, and only for weekdays seen at least twice.
//!
//! The uncertainty band is `yhat ± z·σ` with σ the residual standard deviation
//! and `z` the normal quantile for the configured interval width.

use chrono::{Datelike, Days, NaiveDate};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;

use super::Forecaster;
use crate::models::{DailyAggregate, ForecastPoint};
use crate::utils::error::ForecastError;

/// Minimum history span (days) before weekly seasonality is fitted
const WEEKLY_MIN_SPAN_DAYS: i64 = 14;

/// Minimum observations of a weekday before it gets its own effect
const WEEKLY_MIN_OBSERVATIONS: usize = 2;

/// Linear trend model with optional weekly seasonality
#[derive(Debug, Clone)]
pub struct TrendForecaster {
    /// Width of the uncertainty interval (0.8 = 80%)
    interval_width: f64,
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self { interval_width: 0.8 }
    }
}

/// Fitted model parameters
#[derive(Debug, Clone)]
struct FittedTrend {
    origin: NaiveDate,
    intercept: f64,
    slope: f64,
    weekly: [f64; 7],
    sigma: f64,
}

impl FittedTrend {
    fn predict(&self, date: NaiveDate) -> f64 {
        let t = (date - self.origin).num_days() as f64;
        let weekday = date.weekday().num_days_from_monday() as usize;
        self.intercept + self.slope * t + self.weekly[weekday]
    }
}

impl TrendForecaster {
    /// Create a model with a custom interval width in (0, 1)
    #[must_use]
    pub fn with_interval_width(interval_width: f64) -> Self {
        Self {
            interval_width: interval_width.clamp(0.01, 0.99),
        }
    }

    fn fit(&self, series: &[DailyAggregate]) -> Result<FittedTrend, ForecastError> {
        if series.len() < 2 {
            return Err(ForecastError::InsufficientData(2, series.len()));
        }

        if let Some(bad) = series.iter().find(|p| !p.mean_sentiment.is_finite()) {
            return Err(ForecastError::NonFinite(bad.date.to_string()));
        }

        let origin = series[0].date;
        let xs: Vec<f64> = series
            .iter()
            .map(|p| (p.date - origin).num_days() as f64)
            .collect();
        let ys: Vec<f64> = series.iter().map(|p| p.mean_sentiment).collect();

        let x_mean = xs.iter().mean();
        let y_mean = ys.iter().mean();

        let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
        if sxx == 0.0 {
            return Err(ForecastError::Degenerate(
                "all observations share one date".to_string(),
            ));
        }
        let sxy: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (x - x_mean) * (y - y_mean))
            .sum();

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let mut residuals: Vec<f64> = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| y - (intercept + slope * x))
            .collect();

        let span = (series[series.len() - 1].date - origin).num_days();
        let weekly = if span >= WEEKLY_MIN_SPAN_DAYS {
            weekly_effects(series, &residuals)
        } else {
            [0.0; 7]
        };

        for (residual, point) in residuals.iter_mut().zip(series) {
            *residual -= weekly[point.date.weekday().num_days_from_monday() as usize];
        }

        let sigma = (residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64).sqrt();

        Ok(FittedTrend {
            origin,
            intercept,
            slope,
            weekly,
            sigma,
        })
    }

    /// Normal quantile for the two-sided interval
    fn band_z(&self) -> Result<f64, ForecastError> {
        let normal = Normal::new(0.0, 1.0).map_err(|e| ForecastError::Degenerate(e.to_string()))?;
        Ok(normal.inverse_cdf(0.5 + self.interval_width / 2.0))
    }
}

/// Mean residual per weekday, centred over the weekdays that got an effect
fn weekly_effects(series: &[DailyAggregate], residuals: &[f64]) -> [f64; 7] {
    let mut sums = [0.0; 7];
    let mut counts = [0usize; 7];

    for (point, residual) in series.iter().zip(residuals) {
        let weekday = point.date.weekday().num_days_from_monday() as usize;
        sums[weekday] += residual;
        counts[weekday] += 1;
    }

    let mut effects = [0.0; 7];
    let mut fitted = Vec::new();
    for weekday in 0..7 {
        if counts[weekday] >= WEEKLY_MIN_OBSERVATIONS {
            effects[weekday] = sums[weekday] / counts[weekday] as f64;
            fitted.push(weekday);
        }
    }

    if fitted.len() < 2 {
        return [0.0; 7];
    }

    let centre = fitted.iter().map(|&w| effects[w]).mean();
    for &weekday in &fitted {
        effects[weekday] -= centre;
    }
    effects
}

impl Forecaster for TrendForecaster {
    fn forecast(
        &self,
        series: &[DailyAggregate],
        horizon_days: u32,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        let model = self.fit(series)?;
        let z = self.band_z()?;
        let half_band = z * model.sigma;

        let last = series[series.len() - 1].date;
        let mut dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        for offset in 1..=u64::from(horizon_days) {
            let date = last
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| ForecastError::Degenerate(format!("date overflow after {last}")))?;
            dates.push(date);
        }

        let points = dates
            .into_iter()
            .map(|date| {
                let predicted = model.predict(date);
                if predicted.is_finite() {
                    Ok(ForecastPoint {
                        date,
                        predicted_sentiment: predicted,
                        lower: predicted - half_band,
                        upper: predicted + half_band,
                    })
                } else {
                    Err(ForecastError::NonFinite(date.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            model = self.name(),
            slope = model.slope,
            sigma = model.sigma,
            points = points.len(),
            "Fitted trend forecast"
        );

        Ok(points)
    }

    fn name(&self) -> &'static str {
        "linear-trend-weekly"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        // 2024-04-01 is a Monday
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap() + chrono::Duration::days(offset)
    }

    fn series(points: &[(i64, f64)]) -> Vec<DailyAggregate> {
        points
            .iter()
            .map(|&(offset, value)| DailyAggregate {
                date: day(offset),
                mean_sentiment: value,
                article_count: 1,
            })
            .collect()
    }

    #[test]
    fn test_exact_line_is_recovered() {
        let input = series(&[(0, 0.0), (1, 0.1), (2, 0.2), (4, 0.4)]);
        let forecast = TrendForecaster::default().forecast(&input, 7).unwrap();

        assert_eq!(forecast.len(), 4 + 7);
        for point in &forecast {
            let t = (point.date - day(0)).num_days() as f64;
            assert!((point.predicted_sentiment - 0.1 * t).abs() < 1e-9);
            // Perfect fit leaves no band
            assert!((point.upper - point.lower).abs() < 1e-9);
        }
    }

    #[test]
    fn test_horizon_dates() {
        let input = series(&[(0, 0.3), (3, -0.1), (5, 0.2)]);
        let forecast = TrendForecaster::default().forecast(&input, 7).unwrap();

        let dates: Vec<NaiveDate> = forecast.iter().map(|p| p.date).collect();
        assert_eq!(&dates[..3], &[day(0), day(3), day(5)]);
        assert_eq!(&dates[3..], &(6..=12).map(day).collect::<Vec<_>>()[..]);
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_band_contains_prediction() {
        let input = series(&[(0, 0.5), (1, -0.4), (2, 0.3), (3, -0.2), (4, 0.6)]);
        let forecast = TrendForecaster::default().forecast(&input, 3).unwrap();
        for point in forecast {
            assert!(point.lower < point.predicted_sentiment);
            assert!(point.predicted_sentiment < point.upper);
        }
    }

    #[test]
    fn test_weekly_seasonality_applied_for_long_history() {
        // Mondays are consistently higher than the rest of the week
        let points: Vec<(i64, f64)> = (0..21)
            .map(|offset| (offset, if offset % 7 == 0 { 0.8 } else { 0.0 }))
            .collect();
        let input = series(&points);

        let forecast = TrendForecaster::default().forecast(&input, 7).unwrap();
        let monday = forecast.iter().find(|p| p.date == day(21)).unwrap();
        let tuesday = forecast.iter().find(|p| p.date == day(22)).unwrap();
        assert!(monday.predicted_sentiment > tuesday.predicted_sentiment + 0.5);
    }

    #[test]
    fn test_short_history_has_no_seasonality() {
        let input = series(&[(0, 0.2), (1, 0.2), (2, 0.2)]);
        let forecast = TrendForecaster::default().forecast(&input, 7).unwrap();
        for point in forecast {
            assert!((point.predicted_sentiment - 0.2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let model = TrendForecaster::default();
        assert_eq!(
            model.forecast(&series(&[(0, 0.1)]), 7),
            Err(ForecastError::InsufficientData(2, 1))
        );
        assert!(matches!(
            model.forecast(&series(&[(0, 0.1), (0, 0.2), (0, 0.3)]), 7),
            Err(ForecastError::Degenerate(_))
        ));
        assert!(matches!(
            model.forecast(&series(&[(0, 0.1), (1, f64::NAN), (2, 0.3)]), 7),
            Err(ForecastError::NonFinite(_))
        ));
    }

    #[test]
    fn test_interval_width_controls_band() {
        let input = series(&[(0, 0.5), (1, -0.4), (2, 0.3), (3, -0.2)]);
        let narrow = TrendForecaster::with_interval_width(0.5).forecast(&input, 1).unwrap();
        let wide = TrendForecaster::with_interval_width(0.95).forecast(&input, 1).unwrap();
        let width = |p: &ForecastPoint| p.upper - p.lower;
        assert!(width(&wide[0]) > width(&narrow[0]));
    }
}
