//! Minimal SVG line charts
//!
//! Renders date/value series as an inline SVG document so the dashboard needs
//! no client-side charting library. A chart with no points renders its axes
//! and a "No data" label.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::models::{AnnotatedArticle, DailyAggregate, ForecastPoint};

const DEFAULT_WIDTH: f64 = 720.0;
const DEFAULT_HEIGHT: f64 = 320.0;

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 44.0;

const Y_TICKS: usize = 5;

/// One polyline
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub points: Vec<(NaiveDate, f64)>,
    /// Draw a dot at every point
    pub markers: bool,
    /// Draw the connecting line
    pub line: bool,
}

impl Series {
    pub fn line(label: impl Into<String>, color: impl Into<String>, points: Vec<(NaiveDate, f64)>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            points,
            markers: true,
            line: true,
        }
    }

    pub fn scatter(label: impl Into<String>, color: impl Into<String>, points: Vec<(NaiveDate, f64)>) -> Self {
        Self {
            line: false,
            ..Self::line(label, color, points)
        }
    }
}

/// Shaded area between a lower and an upper edge
#[derive(Debug, Clone)]
pub struct Band {
    pub color: String,
    pub points: Vec<(NaiveDate, f64, f64)>,
}

/// Line chart over calendar dates
#[derive(Debug, Clone)]
pub struct LineChart {
    title: String,
    y_label: String,
    width: f64,
    height: f64,
    series: Vec<Series>,
    band: Option<Band>,
}

/// Linear mapping from data space into the plot area
struct Scale {
    x_min: NaiveDate,
    x_days: f64,
    y_min: f64,
    y_max: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Scale {
    fn x(&self, date: NaiveDate) -> f64 {
        if self.x_days == 0.0 {
            return (self.left + self.right) / 2.0;
        }
        let offset = (date - self.x_min).num_days() as f64;
        self.left + offset / self.x_days * (self.right - self.left)
    }

    fn y(&self, value: f64) -> f64 {
        let ratio = (value - self.y_min) / (self.y_max - self.y_min);
        self.bottom - ratio * (self.bottom - self.top)
    }
}

impl LineChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_label: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            series: Vec::new(),
            band: None,
        }
    }

    #[must_use]
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn with_band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }

    /// True when no series or band has a point
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
            && self.band.as_ref().map_or(true, |b| b.points.is_empty())
    }

    fn scale(&self) -> Option<Scale> {
        let dates = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(d, _)| *d))
            .chain(self.band.iter().flat_map(|b| b.points.iter().map(|(d, _, _)| *d)));
        let values = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, v)| *v))
            .chain(
                self.band
                    .iter()
                    .flat_map(|b| b.points.iter().flat_map(|(_, lo, hi)| [*lo, *hi])),
            )
            .filter(|v| v.is_finite());

        let (x_min, x_max) = dates.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })?;
        let (mut y_min, mut y_max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

        if (y_max - y_min).abs() < f64::EPSILON {
            y_min -= 0.5;
            y_max += 0.5;
        } else {
            let pad = (y_max - y_min) * 0.1;
            y_min -= pad;
            y_max += pad;
        }

        Some(Scale {
            x_min,
            x_days: (x_max - x_min).num_days() as f64,
            y_min,
            y_max,
            left: MARGIN_LEFT,
            right: self.width - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: self.height - MARGIN_BOTTOM,
        })
    }

    /// Render the chart as a standalone `<svg>` element
    pub fn render_svg(&self) -> String {
        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img">"#,
            w = self.width,
            h = self.height
        );
        let _ = write!(
            svg,
            r#"<text class="chart-title" x="{}" y="20" text-anchor="middle" font-size="15" font-weight="bold">{}</text>"#,
            self.width / 2.0,
            html_escape::encode_text(&self.title)
        );

        let left = MARGIN_LEFT;
        let right = self.width - MARGIN_RIGHT;
        let top = MARGIN_TOP;
        let bottom = self.height - MARGIN_BOTTOM;
        let _ = write!(
            svg,
            r##"<g class="axes" stroke="#888" stroke-width="1"><line x1="{left}" y1="{bottom}" x2="{right}" y2="{bottom}"/><line x1="{left}" y1="{top}" x2="{left}" y2="{bottom}"/></g>"##
        );

        if !self.y_label.is_empty() {
            let mid = (top + bottom) / 2.0;
            let _ = write!(
                svg,
                r#"<text class="y-label" x="14" y="{mid}" transform="rotate(-90 14 {mid})" text-anchor="middle" font-size="12">{}</text>"#,
                html_escape::encode_text(&self.y_label)
            );
        }

        let Some(scale) = self.scale() else {
            let _ = write!(
                svg,
                r##"<text class="no-data" x="{}" y="{}" text-anchor="middle" font-size="14" fill="#666">No data</text></svg>"##,
                (left + right) / 2.0,
                (top + bottom) / 2.0
            );
            return svg;
        };

        self.write_y_ticks(&mut svg, &scale);
        self.write_x_ticks(&mut svg, &scale);

        if let Some(band) = &self.band {
            write_band(&mut svg, &scale, band);
        }

        for series in &self.series {
            write_series(&mut svg, &scale, series);
        }

        self.write_legend(&mut svg);
        svg.push_str("</svg>");
        svg
    }

    fn write_y_ticks(&self, svg: &mut String, scale: &Scale) {
        for i in 0..Y_TICKS {
            let value = scale.y_min + (scale.y_max - scale.y_min) * i as f64 / (Y_TICKS - 1) as f64;
            let y = scale.y(value);
            let _ = write!(
                svg,
                r##"<line class="grid" x1="{}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="#eee"/><text x="{}" y="{:.1}" text-anchor="end" font-size="11">{value:.2}</text>"##,
                scale.left,
                scale.right,
                scale.left - 6.0,
                y + 4.0
            );
        }

        if scale.y_min < 0.0 && scale.y_max > 0.0 {
            let y = scale.y(0.0);
            let _ = write!(
                svg,
                r##"<line class="zero" x1="{}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="#bbb" stroke-dasharray="4 3"/>"##,
                scale.left, scale.right
            );
        }
    }

    fn write_x_ticks(&self, svg: &mut String, scale: &Scale) {
        let last = scale.x_min + chrono::Duration::days(scale.x_days as i64);
        let mid = scale.x_min + chrono::Duration::days((scale.x_days / 2.0).round() as i64);
        let mut ticks = vec![scale.x_min, mid, last];
        ticks.dedup();

        for date in ticks {
            let _ = write!(
                svg,
                r#"<text class="x-tick" x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{}</text>"#,
                scale.x(date),
                scale.bottom + 18.0,
                date.format("%Y-%m-%d")
            );
        }
    }

    fn write_legend(&self, svg: &mut String) {
        let labelled: Vec<&Series> = self.series.iter().filter(|s| !s.label.is_empty()).collect();
        if labelled.len() < 2 {
            return;
        }

        let mut x = MARGIN_LEFT;
        let y = self.height - 8.0;
        for series in labelled {
            let _ = write!(
                svg,
                r#"<rect x="{x}" y="{}" width="10" height="10" fill="{}"/><text x="{}" y="{y}" font-size="11">{}</text>"#,
                y - 9.0,
                html_escape::encode_double_quoted_attribute(&series.color),
                x + 14.0,
                html_escape::encode_text(&series.label)
            );
            x += 24.0 + series.label.chars().count() as f64 * 6.5;
        }
    }
}

fn write_band(svg: &mut String, scale: &Scale, band: &Band) {
    if band.points.is_empty() {
        return;
    }

    let upper = band
        .points
        .iter()
        .map(|(d, _, hi)| format!("{:.1},{:.1}", scale.x(*d), scale.y(*hi)));
    let lower = band
        .points
        .iter()
        .rev()
        .map(|(d, lo, _)| format!("{:.1},{:.1}", scale.x(*d), scale.y(*lo)));
    let outline: Vec<String> = upper.chain(lower).collect();

    let _ = write!(
        svg,
        r#"<polygon class="band" points="{}" fill="{}" fill-opacity="0.25" stroke="none"/>"#,
        outline.join(" "),
        html_escape::encode_double_quoted_attribute(&band.color)
    );
}

fn write_series(svg: &mut String, scale: &Scale, series: &Series) {
    let color = html_escape::encode_double_quoted_attribute(&series.color);
    let coords: Vec<(f64, f64)> = series
        .points
        .iter()
        .filter(|(_, v)| v.is_finite())
        .map(|(d, v)| (scale.x(*d), scale.y(*v)))
        .collect();

    if series.line && coords.len() > 1 {
        let points: Vec<String> = coords.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
        let _ = write!(
            svg,
            r#"<polyline class="series" points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
            points.join(" ")
        );
    }

    if series.markers || coords.len() == 1 {
        for (x, y) in coords {
            let _ = write!(svg, r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"/>"#);
        }
    }
}

/// Per-article sentiment over time
pub fn trend_chart(trend: &[AnnotatedArticle]) -> LineChart {
    let points = trend.iter().map(|a| (a.published_date, a.sentiment)).collect();
    LineChart::new("Sentiment Trend")
        .with_y_label("Sentiment")
        .with_series(Series::line("Sentiment", "#1f77b4", points))
}

/// Forecast with its uncertainty band and the observed daily means
pub fn forecast_chart(forecast: &[ForecastPoint], daily: &[DailyAggregate]) -> LineChart {
    let band = Band {
        color: String::from("#1f77b4"),
        points: forecast.iter().map(|p| (p.date, p.lower, p.upper)).collect(),
    };
    let predicted = forecast.iter().map(|p| (p.date, p.predicted_sentiment)).collect();
    let observed = daily.iter().map(|d| (d.date, d.mean_sentiment)).collect();

    let mut predicted = Series::line("Forecast", "#1f77b4", predicted);
    predicted.markers = false;

    LineChart::new("Sentiment Forecast")
        .with_y_label("Predicted Sentiment")
        .with_band(band)
        .with_series(predicted)
        .with_series(Series::scatter("Observed", "#333333", observed))
}
