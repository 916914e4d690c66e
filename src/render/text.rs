//! Plain-text rendering for the command line

use std::fmt::Write;

use crate::pipeline::RenderModel;
use crate::utils::truncate_text;

const TITLE_WIDTH: usize = 60;

/// Render a run as a text report: daily series, forecast (or notice), article table
pub fn render_report(model: &RenderModel) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Sentiment for '{}' ({} article(s) requested, {} annotated)",
        model.query.text,
        model.query.article_count,
        model.table.len()
    );
    if model.skipped_articles > 0 {
        let _ = writeln!(out, "Skipped {} article(s) with malformed dates", model.skipped_articles);
    }

    out.push('\n');
    out.push_str("Daily sentiment\n");
    if model.daily.is_empty() {
        out.push_str("  (no data)\n");
    }
    for day in &model.daily {
        let _ = writeln!(
            out,
            "  {}  {:>7.3}  ({} article(s))",
            day.date, day.mean_sentiment, day.article_count
        );
    }

    out.push('\n');
    out.push_str("Forecast\n");
    match (model.forecast.points(), model.forecast.notice()) {
        (Some(points), _) => {
            let last_observed = model.daily.last().map(|d| d.date);
            for point in points {
                let marker = if last_observed.is_some_and(|last| point.date > last) { "*" } else { " " };
                let _ = writeln!(
                    out,
                    " {marker}{}  {:>7.3}  [{:.3}, {:.3}]",
                    point.date, point.predicted_sentiment, point.lower, point.upper
                );
            }
            out.push_str("  (* = future date)\n");
        }
        (None, Some(notice)) => {
            let _ = writeln!(out, "  {notice}");
        }
        (None, None) => {}
    }

    out.push('\n');
    out.push_str(&render_table(model));
    out
}

/// Annotated articles in fetch order
pub fn render_table(model: &RenderModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10}  {:>9}  {:<TITLE_WIDTH$}  Source", "Date", "Sentiment", "Title");
    let _ = writeln!(out, "{}", "-".repeat(10 + 2 + 9 + 2 + TITLE_WIDTH + 2 + 6));

    for article in &model.table {
        let _ = writeln!(
            out,
            "{:<10}  {:>9.3}  {:<TITLE_WIDTH$}  {}",
            article.published_date.format("%Y-%m-%d"),
            article.sentiment,
            truncate_text(&article.title, TITLE_WIDTH),
            article.source.as_deref().unwrap_or("-")
        );
    }
    out
}
