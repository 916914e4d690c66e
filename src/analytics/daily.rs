//! Daily sentiment aggregation
//!
//! Groups annotated articles by calendar date and averages their sentiment.
//! Dates come out ascending; dates without articles are not filled in.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{AnnotatedArticle, DailyAggregate};

/// Running sum for one date
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Group articles by date and average their sentiment
#[must_use]
pub fn aggregate_daily(articles: &[AnnotatedArticle]) -> Vec<DailyAggregate> {
    let mut by_date: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();

    for article in articles {
        let entry = by_date.entry(article.published_date).or_default();
        entry.sum += article.sentiment;
        entry.count += 1;
    }

    by_date
        .into_iter()
        .map(|(date, acc)| DailyAggregate {
            date,
            mean_sentiment: acc.sum / acc.count as f64,
            article_count: acc.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(date: &str, sentiment: f64) -> AnnotatedArticle {
        AnnotatedArticle {
            published_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            title: String::new(),
            sentiment,
            source: None,
            url: None,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn test_groups_and_averages() {
        let articles = vec![
            article("2024-05-02", 0.5),
            article("2024-05-01", -0.2),
            article("2024-05-02", -0.1),
            article("2024-05-04", 0.9),
            article("2024-05-02", 0.2),
        ];

        let daily = aggregate_daily(&articles);
        assert_eq!(daily.len(), 3);

        assert_eq!(daily[0].date.to_string(), "2024-05-01");
        assert!((daily[0].mean_sentiment + 0.2).abs() < 1e-9);

        assert_eq!(daily[1].date.to_string(), "2024-05-02");
        assert_eq!(daily[1].article_count, 3);
        assert!((daily[1].mean_sentiment - 0.2).abs() < 1e-9);

        // No gap filling for 2024-05-03
        assert_eq!(daily[2].date.to_string(), "2024-05-04");
    }
}
