//! Headline annotation: raw articles to dated sentiment rows

use crate::models::{AnnotatedArticle, RawArticle};
use crate::sentiment::SentimentScorer;
use crate::utils::error::MalformedArticleError;
use crate::utils::parse_date_prefix;

/// Result of annotating a batch of articles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    /// Annotated rows in the input order
    pub articles: Vec<AnnotatedArticle>,

    /// Articles dropped because their timestamp was malformed
    pub skipped: Vec<(usize, MalformedArticleError)>,
}

/// Annotate a single article
///
/// Only the title is scored; the date is the `YYYY-MM-DD` prefix of the timestamp.
pub fn annotate_article(
    article: &RawArticle,
    scorer: &dyn SentimentScorer,
) -> Result<AnnotatedArticle, MalformedArticleError> {
    let published_date = parse_date_prefix(&article.published_at)?;

    Ok(AnnotatedArticle {
        published_date,
        title: article.title.clone(),
        sentiment: scorer.compound(&article.title),
        source: article.source.clone(),
        url: article.url.clone(),
    })
}

/// Annotate articles in order, skipping the ones with malformed timestamps
pub fn annotate(articles: &[RawArticle], scorer: &dyn SentimentScorer) -> Annotation {
    let mut annotation = Annotation {
        articles: Vec::with_capacity(articles.len()),
        skipped: Vec::new(),
    };

    for (index, article) in articles.iter().enumerate() {
        match annotate_article(article, scorer) {
            Ok(annotated) => annotation.articles.push(annotated),
            Err(e) => {
                tracing::warn!(
                    index,
                    published_at = %article.published_at,
                    title = %article.title,
                    error = %e,
                    "Skipping article with malformed timestamp"
                );
                annotation.skipped.push((index, e));
            }
        }
    }

    annotation
}

/// Articles ordered by publication date for the trend chart
///
/// The sort is stable, so articles from the same date keep their fetch order.
#[must_use]
pub fn trend_series(articles: &[AnnotatedArticle]) -> Vec<AnnotatedArticle> {
    let mut sorted = articles.to_vec();
    sorted.sort_by_key(|a| a.published_date);
    sorted
}
