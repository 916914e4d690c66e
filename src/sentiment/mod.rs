//! Headline sentiment scoring
//!
//! The pipeline depends on the [`SentimentScorer`] capability only. The default
//! implementation is [`VaderAnalyzer`], the VADER compound score from the
//! `vader_sentiment` crate with an optional market vocabulary adjustment.

pub mod market;
pub mod vader;

use serde::{Deserialize, Serialize};

pub use market::market_boost;
pub use vader::VaderAnalyzer;

/// Polarity breakdown for one piece of text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    /// Proportion of negative valence
    pub neg: f64,
    /// Proportion of neutral tokens
    pub neu: f64,
    /// Proportion of positive valence
    pub pos: f64,
    /// Normalised overall score in [-1, 1]
    pub compound: f64,
}

/// Capability: score the sentiment of a text
pub trait SentimentScorer: Send + Sync {
    /// Full polarity breakdown
    fn polarity_scores(&self, text: &str) -> SentimentScores;

    /// Compound score in [-1, 1]; neutral (0.0) for empty input
    fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }
}
