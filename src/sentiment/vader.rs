//! VADER compound scoring
//!
//! Wraps `vader_sentiment`, optionally shifted by [`market_boost`].

use std::fmt;

use vader_sentiment::SentimentIntensityAnalyzer;

use super::market::{market_boost, MARKET_TERM_WEIGHT};
use super::{SentimentScores, SentimentScorer};
use crate::config::SentimentConfig;

/// VADER-backed headline analyzer
pub struct VaderAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
    market_terms: bool,
}

impl VaderAnalyzer {
    /// Analyzer with the market vocabulary adjustment enabled
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&SentimentConfig::default())
    }

    #[must_use]
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
            market_terms: config.market_terms,
        }
    }

    /// Plain VADER scores, no adjustment
    #[must_use]
    pub fn plain() -> Self {
        Self::from_config(&SentimentConfig {
            market_terms: false,
        })
    }
}

impl Default for VaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VaderAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaderAnalyzer")
            .field("market_terms", &self.market_terms)
            .finish_non_exhaustive()
    }
}

impl SentimentScorer for VaderAnalyzer {
    fn polarity_scores(&self, text: &str) -> SentimentScores {
        if text.trim().is_empty() {
            return SentimentScores::default();
        }

        let scores = self.analyzer.polarity_scores(text);
        let score = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        let mut compound = score("compound");
        if self.market_terms {
            compound = (compound + market_boost(text) * MARKET_TERM_WEIGHT).clamp(-1.0, 1.0);
        }

        SentimentScores {
            neg: score("neg"),
            neu: score("neu"),
            pos: score("pos"),
            compound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_neutral() {
        let analyzer = VaderAnalyzer::new();
        assert_eq!(analyzer.compound(""), 0.0);
        assert_eq!(analyzer.compound("   "), 0.0);
    }

    #[test]
    fn test_general_vocabulary_is_scored() {
        let analyzer = VaderAnalyzer::plain();

        for headline in ["Fantastic quarter for investors", "Wonderful news for exporters"] {
            let score = analyzer.compound(headline);
            assert!(score > 0.2, "expected positive score for '{headline}', got {score}");
        }

        for headline in [
            "Investors disappointed by earnings",
            "Scary week on Wall Street",
            "Severe floods hit Karachi",
        ] {
            let score = analyzer.compound(headline);
            assert!(score < -0.2, "expected negative score for '{headline}', got {score}");
        }
    }

    #[test]
    fn test_headline_polarity() {
        let analyzer = VaderAnalyzer::new();
        assert!(analyzer.compound("Economy grows 5%") > 0.0);
        assert!(analyzer.compound("Economy in crisis") < 0.0);
    }

    #[test]
    fn test_market_terms_shift_plain_score() {
        let text = "Shares slump after weak results";
        let plain = VaderAnalyzer::plain().compound(text);
        let adjusted = VaderAnalyzer::new().compound(text);
        assert!(adjusted < plain);
        assert!((-1.0..=1.0).contains(&adjusted));
    }

    #[test]
    fn test_negation_flips_sign() {
        let analyzer = VaderAnalyzer::plain();
        assert!(analyzer.compound("The outlook is good") > 0.0);
        assert!(analyzer.compound("The outlook is not good") < 0.0);
    }

    #[test]
    fn test_compound_stays_in_range() {
        let analyzer = VaderAnalyzer::new();
        let score = analyzer.compound("Stocks soar and rally to an all-time high, great great great!!!");
        assert!(score > 0.9 && score <= 1.0);
    }

    #[test]
    fn test_deterministic() {
        let analyzer = VaderAnalyzer::new();
        let text = "Oil prices plunge as recession fears grow";
        assert_eq!(analyzer.polarity_scores(text), analyzer.polarity_scores(text));
    }
}
