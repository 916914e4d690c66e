//! Market vocabulary adjustment
//!
//! VADER's general lexicon has no entries for much of the verb vocabulary
//! business headlines use ("grows", "slumps", "sell-off"). These terms shift
//! the compound score by half their weight.

/// Weight applied to the summed term scores before adding them to the compound
pub const MARKET_TERM_WEIGHT: f64 = 0.5;

const BULLISH_TERMS: &[(&str, f64)] = &[
    ("grow", 0.3),
    ("grows", 0.4),
    ("growth", 0.3),
    ("expands", 0.3),
    ("surge", 0.4),
    ("surges", 0.4),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("soar", 0.5),
    ("soars", 0.5),
    ("rebound", 0.3),
    ("rebounds", 0.3),
    ("bullish", 0.5),
    ("upgrade", 0.3),
    ("outperform", 0.3),
    ("record high", 0.4),
    ("all-time high", 0.5),
    ("beats estimates", 0.4),
];

const BEARISH_TERMS: &[(&str, f64)] = &[
    ("slump", -0.4),
    ("slumps", -0.4),
    ("plunge", -0.5),
    ("plunges", -0.5),
    ("slide", -0.3),
    ("slides", -0.3),
    ("tumble", -0.4),
    ("tumbles", -0.4),
    ("sell-off", -0.4),
    ("selloff", -0.4),
    ("bearish", -0.5),
    ("downgrade", -0.3),
    ("recession", -0.4),
    ("layoffs", -0.4),
    ("bankruptcy", -0.5),
    ("misses estimates", -0.4),
];

/// Sum of matched term scores
///
/// Terms match whole words only, so "slide" does not fire on "slideshow".
pub fn market_boost(text: &str) -> f64 {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| c.is_ascii_punctuation())
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let padded = format!(" {} ", words.join(" "));

    BULLISH_TERMS
        .iter()
        .chain(BEARISH_TERMS)
        .filter(|(term, _)| padded.contains(&format!(" {term} ")))
        .map(|(_, score)| score)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_whole_words_and_phrases() {
        assert!((market_boost("Economy grows 5%") - 0.4).abs() < 1e-9);
        assert!((market_boost("Stocks hit an ALL-TIME HIGH!") - 0.5).abs() < 1e-9);
        assert!(market_boost("Oil slumps, markets slide") < -0.6);
        assert_eq!(market_boost("Quarterly slideshow released"), 0.0);
        assert_eq!(market_boost(""), 0.0);
    }
}
