//! Word tokenizer for headline analytics.
//!
//! Pure and order-preserving: lower-case, split on anything that is not a
//! letter or an in-word apostrophe, then drop stopwords and any token that is
//! not purely alphabetic.

use super::stopwords;
use crate::domain::{NewsArticle, NormalizedArticle};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<&'static str>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            stopwords: stopwords::ENGLISH.iter().copied().collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Raw lower-cased word pieces, before filtering.
    pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|w| w.trim_matches('\''))
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
    }

    /// Analytics tokens: lower-cased, stopword-free, alphabetic only.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        Self::words(text)
            .filter(|w| !self.is_stopword(w))
            .filter(|w| w.chars().all(char::is_alphabetic))
            .collect()
    }
}

/// Attaches text features to articles.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    tokenizer: Tokenizer,
}

impl Normalizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn normalize(&self, article: NewsArticle) -> NormalizedArticle {
        let headline_length = article.headline.chars().count();
        let tokens = self.tokenizer.tokenize(&article.headline);
        NormalizedArticle {
            article,
            headline_length,
            tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn tokenize_drops_stopwords_and_punctuation() {
        let t = Tokenizer::new();
        assert_eq!(
            t.tokenize("Company beats estimates, raises outlook"),
            ["company", "beats", "estimates", "raises", "outlook"]
        );
        assert_eq!(
            t.tokenize("Stocks That Hit 52-Week Highs On Friday"),
            ["stocks", "hit", "week", "highs", "friday"]
        );
    }

    #[test]
    fn tokenize_preserves_order_and_repeats() {
        let t = Tokenizer::new();
        assert_eq!(t.tokenize("up down up UP"), Vec::<String>::new());
        assert_eq!(t.tokenize("buy sell buy"), ["buy", "sell", "buy"]);
    }

    #[test]
    fn contractions_are_stopwords() {
        let t = Tokenizer::new();
        assert_eq!(t.tokenize("Apple doesn't disappoint"), ["apple", "disappoint"]);
    }

    #[test]
    fn tokens_with_digits_are_dropped() {
        let t = Tokenizer::new();
        assert_eq!(t.tokenize("Q2 earnings 2020"), ["earnings"]);
    }

    #[test]
    fn normalizer_counts_characters() {
        let n = Normalizer::default();
        let article = NewsArticle {
            headline: "Café stocks rally".into(),
            publisher: "p".into(),
            published_at: Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap(),
            symbol: "SBUX".into(),
            url: "u".into(),
        };
        let normalized = n.normalize(article);
        assert_eq!(normalized.headline_length, 17);
        assert_eq!(normalized.tokens, ["café", "stocks", "rally"]);
    }
}
