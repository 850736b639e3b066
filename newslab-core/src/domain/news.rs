//! News articles and their normalized text features.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest headline (in characters) the loader accepts.
pub const MAX_HEADLINE_CHARS: usize = 512;

/// A single headline row from the news corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub headline: String,
    pub publisher: String,
    pub published_at: DateTime<Utc>,
    pub symbol: String,
    pub url: String,
}

impl NewsArticle {
    /// Composite deduplication key: (headline, publisher, published_at, symbol).
    pub fn key(&self) -> ArticleKey {
        ArticleKey::of(self)
    }
}

/// BLAKE3 digest of an article's deduplication tuple.
///
/// Fields are length-prefixed so that ("ab", "c") and ("a", "bc") never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleKey([u8; 32]);

impl ArticleKey {
    pub fn of(article: &NewsArticle) -> Self {
        let mut hasher = blake3::Hasher::new();
        for field in [&article.headline, &article.publisher, &article.symbol] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
        hasher.update(&article.published_at.timestamp().to_le_bytes());
        hasher.update(&article.published_at.timestamp_subsec_nanos().to_le_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// An article plus the derived text features used by corpus analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedArticle {
    pub article: NewsArticle,
    /// Headline length in characters (not bytes).
    pub headline_length: usize,
    /// Lower-cased, stopword-free word tokens in headline order.
    pub tokens: Vec<String>,
}
