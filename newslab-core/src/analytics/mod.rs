//! Corpus analytics over the normalized news stream.
//!
//! Everything here accumulates one article at a time so the corpus is read
//! in a single streaming pass alongside scoring.

pub mod distribution;
pub mod publishers;
pub mod words;

pub use distribution::{CorpusAccumulator, CorpusSummary, LengthStats, LengthStatsBuilder};
pub use publishers::{
    organization_from_email, OrganizationCount, PublisherCount, PublisherCounter,
};
pub use words::{Trigram, TrigramCounter, WordCount, WordCounter};

use serde::{Deserialize, Serialize};

/// Output sizes and filters for the corpus tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub top_words: usize,
    pub top_publishers: usize,
    /// Trigrams seen fewer times than this are not ranked.
    pub trigram_min_freq: u64,
    pub top_trigrams: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_words: 50,
            top_publishers: 20,
            trigram_min_freq: 20,
            top_trigrams: 50,
        }
    }
}
