//! Headline-length statistics, publication timing, and the corpus summary.

use super::publishers::{OrganizationCount, PublisherCount, PublisherCounter};
use super::words::{Trigram, TrigramCounter, WordCount, WordCounter};
use super::AnalyticsConfig;
use crate::domain::{
    CategoryCounts, NormalizedArticle, SentimentGroup, SentimentScore, MAX_HEADLINE_CHARS,
};
use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptive statistics of headline lengths (characters). `std` is the
/// sample standard deviation; quantiles interpolate linearly between ranks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub count: u64,
    pub mean: f64,
    pub std: f64,
    pub min: usize,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: usize,
}

/// Streaming histogram over `0..=MAX_HEADLINE_CHARS`; longer values are
/// clamped into the last bucket.
#[derive(Debug, Clone)]
pub struct LengthStatsBuilder {
    buckets: Vec<u64>,
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl Default for LengthStatsBuilder {
    fn default() -> Self {
        Self {
            buckets: vec![0; MAX_HEADLINE_CHARS + 1],
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }
}

impl LengthStatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, length: usize) {
        let length = length.min(MAX_HEADLINE_CHARS);
        self.buckets[length] += 1;
        self.count += 1;
        let l = length as f64;
        self.sum += l;
        self.sum_sq += l * l;
    }

    /// Value at 0-based rank `k` of the sorted sample.
    fn nth(&self, k: u64) -> usize {
        let mut seen = 0;
        for (len, &c) in self.buckets.iter().enumerate() {
            seen += c;
            if seen > k {
                return len;
            }
        }
        MAX_HEADLINE_CHARS
    }

    fn quantile(&self, q: f64) -> f64 {
        let h = (self.count - 1) as f64 * q;
        let lo = h.floor() as u64;
        let frac = h - lo as f64;
        let lower = self.nth(lo) as f64;
        if frac == 0.0 {
            return lower;
        }
        let upper = self.nth(lo + 1) as f64;
        lower + frac * (upper - lower)
    }

    pub fn finish(&self) -> Option<LengthStats> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        let std = if self.count > 1 {
            ((self.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0).sqrt()
        } else {
            0.0
        };
        let min = self.buckets.iter().position(|&c| c > 0).unwrap_or(0);
        let max = self.buckets.iter().rposition(|&c| c > 0).unwrap_or(0);
        Some(LengthStats {
            count: self.count,
            mean,
            std,
            min,
            p25: self.quantile(0.25),
            median: self.quantile(0.5),
            p75: self.quantile(0.75),
            max,
        })
    }
}

/// Every corpus table, ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub articles: u64,
    pub length: Option<LengthStats>,
    pub top_words: Vec<WordCount>,
    pub trigrams: Vec<Trigram>,
    pub top_publishers: Vec<PublisherCount>,
    pub organizations: Vec<OrganizationCount>,
    /// Articles per UTC publication date.
    pub daily_counts: Vec<(NaiveDate, u64)>,
    /// Articles per UTC publication hour.
    pub hourly_counts: [u64; 24],
    pub categories: CategoryCounts,
}

impl CorpusSummary {
    pub fn group_count(&self, group: SentimentGroup) -> usize {
        self.categories.group_count(group)
    }
}

/// Single-pass accumulator behind `CorpusSummary`.
#[derive(Debug, Clone, Default)]
pub struct CorpusAccumulator {
    articles: u64,
    lengths: LengthStatsBuilder,
    words: WordCounter,
    trigrams: TrigramCounter,
    publishers: PublisherCounter,
    daily: BTreeMap<NaiveDate, u64>,
    hourly: [u64; 24],
    categories: CategoryCounts,
}

impl CorpusAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one article. `score` is `None` when only text statistics
    /// are wanted.
    pub fn add(&mut self, article: &NormalizedArticle, score: Option<&SentimentScore>) {
        self.articles += 1;
        self.lengths.add(article.headline_length);
        self.words.add_tokens(&article.tokens);
        self.trigrams.add_tokens(&article.tokens);
        self.publishers.add(&article.article.publisher);

        let at = article.article.published_at;
        *self.daily.entry(at.date_naive()).or_insert(0) += 1;
        self.hourly[at.hour() as usize] += 1;

        if let Some(score) = score {
            self.categories.record(score.category);
        }
    }

    pub fn articles(&self) -> u64 {
        self.articles
    }

    pub fn finish(self, config: &AnalyticsConfig) -> CorpusSummary {
        CorpusSummary {
            articles: self.articles,
            length: self.lengths.finish(),
            top_words: self.words.top(config.top_words),
            trigrams: self
                .trigrams
                .top_by_pmi(config.trigram_min_freq, config.top_trigrams),
            top_publishers: self.publishers.top_publishers(config.top_publishers),
            organizations: self.publishers.organization_counts(),
            daily_counts: self.daily.into_iter().collect(),
            hourly_counts: self.hourly,
            categories: self.categories,
        }
    }
}
