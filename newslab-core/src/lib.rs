//! NewsLab Core — pipeline stages for news-sentiment / price-movement analysis.
//!
//! Each stage is a pure function or a single-pass accumulator over typed
//! values:
//! - Price loading with per-reason rejection counts
//! - Simple moving averages and crossover detection
//! - Streaming news loading, deduplication, tokenization
//! - Lexicon-and-rule sentiment scoring
//! - Attribution of articles to trading sessions and daily aggregation
//! - Lagged Pearson correlation with Student's t significance
//! - Corpus analytics (lengths, words, trigrams, publishers)

pub mod aggregate;
pub mod analytics;
pub mod calendar;
pub mod correlation;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod sentiment;
pub mod text;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed across rayon workers are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::NewsArticle>();
        require_sync::<domain::NewsArticle>();
        require_send::<domain::DailySentimentAggregate>();
        require_sync::<domain::DailySentimentAggregate>();
        require_send::<domain::CorrelationResult>();
        require_sync::<domain::CorrelationResult>();
        require_send::<domain::MovingAverageSeries>();
        require_sync::<domain::MovingAverageSeries>();

        require_send::<sentiment::SentimentScorer>();
        require_sync::<sentiment::SentimentScorer>();
        require_send::<calendar::NyseCalendar>();
        require_sync::<calendar::NyseCalendar>();
        require_send::<calendar::SessionCalendar>();
        require_sync::<calendar::SessionCalendar>();
        require_send::<correlation::CorrelationConfig>();
        require_sync::<correlation::CorrelationConfig>();
        require_send::<analytics::CorpusSummary>();
        require_sync::<analytics::CorpusSummary>();
    }
}
