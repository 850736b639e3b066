//! Domain types shared by every pipeline stage.

pub mod aggregate;
pub mod bar;
pub mod correlation;
pub mod news;
pub mod sentiment;
pub mod series;

pub use aggregate::DailySentimentAggregate;
pub use bar::PriceBar;
pub use correlation::{Confidence, CorrelationOutcome, CorrelationResult, Significance};
pub use news::{ArticleKey, NewsArticle, NormalizedArticle, MAX_HEADLINE_CHARS};
pub use sentiment::{CategoryCounts, SentimentCategory, SentimentGroup, SentimentScore};
pub use series::{CrossDirection, Crossover, DailyReturn, MaPoint, MovingAverageSeries};

/// Symbol type alias
pub type Symbol = String;
