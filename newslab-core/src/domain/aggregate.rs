//! Per-symbol, per-trading-day sentiment aggregate.

use super::sentiment::CategoryCounts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mean compound and category distribution of the articles attributed to
/// one symbol on one trading date. Only days with at least one article
/// produce an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySentimentAggregate {
    pub symbol: String,
    pub date: NaiveDate,
    pub mean_compound: f64,
    pub article_count: usize,
    pub categories: CategoryCounts,
}
