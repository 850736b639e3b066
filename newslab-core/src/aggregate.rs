//! Temporal aggregation of scored articles into daily sentiment.
//!
//! The builder consumes one article at a time so the news corpus never has
//! to be resident: state is a running sum and category tally per
//! `(symbol, trading date)`.

use crate::calendar::{SessionAttributor, TradingCalendar};
use crate::domain::{CategoryCounts, DailySentimentAggregate, SentimentScore};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
struct DayAccumulator {
    compound_sum: f64,
    count: usize,
    categories: CategoryCounts,
}

/// Incremental `(symbol, date) -> aggregate` builder.
#[derive(Debug)]
pub struct DailySentimentBuilder<C> {
    attributor: SessionAttributor<C>,
    days: BTreeMap<(String, NaiveDate), DayAccumulator>,
    unattributed: usize,
}

impl<C: TradingCalendar> DailySentimentBuilder<C> {
    pub fn new(attributor: SessionAttributor<C>) -> Self {
        Self {
            attributor,
            days: BTreeMap::new(),
            unattributed: 0,
        }
    }

    /// Attribute and accumulate one article. Returns the trading date it
    /// landed on, or `None` if it fell past the calendar horizon.
    pub fn add(
        &mut self,
        symbol: &str,
        published_at: DateTime<Utc>,
        score: &SentimentScore,
    ) -> Option<NaiveDate> {
        let Some(date) = self.attributor.attribute(published_at) else {
            self.unattributed += 1;
            return None;
        };
        let slot = self.days.entry((symbol.to_string(), date)).or_default();
        slot.compound_sum += score.compound;
        slot.count += 1;
        slot.categories.record(score.category);
        Some(date)
    }

    /// Articles whose next trading day was unknown.
    pub fn unattributed(&self) -> usize {
        self.unattributed
    }

    /// Aggregates ordered by symbol, then date.
    pub fn finish(self) -> Vec<DailySentimentAggregate> {
        self.days
            .into_iter()
            .map(|((symbol, date), acc)| DailySentimentAggregate {
                symbol,
                date,
                mean_compound: acc.compound_sum / acc.count as f64,
                article_count: acc.count,
                categories: acc.categories,
            })
            .collect()
    }
}

/// Aggregates for `symbol` keyed by date.
pub fn by_date<'a>(
    aggregates: &'a [DailySentimentAggregate],
    symbol: &str,
) -> BTreeMap<NaiveDate, &'a DailySentimentAggregate> {
    aggregates
        .iter()
        .filter(|a| a.symbol == symbol)
        .map(|a| (a.date, a))
        .collect()
}
