//! Calendar derived from the sessions present in price data.

use super::TradingCalendar;
use crate::domain::PriceBar;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

/// Trading days are exactly the dates observed in the supplied bars. Its
/// horizon spans the first through the last observed session; dates before
/// the first session have no next trading day.
#[derive(Debug, Clone, Default)]
pub struct SessionCalendar {
    sessions: BTreeSet<NaiveDate>,
}

impl SessionCalendar {
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            sessions: dates.into_iter().collect(),
        }
    }

    pub fn from_bars<'a>(bars: impl IntoIterator<Item = &'a PriceBar>) -> Self {
        Self::from_dates(bars.into_iter().map(|b| b.date))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.sessions.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.sessions.last().copied()
    }
}

impl TradingCalendar for SessionCalendar {
    fn is_trading_day(&self, date: NaiveDate) -> bool {
        self.sessions.contains(&date)
    }

    fn next_trading_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        if self.first().map_or(true, |first| date < first) {
            return None;
        }
        self.sessions.range((Excluded(date), Unbounded)).next().copied()
    }
}
