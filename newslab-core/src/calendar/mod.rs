//! Trading calendars and article-to-session attribution.

pub mod attribution;
pub mod nyse;
pub mod sessions;

pub use attribution::{default_market_close, SessionAttributor, DEFAULT_TIMEZONE};
pub use nyse::NyseCalendar;
pub use sessions::SessionCalendar;

use chrono::NaiveDate;

/// Exchange trading-day oracle.
pub trait TradingCalendar: Send + Sync {
    fn is_trading_day(&self, date: NaiveDate) -> bool;

    /// First trading day strictly after `date`, or `None` when `date` lies
    /// outside the calendar's horizon.
    fn next_trading_day(&self, date: NaiveDate) -> Option<NaiveDate>;
}

impl<T: TradingCalendar + ?Sized> TradingCalendar for Box<T> {
    fn is_trading_day(&self, date: NaiveDate) -> bool {
        (**self).is_trading_day(date)
    }

    fn next_trading_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        (**self).next_trading_day(date)
    }
}

impl<T: TradingCalendar + ?Sized> TradingCalendar for &T {
    fn is_trading_day(&self, date: NaiveDate) -> bool {
        (**self).is_trading_day(date)
    }

    fn next_trading_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        (**self).next_trading_day(date)
    }
}
