//! Map publication instants to the trading session they can first affect.

use super::TradingCalendar;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// 16:00 local.
pub fn default_market_close() -> NaiveTime {
    NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Attributes an instant to a trading date.
///
/// The instant is converted to exchange-local time. If the local date is a
/// trading day and the local time is strictly before the close, the article
/// belongs to that date; otherwise to the next trading day.
#[derive(Debug, Clone)]
pub struct SessionAttributor<C> {
    calendar: C,
    tz: Tz,
    close: NaiveTime,
}

impl<C: TradingCalendar> SessionAttributor<C> {
    pub fn new(calendar: C) -> Self {
        Self {
            calendar,
            tz: DEFAULT_TIMEZONE,
            close: default_market_close(),
        }
    }

    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    pub fn with_close(mut self, close: NaiveTime) -> Self {
        self.close = close;
        self
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Trading date for `instant`, or `None` when it falls outside the
    /// calendar's horizon.
    pub fn attribute(&self, instant: DateTime<Utc>) -> Option<NaiveDate> {
        let local = instant.with_timezone(&self.tz);
        let date = local.date_naive();
        if self.calendar.is_trading_day(date) && local.time() < self.close {
            Some(date)
        } else {
            self.calendar.next_trading_day(date)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{NyseCalendar, SessionCalendar};
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn utc(y: i32, m: u32, day: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, day, h, min, 0).unwrap()
    }

    #[test]
    fn close_boundary_in_daylight_time() {
        let attr = SessionAttributor::new(NyseCalendar::new());
        // 15:59 EDT on Thursday before Good Friday.
        assert_eq!(attr.attribute(utc(2024, 3, 28, 19, 59)), Some(d(2024, 3, 28)));
        // 16:00 EDT exactly rolls past Good Friday and the weekend.
        assert_eq!(attr.attribute(utc(2024, 3, 28, 20, 0)), Some(d(2024, 4, 1)));
    }

    #[test]
    fn close_boundary_in_standard_time() {
        let attr = SessionAttributor::new(NyseCalendar::new());
        assert_eq!(attr.attribute(utc(2024, 1, 12, 20, 59)), Some(d(2024, 1, 12)));
        // After close on Friday before MLK Day.
        assert_eq!(attr.attribute(utc(2024, 1, 12, 21, 0)), Some(d(2024, 1, 16)));
    }

    #[test]
    fn utc_date_differs_from_local_date() {
        let attr = SessionAttributor::new(NyseCalendar::new());
        // 02:00 UTC Wednesday is 21:00 EST Tuesday: after Tuesday's close.
        assert_eq!(attr.attribute(utc(2024, 2, 7, 2, 0)), Some(d(2024, 2, 7)));
        // 13:30 UTC Wednesday is the open.
        assert_eq!(attr.attribute(utc(2024, 2, 7, 14, 30)), Some(d(2024, 2, 7)));
    }

    #[test]
    fn weekend_news_goes_to_monday() {
        let attr = SessionAttributor::new(NyseCalendar::new());
        assert_eq!(attr.attribute(utc(2024, 6, 8, 15, 0)), Some(d(2024, 6, 10)));
    }

    #[test]
    fn news_during_unscheduled_closure_waits_for_reopen() {
        let attr = SessionAttributor::new(NyseCalendar::new());
        // 11:00 EDT on the first Hurricane Sandy closure day.
        assert_eq!(attr.attribute(utc(2012, 10, 29, 15, 0)), Some(d(2012, 10, 31)));
        let scheduled = SessionAttributor::new(NyseCalendar::scheduled_only());
        assert_eq!(scheduled.attribute(utc(2012, 10, 29, 15, 0)), Some(d(2012, 10, 29)));
    }

    #[test]
    fn session_calendar_horizon() {
        let cal = SessionCalendar::from_dates([d(2024, 6, 3), d(2024, 6, 4)]);
        let attr = SessionAttributor::new(&cal);
        assert_eq!(attr.attribute(utc(2024, 6, 3, 21, 0)), Some(d(2024, 6, 4)));
        assert_eq!(attr.attribute(utc(2024, 6, 4, 21, 0)), None);
    }

    #[test]
    fn custom_timezone_and_close() {
        let close = NaiveTime::from_hms_opt(15, 30, 0).unwrap();
        let attr = SessionAttributor::new(NyseCalendar::new())
            .with_timezone(chrono_tz::UTC)
            .with_close(close);
        assert_eq!(attr.attribute(utc(2024, 6, 3, 15, 29)), Some(d(2024, 6, 3)));
        assert_eq!(attr.attribute(utc(2024, 6, 3, 15, 30)), Some(d(2024, 6, 4)));
    }
}
