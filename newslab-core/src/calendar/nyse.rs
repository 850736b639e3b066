//! Rule-based NYSE calendar: weekends plus full-day holidays.
//!
//! Saturday holidays are observed the Friday before, Sunday holidays the
//! Monday after. New Year's Day on a Saturday is not observed. Known
//! unscheduled full-day closures are built in; more can be added with
//! [`NyseCalendar::with_closures`].

use super::TradingCalendar;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Longest run of consecutive closed days searched by `next_trading_day`.
const MAX_CLOSED_RUN: i64 = 14;

/// Unscheduled full-day closures since 2001: 9/11, days of mourning for
/// former presidents, and Hurricane Sandy.
const KNOWN_CLOSURES: &[(i32, u32, u32)] = &[
    (2001, 9, 11),
    (2001, 9, 12),
    (2001, 9, 13),
    (2001, 9, 14),
    (2004, 6, 11),
    (2007, 1, 2),
    (2012, 10, 29),
    (2012, 10, 30),
    (2018, 12, 5),
    (2025, 1, 9),
];

#[derive(Debug, Clone)]
pub struct NyseCalendar {
    extra_closures: BTreeSet<NaiveDate>,
}

impl Default for NyseCalendar {
    fn default() -> Self {
        Self {
            extra_closures: known_closures().collect(),
        }
    }
}

impl NyseCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weekends and scheduled holidays only.
    pub fn scheduled_only() -> Self {
        Self {
            extra_closures: BTreeSet::new(),
        }
    }

    /// Add unscheduled closures (national days of mourning, weather).
    pub fn with_closures(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.extra_closures.extend(dates);
        self
    }

    /// Observed full-day holidays for `year`, ascending.
    pub fn holidays(year: i32) -> Vec<NaiveDate> {
        let mut days = Vec::with_capacity(10);

        if let Some(new_year) = NaiveDate::from_ymd_opt(year, 1, 1) {
            match new_year.weekday() {
                Weekday::Sat => {}
                Weekday::Sun => days.push(new_year + Duration::days(1)),
                _ => days.push(new_year),
            }
        }
        days.extend(nth_weekday(year, 1, Weekday::Mon, 3));
        days.extend(nth_weekday(year, 2, Weekday::Mon, 3));
        days.extend(easter_sunday(year).map(|e| e - Duration::days(2)));
        days.extend(last_weekday(year, 5, Weekday::Mon));
        if year >= 2022 {
            days.extend(fixed_observed(year, 6, 19));
        }
        days.extend(fixed_observed(year, 7, 4));
        days.extend(nth_weekday(year, 9, Weekday::Mon, 1));
        days.extend(nth_weekday(year, 11, Weekday::Thu, 4));
        days.extend(fixed_observed(year, 12, 25));

        days.sort();
        days
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.extra_closures.contains(&date) || Self::holidays(date.year()).contains(&date)
    }
}

impl TradingCalendar for NyseCalendar {
    fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    fn next_trading_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut day = date;
        for _ in 0..MAX_CLOSED_RUN {
            day = day.succ_opt()?;
            if self.is_trading_day(day) {
                return Some(day);
            }
        }
        None
    }
}

fn known_closures() -> impl Iterator<Item = NaiveDate> {
    KNOWN_CLOSURES
        .iter()
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

fn fixed_observed(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    })
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    nth_weekday(year, month, weekday, 5).or_else(|| nth_weekday(year, month, weekday, 4))
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn holidays_2024() {
        let expected = vec![
            d(2024, 1, 1),
            d(2024, 1, 15),
            d(2024, 2, 19),
            d(2024, 3, 29),
            d(2024, 5, 27),
            d(2024, 6, 19),
            d(2024, 7, 4),
            d(2024, 9, 2),
            d(2024, 11, 28),
            d(2024, 12, 25),
        ];
        assert_eq!(NyseCalendar::holidays(2024), expected);
    }

    #[test]
    fn easter_dates() {
        assert_eq!(easter_sunday(2024), Some(d(2024, 3, 31)));
        assert_eq!(easter_sunday(2019), Some(d(2019, 4, 21)));
        assert_eq!(easter_sunday(2011), Some(d(2011, 4, 24)));
    }

    #[test]
    fn observed_rules() {
        let cal = NyseCalendar::new();
        // Independence Day on Saturday -> Friday off.
        assert!(!cal.is_trading_day(d(2020, 7, 3)));
        // On Sunday -> Monday off.
        assert!(!cal.is_trading_day(d(2021, 7, 5)));
        // New Year's Day 2022 was a Saturday; Dec 31 2021 traded.
        assert!(cal.is_trading_day(d(2021, 12, 31)));
        // Juneteenth only from 2022; 2022-06-19 was a Sunday.
        assert!(cal.is_trading_day(d(2021, 6, 18)));
        assert!(!cal.is_trading_day(d(2022, 6, 20)));
        // Christmas 2022 on Sunday.
        assert!(!cal.is_trading_day(d(2022, 12, 26)));
    }

    #[test]
    fn weekends_closed() {
        let cal = NyseCalendar::new();
        assert!(!cal.is_trading_day(d(2024, 6, 8)));
        assert!(!cal.is_trading_day(d(2024, 6, 9)));
        assert!(cal.is_trading_day(d(2024, 6, 10)));
    }

    #[test]
    fn next_trading_day_skips_weekend_and_holiday() {
        let cal = NyseCalendar::new();
        // Fri 2024-01-12 -> Tue 2024-01-16 (MLK Monday).
        assert_eq!(cal.next_trading_day(d(2024, 1, 12)), Some(d(2024, 1, 16)));
        // Thu before Good Friday -> Monday.
        assert_eq!(cal.next_trading_day(d(2024, 3, 28)), Some(d(2024, 4, 1)));
    }

    #[test]
    fn extra_closures() {
        let cal = NyseCalendar::scheduled_only();
        assert!(cal.is_trading_day(d(2018, 12, 5)));
        let cal = cal.with_closures([d(2018, 12, 5), d(2019, 3, 6)]);
        assert!(!cal.is_trading_day(d(2018, 12, 5)));
        assert!(!cal.is_trading_day(d(2019, 3, 6)));
        assert_eq!(cal.next_trading_day(d(2018, 12, 4)), Some(d(2018, 12, 6)));
    }

    #[test]
    fn known_unscheduled_closures() {
        let cal = NyseCalendar::new();
        // Hurricane Sandy: Monday and Tuesday closed.
        assert!(!cal.is_trading_day(d(2012, 10, 29)));
        assert!(!cal.is_trading_day(d(2012, 10, 30)));
        assert!(cal.is_holiday(d(2012, 10, 29)));
        assert_eq!(cal.next_trading_day(d(2012, 10, 26)), Some(d(2012, 10, 31)));
        // George H. W. Bush day of mourning.
        assert!(!cal.is_trading_day(d(2018, 12, 5)));
        // Four sessions lost after 9/11.
        assert_eq!(cal.next_trading_day(d(2001, 9, 10)), Some(d(2001, 9, 17)));
        // Closures stay out of the scheduled list.
        assert!(!NyseCalendar::holidays(2012).contains(&d(2012, 10, 29)));
    }
}
