//! Close-to-close daily returns.

use crate::domain::{DailyReturn, PriceBar};

/// `(close[t] - close[t-1]) / close[t-1]` per bar, `None` for the first bar
/// and wherever the previous close is zero.
pub fn daily_returns(bars: &[PriceBar]) -> Vec<DailyReturn> {
    let mut out = Vec::with_capacity(bars.len());
    let mut prev_close: Option<f64> = None;
    for bar in bars {
        let pct_change = prev_close
            .filter(|p| *p != 0.0)
            .map(|p| (bar.close - p) / p);
        out.push(DailyReturn {
            symbol: bar.symbol.clone(),
            date: bar.date,
            pct_change,
        });
        prev_close = Some(bar.close);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn returns_worked_example() {
        let bars = make_bars(&[100.0, 105.0, 103.0]);
        let returns = daily_returns(&bars);

        assert_eq!(returns.len(), 3);
        assert!(returns[0].pct_change.is_none());
        assert_approx(returns[1].pct_change.unwrap(), 0.05, 1e-12);
        assert_approx(returns[2].pct_change.unwrap(), -2.0 / 105.0, 1e-12);
        assert_approx(returns[2].pct_change.unwrap(), -0.019, 1e-3);
        assert_eq!(returns[2].date, bars[2].date);
    }

    #[test]
    fn empty_and_single() {
        assert!(daily_returns(&[]).is_empty());
        let one = daily_returns(&make_bars(&[50.0]));
        assert_eq!(one.len(), 1);
        assert!(one[0].pct_change.is_none());
    }
}
