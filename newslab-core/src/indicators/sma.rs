//! Simple Moving Average (SMA) and price/average crossovers.
//!
//! Running-sum mean of closes over a trailing window: the entering close is
//! added and the leaving close subtracted, so each step is O(1).
//! Lookback: window - 1 (first value at index window-1).

use crate::domain::{CrossDirection, Crossover, MaPoint, MovingAverageSeries, PriceBar};

pub const DEFAULT_WINDOW: usize = 40;

#[derive(Debug, Clone, Copy)]
pub struct Sma {
    window: usize,
}

impl Default for Sma {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Sma {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "SMA window must be >= 1");
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn lookback(&self) -> usize {
        self.window - 1
    }

    /// Moving average of `closes`, `None` until the window fills.
    pub fn compute_values(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let n = closes.len();
        let mut result = vec![None; n];
        if n < self.window {
            return result;
        }

        let w = self.window as f64;
        let mut sum: f64 = closes[..self.window].iter().sum();
        result[self.window - 1] = Some(sum / w);

        for i in self.window..n {
            sum += closes[i] - closes[i - self.window];
            result[i] = Some(sum / w);
        }
        result
    }

    /// SMA series for one symbol's ordered bars.
    pub fn compute(&self, bars: &[PriceBar]) -> MovingAverageSeries {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let points = bars
            .iter()
            .zip(self.compute_values(&closes))
            .map(|(bar, value)| MaPoint {
                date: bar.date,
                value,
            })
            .collect();
        MovingAverageSeries {
            symbol: bars.first().map(|b| b.symbol.clone()).unwrap_or_default(),
            window: self.window,
            points,
        }
    }
}

fn side(close: f64, avg: f64) -> i8 {
    let diff = close - avg;
    if diff > 0.0 {
        1
    } else if diff < 0.0 {
        -1
    } else {
        0
    }
}

/// Indices where the close moves to a different side of its average.
///
/// Index i is flagged when both averages at i-1 and i are present and the
/// sign of `close - avg` differs between them. Touching the average (sign 0)
/// counts as a side of its own; the direction follows the sign change, so
/// rising from below onto the average is `Above`.
pub fn detect_crossovers(bars: &[PriceBar], series: &MovingAverageSeries) -> Vec<Crossover> {
    let mut out = Vec::new();
    let mut prev: Option<i8> = None;
    for (i, (bar, point)) in bars.iter().zip(&series.points).enumerate() {
        let Some(avg) = point.value else {
            prev = None;
            continue;
        };
        let current = side(bar.close, avg);
        if let Some(before) = prev {
            if before != current {
                out.push(Crossover {
                    index: i,
                    date: bar.date,
                    direction: if current > before {
                        CrossDirection::Above
                    } else {
                        CrossDirection::Below
                    },
                });
            }
        }
        prev = Some(current);
    }
    out
}
