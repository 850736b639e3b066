//! Derived per-symbol series: moving averages, crossovers, daily returns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of a moving-average series. `value` is `None` during warmup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Simple moving average of closes for one symbol, aligned to its bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageSeries {
    pub symbol: String,
    pub window: usize,
    pub points: Vec<MaPoint>,
}

impl MovingAverageSeries {
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Which side of the average the close moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossDirection {
    Above,
    Below,
}

/// Bar index where the close crossed its moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossover {
    pub index: usize,
    pub date: NaiveDate,
    pub direction: CrossDirection,
}

/// Close-to-close percentage change. `None` for a symbol's first bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReturn {
    pub symbol: String,
    pub date: NaiveDate,
    pub pct_change: Option<f64>,
}
