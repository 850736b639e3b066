//! Lagged Pearson correlation between daily returns and daily sentiment.
//!
//! Lag is counted in trading sessions of the symbol's price series: at lag
//! L the return of session i is paired with the sentiment of session i-L,
//! so positive lags ask whether sentiment leads returns. Sessions where
//! either side is missing are dropped.

pub mod stats;

pub use stats::{correlation_t_statistic, pearson, t_cdf, two_sided_p_value};

use crate::domain::{
    Confidence, CorrelationOutcome, CorrelationResult, DailyReturn, DailySentimentAggregate,
    Significance,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MIN_SAMPLE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    pub lags: Vec<i32>,
    /// Below this many pairs a coefficient is flagged `LowConfidence`.
    pub min_sample: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            lags: (-3..=3).collect(),
            min_sample: DEFAULT_MIN_SAMPLE,
        }
    }
}

/// Pairs `(a[i], b[i - lag])` where both are present, in ascending i.
pub fn lagged_pairs(a: &[Option<f64>], b: &[Option<f64>], lag: i32) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let lag = lag as i64;
    for (i, x) in a.iter().enumerate() {
        let j = i as i64 - lag;
        if j < 0 {
            continue;
        }
        let (Some(x), Some(Some(y))) = (x, b.get(j as usize)) else {
            continue;
        };
        xs.push(*x);
        ys.push(*y);
    }
    (xs, ys)
}

/// Correlation of `a[i]` against `b[i - lag]`.
///
/// Symmetric in the sense that `lagged_pearson(a, b, l)` equals
/// `lagged_pearson(b, a, -l)`.
pub fn lagged_pearson(
    a: &[Option<f64>],
    b: &[Option<f64>],
    lag: i32,
    min_sample: usize,
) -> (usize, CorrelationOutcome) {
    let (xs, ys) = lagged_pairs(a, b, lag);
    let n = xs.len();
    let Some(r) = pearson(&xs, &ys) else {
        return (n, CorrelationOutcome::InsufficientSample);
    };
    let t = correlation_t_statistic(r, n);
    let significance = Significance {
        t_statistic: t,
        p_value: two_sided_p_value(t, (n - 2) as f64),
        confidence: if n < min_sample {
            Confidence::LowConfidence
        } else {
            Confidence::Sufficient
        },
    };
    (
        n,
        CorrelationOutcome::Value {
            coefficient: r,
            significance,
        },
    )
}

/// Mean sentiment aligned to the return sessions; `None` on days without
/// articles.
pub fn align_sentiment(
    returns: &[DailyReturn],
    sentiment: &BTreeMap<NaiveDate, &DailySentimentAggregate>,
) -> Vec<Option<f64>> {
    returns
        .iter()
        .map(|r| sentiment.get(&r.date).map(|a| a.mean_compound))
        .collect()
}

/// One result per configured lag for a single symbol.
pub fn correlate_symbol(
    symbol: &str,
    returns: &[DailyReturn],
    sentiment: &BTreeMap<NaiveDate, &DailySentimentAggregate>,
    config: &CorrelationConfig,
) -> Vec<CorrelationResult> {
    let ret: Vec<Option<f64>> = returns.iter().map(|r| r.pct_change).collect();
    let sent = align_sentiment(returns, sentiment);

    config
        .lags
        .iter()
        .map(|&lag| {
            let (sample_size, outcome) = lagged_pearson(&ret, &sent, lag, config.min_sample);
            match &outcome {
                CorrelationOutcome::InsufficientSample => {
                    tracing::debug!(symbol, lag, sample_size, "insufficient sample")
                }
                CorrelationOutcome::Value { significance, .. }
                    if significance.confidence == Confidence::LowConfidence =>
                {
                    tracing::warn!(symbol, lag, sample_size, "low-confidence correlation")
                }
                _ => {}
            }
            CorrelationResult {
                symbol: symbol.to_string(),
                lag,
                sample_size,
                outcome,
            }
        })
        .collect()
}
