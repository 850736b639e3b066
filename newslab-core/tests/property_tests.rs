//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Running-sum SMA matches a brute-force window mean
//! 2. Deduplication is idempotent and keeps first occurrences
//! 3. Category mapping is total and monotone in the compound score
//! 4. Lagged correlation is symmetric under swapping series and negating lag
//! 5. Scorer output stays in [-1, 1]

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use newslab_core::correlation::lagged_pearson;
use newslab_core::data::Deduplicated;
use newslab_core::domain::{NewsArticle, SentimentCategory};
use newslab_core::indicators::Sma;
use newslab_core::sentiment::SentimentScorer;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0), 0..120)
}

fn arb_article() -> impl Strategy<Value = NewsArticle> {
    (0..4usize, 0..3usize, 0..3i64, 0..2usize).prop_map(|(h, p, t, s)| NewsArticle {
        headline: ["Stocks rally", "Stocks slide", "Apple beats", "Fed holds"][h].to_string(),
        publisher: ["Lisa Levin", "Benzinga Newsdesk", "eric@benzinga.com"][p].to_string(),
        published_at: Utc.with_ymd_and_hms(2024, 6, 3, 14, 0, 0).unwrap() + Duration::minutes(t),
        symbol: ["AAPL", "MSFT"][s].to_string(),
        url: String::new(),
    })
}

fn arb_series() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.8, -1.0..1.0_f64), 0..40)
}

// ── 1. SMA ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_matches_brute_force(closes in arb_closes(), window in 1usize..30) {
        let values = Sma::new(window).compute_values(&closes);
        prop_assert_eq!(values.len(), closes.len());
        for (i, v) in values.iter().enumerate() {
            if i + 1 < window {
                prop_assert!(v.is_none());
            } else {
                let slice = &closes[i + 1 - window..=i];
                let expected = slice.iter().sum::<f64>() / window as f64;
                let got = v.unwrap();
                prop_assert!((got - expected).abs() < 1e-6, "i={} got={} expected={}", i, got, expected);
            }
        }
    }
}

// ── 2. Deduplication ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn dedup_is_idempotent(articles in prop::collection::vec(arb_article(), 0..60)) {
        let once: Vec<NewsArticle> = Deduplicated::new(articles.clone().into_iter()).collect();
        let twice: Vec<NewsArticle> = Deduplicated::new(once.clone().into_iter()).collect();
        prop_assert_eq!(&once, &twice);

        // First occurrences, in input order.
        let mut expected: Vec<NewsArticle> = Vec::new();
        for a in &articles {
            if !expected.iter().any(|e| e.key() == a.key()) {
                expected.push(a.clone());
            }
        }
        prop_assert_eq!(once, expected);
    }
}

// ── 3. Categories ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn category_is_monotone(a in -1.0..=1.0_f64, b in -1.0..=1.0_f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(SentimentCategory::from_compound(lo) <= SentimentCategory::from_compound(hi));
    }

    #[test]
    fn category_is_total(x in any::<f64>()) {
        let c = SentimentCategory::from_compound(x);
        prop_assert!(SentimentCategory::ALL.contains(&c));
    }
}

// ── 4. Lag symmetry ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn lagged_pearson_is_symmetric(a in arb_series(), b in arb_series(), lag in -5i32..=5) {
        prop_assert_eq!(lagged_pearson(&a, &b, lag, 20), lagged_pearson(&b, &a, -lag, 20));
    }
}

// ── 5. Scorer range ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn compound_in_range(words in prop::collection::vec(
        prop::sample::select(vec![
            "not", "very", "GOOD", "good", "bad", "BAD", "but", "plunge", "soars",
            "slightly", "record", "loss", "!", "shares", "Apple",
        ]),
        0..25,
    )) {
        let scorer = SentimentScorer::default();
        let text = words.join(" ");
        let c = scorer.compound(&text);
        prop_assert!((-1.0..=1.0).contains(&c), "{} -> {}", text, c);
    }
}
