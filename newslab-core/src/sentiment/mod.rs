//! Lexicon-and-rule sentiment scoring.
//!
//! The scorer is an explicitly constructed immutable value: build one per run
//! and share it by reference. Scoring is deterministic in the headline text.

pub mod lexicon;
pub mod scorer;

pub use lexicon::{Lexicon, LexiconError};
pub use scorer::{PolarityBreakdown, SentimentScorer};
