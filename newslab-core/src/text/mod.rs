//! Headline text features: tokenization and normalization.

pub mod stopwords;
pub mod tokenizer;

pub use tokenizer::{Normalizer, Tokenizer};
