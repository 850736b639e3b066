//! Compound polarity scoring for headlines.
//!
//! Per-token valences come from the [`Lexicon`]; rules then adjust them for
//! boosters, negation, all-caps emphasis, a contrastive "but" and trailing
//! exclamation marks. The summed valence is squashed into [-1, 1].

use super::lexicon::Lexicon;
use crate::domain::SentimentScore;

/// Normalization constant for `s / sqrt(s^2 + ALPHA)`.
const ALPHA: f64 = 15.0;
/// Added to a sentiment word written in caps inside a mixed-case headline.
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier for a valence preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;
/// Per-mark emphasis for `!`.
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// How far back boosters and negations reach.
const LOOKBACK: usize = 3;

/// Share of positive, negative and neutral tokens alongside the compound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityBreakdown {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

impl Token<'_> {
    fn is_upper(&self) -> bool {
        self.raw.chars().any(char::is_alphabetic)
            && self
                .raw
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(char::is_uppercase)
    }
}

/// Immutable headline scorer. Construct once and share by reference.
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    lexicon: Lexicon,
}

impl SentimentScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Compound score in [-1, 1]. Empty or lexicon-free text scores 0.0.
    pub fn compound(&self, text: &str) -> f64 {
        self.breakdown(text).compound
    }

    /// Score one article's headline.
    pub fn score(&self, article_id: u64, headline: &str) -> SentimentScore {
        SentimentScore::new(article_id, self.compound(headline))
    }

    pub fn breakdown(&self, text: &str) -> PolarityBreakdown {
        let tokens = split_tokens(text);
        if tokens.is_empty() {
            return PolarityBreakdown {
                positive: 0.0,
                negative: 0.0,
                neutral: 0.0,
                compound: 0.0,
            };
        }

        let mixed_case = {
            let upper = tokens.iter().filter(|t| t.is_upper()).count();
            upper > 0 && upper < tokens.len()
        };

        let mut valences: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, _)| self.token_valence(&tokens, i, mixed_case))
            .collect();

        apply_but_rule(&tokens, &mut valences);

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            let marks = text.matches('!').count().min(MAX_EXCLAMATIONS);
            let emphasis = marks as f64 * EXCLAMATION_INCREMENT;
            sum += emphasis.copysign(sum);
        }

        let compound = normalize(sum);

        let mut pos = 0.0;
        let mut neg = 0.0;
        let mut neu = 0.0;
        for v in &valences {
            if *v > 0.0 {
                pos += v + 1.0;
            } else if *v < 0.0 {
                neg += v - 1.0;
            } else {
                neu += 1.0;
            }
        }
        let total = pos + neg.abs() + neu;

        PolarityBreakdown {
            positive: pos / total,
            negative: neg.abs() / total,
            neutral: neu / total,
            compound,
        }
    }

    fn token_valence(&self, tokens: &[Token<'_>], i: usize, mixed_case: bool) -> f64 {
        let token = &tokens[i];
        if self.lexicon.booster(&token.lower).is_some() {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.valence(&token.lower) else {
            return 0.0;
        };

        if mixed_case && token.is_upper() {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        let mut negated = false;
        for distance in 1..=LOOKBACK.min(i) {
            let prev = &tokens[i - distance];
            if let Some(boost) = self.lexicon.booster(&prev.lower) {
                let mut scalar = if valence < 0.0 { -boost } else { boost };
                if mixed_case && prev.is_upper() {
                    scalar += CAPS_INCREMENT.copysign(valence);
                }
                scalar *= match distance {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                valence += scalar;
            }
            if self.lexicon.is_negation(&prev.lower) {
                negated = true;
            }
        }
        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

/// Whitespace tokens with surrounding punctuation stripped. Internal
/// apostrophes and hyphens survive, so "doesn't" and "sell-off" stay whole.
fn split_tokens(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase(),
        })
        .collect()
}

fn apply_but_rule(tokens: &[Token<'_>], valences: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < pivot {
            *v *= 0.5;
        } else if i > pivot {
            *v *= 1.5;
        }
    }
}

fn normalize(sum: f64) -> f64 {
    if sum == 0.0 || !sum.is_finite() {
        return 0.0;
    }
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
