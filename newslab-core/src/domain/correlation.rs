//! Lagged sentiment/return correlation results.

use serde::{Deserialize, Serialize};

/// Whether the sample is large enough to read the coefficient at face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Sufficient,
    LowConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Significance {
    /// Infinite when |r| = 1.
    #[serde(with = "signed_infinity")]
    pub t_statistic: f64,
    /// Two-sided, Student's t with n - 2 degrees of freedom.
    pub p_value: f64,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorrelationOutcome {
    Value {
        coefficient: f64,
        significance: Significance,
    },
    /// Too few pairs, or a constant series: no coefficient is defined.
    InsufficientSample,
}

/// Pearson correlation of daily returns against daily mean sentiment for
/// one symbol at one lag. Positive lags pair sentiment with later returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub symbol: String,
    pub lag: i32,
    pub sample_size: usize,
    pub outcome: CorrelationOutcome,
}

/// JSON has no infinities; they travel as `"inf"` / `"-inf"`.
mod signed_infinity {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => match s.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(serde::de::Error::custom(format!(
                    "expected a number, \"inf\" or \"-inf\", got {other:?}"
                ))),
            },
        }
    }
}

impl CorrelationResult {
    pub fn coefficient(&self) -> Option<f64> {
        match self.outcome {
            CorrelationOutcome::Value { coefficient, .. } => Some(coefficient),
            CorrelationOutcome::InsufficientSample => None,
        }
    }

    pub fn significance(&self) -> Option<&Significance> {
        match &self.outcome {
            CorrelationOutcome::Value { significance, .. } => Some(significance),
            CorrelationOutcome::InsufficientSample => None,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.significance()
            .is_some_and(|s| s.confidence == Confidence::LowConfidence)
    }
}
