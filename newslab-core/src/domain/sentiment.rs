//! Sentiment categories and per-article scores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Five ordered sentiment buckets over the compound score.
///
/// Boundaries at ±0.1 and ±0.7 resolve away from zero:
///
/// | compound            | category     |
/// |---------------------|--------------|
/// | c >= 0.7            | VeryPositive |
/// | 0.1 <= c < 0.7      | Positive     |
/// | -0.1 < c < 0.1      | Neutral      |
/// | -0.7 < c <= -0.1    | Negative     |
/// | c <= -0.7           | VeryNegative |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentimentCategory {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentCategory {
    pub const ALL: [SentimentCategory; 5] = [
        SentimentCategory::VeryNegative,
        SentimentCategory::Negative,
        SentimentCategory::Neutral,
        SentimentCategory::Positive,
        SentimentCategory::VeryPositive,
    ];

    /// Classify a compound score. Total: NaN maps to `Neutral`.
    pub fn from_compound(compound: f64) -> Self {
        if compound.is_nan() {
            SentimentCategory::Neutral
        } else if compound >= 0.7 {
            SentimentCategory::VeryPositive
        } else if compound >= 0.1 {
            SentimentCategory::Positive
        } else if compound > -0.1 {
            SentimentCategory::Neutral
        } else if compound > -0.7 {
            SentimentCategory::Negative
        } else {
            SentimentCategory::VeryNegative
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn group(self) -> SentimentGroup {
        match self {
            SentimentCategory::VeryNegative | SentimentCategory::Negative => {
                SentimentGroup::Negative
            }
            SentimentCategory::Neutral => SentimentGroup::Neutral,
            SentimentCategory::Positive | SentimentCategory::VeryPositive => {
                SentimentGroup::Positive
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentCategory::VeryNegative => "very-negative",
            SentimentCategory::Negative => "negative",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Positive => "positive",
            SentimentCategory::VeryPositive => "very-positive",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way grouping: the "very" categories folded into their neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentimentGroup {
    Negative,
    Neutral,
    Positive,
}

impl SentimentGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentGroup::Negative => "negative",
            SentimentGroup::Neutral => "neutral",
            SentimentGroup::Positive => "positive",
        }
    }
}

/// Score for one article. `article_id` is the article's ordinal in the
/// deduplicated news stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub article_id: u64,
    pub compound: f64,
    pub category: SentimentCategory,
}

impl SentimentScore {
    pub fn new(article_id: u64, compound: f64) -> Self {
        Self {
            article_id,
            compound,
            category: SentimentCategory::from_compound(compound),
        }
    }
}

/// Article counts per category, indexed in `SentimentCategory::ALL` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts([usize; 5]);

impl CategoryCounts {
    pub fn record(&mut self, category: SentimentCategory) {
        self.0[category.index()] += 1;
    }

    pub fn get(&self, category: SentimentCategory) -> usize {
        self.0[category.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn group_count(&self, group: SentimentGroup) -> usize {
        SentimentCategory::ALL
            .iter()
            .filter(|c| c.group() == group)
            .map(|c| self.get(*c))
            .sum()
    }

    pub fn merge(&mut self, other: &CategoryCounts) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SentimentCategory, usize)> + '_ {
        SentimentCategory::ALL.iter().map(|c| (*c, self.get(*c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_resolve_away_from_zero() {
        assert_eq!(SentimentCategory::from_compound(0.1), SentimentCategory::Positive);
        assert_eq!(SentimentCategory::from_compound(-0.1), SentimentCategory::Negative);
        assert_eq!(SentimentCategory::from_compound(0.7), SentimentCategory::VeryPositive);
        assert_eq!(SentimentCategory::from_compound(-0.7), SentimentCategory::VeryNegative);
    }

    #[test]
    fn interior_values() {
        assert_eq!(SentimentCategory::from_compound(0.81), SentimentCategory::VeryPositive);
        assert_eq!(SentimentCategory::from_compound(0.0), SentimentCategory::Neutral);
        assert_eq!(SentimentCategory::from_compound(0.099), SentimentCategory::Neutral);
        assert_eq!(SentimentCategory::from_compound(-0.099), SentimentCategory::Neutral);
        assert_eq!(SentimentCategory::from_compound(0.69), SentimentCategory::Positive);
        assert_eq!(SentimentCategory::from_compound(-0.69), SentimentCategory::Negative);
        assert_eq!(SentimentCategory::from_compound(1.0), SentimentCategory::VeryPositive);
        assert_eq!(SentimentCategory::from_compound(-1.0), SentimentCategory::VeryNegative);
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(SentimentCategory::from_compound(f64::NAN), SentimentCategory::Neutral);
    }

    #[test]
    fn groups_fold_very_categories() {
        assert_eq!(SentimentCategory::VeryPositive.group(), SentimentGroup::Positive);
        assert_eq!(SentimentCategory::VeryNegative.group(), SentimentGroup::Negative);
        assert_eq!(SentimentCategory::Neutral.group(), SentimentGroup::Neutral);
    }

    #[test]
    fn category_counts_record_and_merge() {
        let mut a = CategoryCounts::default();
        a.record(SentimentCategory::Positive);
        a.record(SentimentCategory::VeryPositive);
        let mut b = CategoryCounts::default();
        b.record(SentimentCategory::Negative);
        a.merge(&b);
        assert_eq!(a.total(), 3);
        assert_eq!(a.group_count(SentimentGroup::Positive), 2);
        assert_eq!(a.get(SentimentCategory::Negative), 1);
    }

    #[test]
    fn category_serializes_kebab_case() {
        let json = serde_json::to_string(&SentimentCategory::VeryPositive).unwrap();
        assert_eq!(json, "\"very-positive\"");
    }
}
