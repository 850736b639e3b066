//! Valence lexicon, booster words, and negations.
//!
//! Valences use the [-4, +4] intensity scale of rule-based polarity scorers.
//! The built-in table leans towards financial-news vocabulary and can be
//! extended with a `word<TAB>valence` file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Additive intensity a booster word contributes.
pub const BOOST_INCREMENT: f64 = 0.293;
/// Additive intensity a dampener word contributes.
pub const BOOST_DECREMENT: f64 = -0.293;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("cannot read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: expected `word<TAB>valence`, got {content:?}")]
    Malformed {
        path: PathBuf,
        line: usize,
        content: String,
    },
}

const VALENCES: &[(&str, f64)] = &[
    // Positive
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("strong", 2.3),
    ("stronger", 2.2),
    ("strongest", 2.6),
    ("gain", 2.4),
    ("gains", 1.8),
    ("gained", 1.6),
    ("rise", 1.6),
    ("rises", 1.6),
    ("rising", 1.4),
    ("rose", 1.5),
    ("surge", 1.9),
    ("surges", 1.9),
    ("surged", 1.9),
    ("soar", 2.4),
    ("soars", 2.4),
    ("soared", 2.4),
    ("jump", 1.2),
    ("jumps", 1.2),
    ("jumped", 1.2),
    ("rally", 1.9),
    ("rallies", 1.9),
    ("rallied", 1.9),
    ("rebound", 1.4),
    ("rebounds", 1.4),
    ("recovery", 1.4),
    ("recover", 1.3),
    ("recovers", 1.3),
    ("beat", 2.0),
    ("beats", 2.0),
    ("exceed", 1.5),
    ("exceeds", 1.5),
    ("exceeded", 1.5),
    ("outperform", 1.8),
    ("outperforms", 1.8),
    ("upgrade", 1.9),
    ("upgrades", 1.9),
    ("upgraded", 1.9),
    ("raise", 1.9),
    ("raises", 1.9),
    ("raised", 1.8),
    ("boost", 1.7),
    ("boosts", 1.7),
    ("boosted", 1.7),
    ("profit", 1.9),
    ("profits", 1.9),
    ("profitable", 1.9),
    ("growth", 1.6),
    ("grow", 1.4),
    ("grows", 1.4),
    ("growing", 1.4),
    ("record", 1.2),
    ("win", 2.8),
    ("wins", 2.7),
    ("won", 2.7),
    ("winner", 2.8),
    ("winners", 2.6),
    ("success", 2.7),
    ("successful", 2.8),
    ("bullish", 2.6),
    ("optimistic", 2.0),
    ("optimism", 2.5),
    ("positive", 2.6),
    ("improve", 1.9),
    ("improves", 1.8),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("top", 0.8),
    ("best", 3.2),
    ("better", 1.9),
    ("higher", 1.0),
    ("high", 0.8),
    ("highs", 0.8),
    ("buy", 0.9),
    ("outperformer", 1.8),
    ("opportunity", 1.8),
    ("opportunities", 1.6),
    ("innovative", 2.0),
    ("innovation", 1.8),
    ("dividend", 0.6),
    ("approval", 2.1),
    ("approved", 1.8),
    ("approves", 1.7),
    ("win-win", 2.6),
    ("breakthrough", 2.4),
    ("confident", 2.2),
    ("confidence", 2.3),
    ("expand", 1.3),
    ("expands", 1.3),
    ("expansion", 1.3),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("like", 1.5),
    ("love", 3.2),
    ("nice", 1.8),
    ("happy", 2.7),
    ("accelerate", 1.2),
    ("accelerating", 1.2),
    ("robust", 1.7),
    ("solid", 1.6),
    ("impressive", 2.6),
    ("upbeat", 1.9),
    ("upside", 1.7),
    ("outpace", 1.5),
    ("outpaces", 1.5),
    ("tops", 1.1),
    ("topped", 1.1),
    ("secure", 1.4),
    ("secures", 1.4),
    ("wow", 2.8),
    ("support", 1.7),
    ("supports", 1.5),
    ("favorable", 2.1),
    ("attractive", 1.9),
    ("reward", 2.1),
    ("rewards", 2.1),
    ("healthy", 1.7),
    ("thrive", 2.2),
    ("thrives", 2.2),
    ("lead", 0.9),
    ("leads", 0.9),
    ("leader", 1.6),
    ("leading", 1.2),
    ("strength", 2.2),
    ("stable", 1.2),
    ("stability", 1.3),
    ("advance", 1.3),
    ("advances", 1.3),
    ("climb", 1.2),
    ("climbs", 1.2),
    ("climbed", 1.2),
    ("rewarding", 2.4),
    ("promising", 2.0),
    ("top-performing", 2.0),
    ("overweight", 0.9),
    ("outperformance", 1.8),
    ("well", 1.1),
    ("agreement", 2.2),
    ("partnership", 1.4),
    ("resolve", 1.6),
    ("resolved", 1.6),
    ("save", 2.2),
    ("saves", 2.0),
    ("savings", 1.6),
    ("easing", 1.2),
    ("ease", 1.5),
    ("eases", 1.5),
    ("wonderful", 2.7),
    ("amazing", 2.8),
    ("fantastic", 2.6),
    ("perfect", 2.7),
    ("awesome", 3.1),
    // Negative
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("weak", -1.9),
    ("weaker", -1.9),
    ("weakness", -1.8),
    ("loss", -1.3),
    ("losses", -1.7),
    ("lose", -1.7),
    ("loses", -1.3),
    ("lost", -1.3),
    ("fall", -1.3),
    ("falls", -1.3),
    ("fell", -1.3),
    ("falling", -1.3),
    ("drop", -1.1),
    ("drops", -1.1),
    ("dropped", -1.2),
    ("decline", -1.5),
    ("declines", -1.5),
    ("declined", -1.5),
    ("declining", -1.5),
    ("plunge", -2.2),
    ("plunges", -2.2),
    ("plunged", -2.2),
    ("plummet", -2.4),
    ("plummets", -2.4),
    ("crash", -1.7),
    ("crashes", -1.7),
    ("crashed", -1.7),
    ("tumble", -1.6),
    ("tumbles", -1.6),
    ("slump", -1.8),
    ("slumps", -1.8),
    ("sink", -1.2),
    ("sinks", -1.2),
    ("slide", -0.9),
    ("slides", -0.9),
    ("slip", -0.8),
    ("slips", -0.8),
    ("miss", -1.2),
    ("misses", -1.2),
    ("missed", -1.2),
    ("downgrade", -1.9),
    ("downgrades", -1.9),
    ("downgraded", -1.9),
    ("cut", -1.1),
    ("cuts", -1.2),
    ("lower", -1.2),
    ("lowers", -1.2),
    ("lowered", -1.2),
    ("low", -1.1),
    ("lows", -1.1),
    ("sell", -0.4),
    ("bearish", -2.3),
    ("pessimistic", -2.0),
    ("negative", -2.7),
    ("concern", -1.2),
    ("concerns", -1.2),
    ("worry", -1.9),
    ("worries", -1.8),
    ("worried", -1.2),
    ("fear", -2.2),
    ("fears", -1.8),
    ("risk", -1.1),
    ("risks", -1.1),
    ("risky", -1.4),
    ("volatile", -1.2),
    ("volatility", -0.9),
    ("uncertainty", -1.4),
    ("uncertain", -1.2),
    ("disappoint", -1.9),
    ("disappoints", -1.9),
    ("disappointing", -2.2),
    ("disappointed", -1.9),
    ("underperform", -1.8),
    ("underperforms", -1.8),
    ("underweight", -0.9),
    ("warning", -1.4),
    ("warns", -1.4),
    ("warn", -1.4),
    ("trouble", -1.7),
    ("troubled", -2.0),
    ("problem", -1.7),
    ("problems", -1.7),
    ("fail", -2.5),
    ("fails", -2.0),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fraud", -2.8),
    ("scandal", -1.9),
    ("lawsuit", -1.8),
    ("lawsuits", -1.8),
    ("sue", -1.5),
    ("sues", -1.5),
    ("sued", -1.5),
    ("inquiry", -1.0),
    ("investigation", -1.0),
    ("fine", 0.8),
    ("fined", -1.5),
    ("penalty", -1.7),
    ("recall", -1.0),
    ("recalls", -1.0),
    ("bankruptcy", -2.9),
    ("bankrupt", -2.6),
    ("default", -1.5),
    ("debt", -1.5),
    ("layoffs", -1.9),
    ("layoff", -1.9),
    ("shortage", -1.5),
    ("recession", -2.0),
    ("crisis", -3.1),
    ("collapse", -2.4),
    ("collapses", -2.4),
    ("selloff", -1.6),
    ("sell-off", -1.6),
    ("slowdown", -1.3),
    ("slowing", -1.0),
    ("slow", -0.7),
    ("hurt", -2.4),
    ("hurts", -2.1),
    ("damage", -2.2),
    ("threat", -2.4),
    ("threatens", -2.1),
    ("halt", -1.0),
    ("halts", -1.0),
    ("halted", -1.0),
    ("delay", -1.3),
    ("delays", -1.3),
    ("delayed", -1.3),
    ("suspend", -1.3),
    ("suspends", -1.3),
    ("suspended", -1.3),
    ("short", -0.3),
    ("bubble", -0.9),
    ("overvalued", -1.3),
    ("dump", -1.6),
    ("dumps", -1.6),
    ("downturn", -1.6),
    ("downside", -1.0),
    ("headwinds", -1.1),
    ("pressure", -1.2),
    ("pressured", -1.4),
    ("struggle", -1.8),
    ("struggles", -1.8),
    ("struggling", -1.8),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("awful", -2.0),
    ("poor", -2.1),
    ("shock", -1.6),
    ("shocks", -1.6),
    ("panic", -2.3),
    ("war", -2.9),
    ("tariff", -0.8),
    ("tariffs", -0.8),
    ("killed", -3.5),
    ("kill", -3.7),
    ("death", -2.9),
    ("deaths", -2.9),
    ("pandemic", -1.8),
    ("outbreak", -1.7),
    ("virus", -1.5),
    ("closure", -1.0),
    ("closures", -1.0),
    ("hack", -1.6),
    ("breach", -1.8),
    ("wrong", -2.1),
    ("error", -1.7),
    ("errors", -1.7),
    ("hate", -2.7),
    ("sad", -2.1),
    ("angry", -2.3),
    ("unfortunately", -1.7),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT),
    ("amazingly", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("considerably", BOOST_INCREMENT),
    ("decidedly", BOOST_INCREMENT),
    ("deeply", BOOST_INCREMENT),
    ("dramatically", BOOST_INCREMENT),
    ("enormously", BOOST_INCREMENT),
    ("entirely", BOOST_INCREMENT),
    ("especially", BOOST_INCREMENT),
    ("exceptionally", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("greatly", BOOST_INCREMENT),
    ("hugely", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("intensely", BOOST_INCREMENT),
    ("majorly", BOOST_INCREMENT),
    ("more", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT),
    ("particularly", BOOST_INCREMENT),
    ("purely", BOOST_INCREMENT),
    ("quite", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("remarkably", BOOST_INCREMENT),
    ("sharply", BOOST_INCREMENT),
    ("significantly", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("substantially", BOOST_INCREMENT),
    ("thoroughly", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("tremendously", BOOST_INCREMENT),
    ("unbelievably", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("almost", BOOST_DECREMENT),
    ("barely", BOOST_DECREMENT),
    ("hardly", BOOST_DECREMENT),
    ("less", BOOST_DECREMENT),
    ("little", BOOST_DECREMENT),
    ("marginally", BOOST_DECREMENT),
    ("modestly", BOOST_DECREMENT),
    ("occasionally", BOOST_DECREMENT),
    ("partly", BOOST_DECREMENT),
    ("scarcely", BOOST_DECREMENT),
    ("slightly", BOOST_DECREMENT),
    ("somewhat", BOOST_DECREMENT),
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no", "nobody", "none",
    "nope", "nor", "not", "nothing", "nowhere", "shant", "shouldnt", "wasnt", "werent", "without",
    "wont", "wouldnt", "rarely", "seldom", "despite",
];

/// Word valences plus the rule vocabularies (boosters, negations).
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: Vec<&'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// Built-in lexicon.
    pub fn new() -> Self {
        Self {
            valences: VALENCES
                .iter()
                .map(|(w, v)| ((*w).to_string(), *v))
                .collect(),
            boosters: BOOSTERS
                .iter()
                .map(|(w, v)| ((*w).to_string(), *v))
                .collect(),
            negations: NEGATIONS.to_vec(),
        }
    }

    /// Valence of a lower-cased word.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Booster increment of a lower-cased word.
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// True for negation words, including any `n't` contraction.
    pub fn is_negation(&self, word: &str) -> bool {
        if word.ends_with("n't") {
            return true;
        }
        let bare: String = word.chars().filter(|c| *c != '\'').collect();
        self.negations.contains(&bare.as_str())
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    /// Add or replace one word's valence.
    pub fn insert(&mut self, word: &str, valence: f64) {
        self.valences.insert(word.to_lowercase(), valence);
    }

    /// Merge `word<TAB>valence` lines into this lexicon. Blank lines and
    /// lines starting with `#` are skipped; extra tab-separated columns are
    /// ignored.
    pub fn extend_from_tsv(&mut self, content: &str, origin: &Path) -> Result<usize, LexiconError> {
        let mut added = 0;
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut parts = trimmed.split('\t');
            let word = parts.next().map(str::trim).filter(|w| !w.is_empty());
            let valence = parts.next().and_then(|v| v.trim().parse::<f64>().ok());
            match (word, valence) {
                (Some(word), Some(valence)) if valence.is_finite() => {
                    self.insert(word, valence);
                    added += 1;
                }
                _ => {
                    return Err(LexiconError::Malformed {
                        path: origin.to_path_buf(),
                        line: i + 1,
                        content: line.to_string(),
                    })
                }
            }
        }
        Ok(added)
    }

    /// Built-in lexicon extended with the overrides file at `path`.
    pub fn with_overrides(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut lexicon = Self::new();
        let added = lexicon.extend_from_tsv(&content, path)?;
        tracing::info!(path = %path.display(), added, "loaded lexicon overrides");
        Ok(lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookups() {
        let lex = Lexicon::new();
        assert_eq!(lex.valence("good"), Some(1.9));
        assert!(lex.valence("plunge").unwrap() < 0.0);
        assert_eq!(lex.valence("the"), None);
        assert_eq!(lex.booster("very"), Some(BOOST_INCREMENT));
        assert_eq!(lex.booster("slightly"), Some(BOOST_DECREMENT));
    }

    #[test]
    fn negations_cover_contractions() {
        let lex = Lexicon::new();
        assert!(lex.is_negation("not"));
        assert!(lex.is_negation("doesn't"));
        assert!(lex.is_negation("dont"));
        assert!(lex.is_negation("won't"));
        assert!(!lex.is_negation("note"));
    }

    #[test]
    fn tsv_overrides_replace_and_add() {
        let mut lex = Lexicon::new();
        let added = lex
            .extend_from_tsv("# custom\nguidance\t0.5\ngood\t2.5\tignored\n\n", Path::new("x.tsv"))
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(lex.valence("guidance"), Some(0.5));
        assert_eq!(lex.valence("good"), Some(2.5));
    }

    #[test]
    fn tsv_rejects_malformed_line() {
        let mut lex = Lexicon::new();
        let err = lex
            .extend_from_tsv("good\t2.5\nbroken line\n", Path::new("x.tsv"))
            .unwrap_err();
        assert!(matches!(err, LexiconError::Malformed { line: 2, .. }));
    }
}
