//! Word frequencies and PMI-ranked trigrams.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Token frequency table.
#[derive(Debug, Clone, Default)]
pub struct WordCounter {
    counts: HashMap<String, u64>,
    total: u64,
}

impl WordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            let token = token.as_ref();
            match self.counts.get_mut(token) {
                Some(c) => *c += 1,
                None => {
                    self.counts.insert(token.to_string(), 1);
                }
            }
            self.total += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Most frequent words, count descending then word ascending.
    pub fn top(&self, n: usize) -> Vec<WordCount> {
        let mut all: Vec<WordCount> = self
            .counts
            .iter()
            .map(|(word, &count)| WordCount {
                word: word.clone(),
                count,
            })
            .collect();
        all.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        all.truncate(n);
        all
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigram {
    pub words: [String; 3],
    pub count: u64,
    pub pmi: f64,
}

/// Trigram collocation finder over the flattened token stream.
///
/// Headlines are concatenated, so a trigram may straddle two consecutive
/// headlines. Words are interned to keep the trigram table compact.
#[derive(Debug, Clone, Default)]
pub struct TrigramCounter {
    vocab: HashMap<String, u32>,
    words: Vec<String>,
    unigrams: Vec<u64>,
    trigrams: HashMap<[u32; 3], u64>,
    window: [Option<u32>; 2],
    total: u64,
}

impl TrigramCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, word: &str) -> u32 {
        if let Some(&id) = self.vocab.get(word) {
            return id;
        }
        let id = self.words.len() as u32;
        self.vocab.insert(word.to_string(), id);
        self.words.push(word.to_string());
        self.unigrams.push(0);
        id
    }

    pub fn add_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            let id = self.intern(token.as_ref());
            self.unigrams[id as usize] += 1;
            self.total += 1;
            if let [Some(a), Some(b)] = self.window {
                *self.trigrams.entry([a, b, id]).or_insert(0) += 1;
            }
            self.window = [self.window[1], Some(id)];
        }
    }

    /// Number of words seen.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, words: [&str; 3]) -> u64 {
        let ids = words.map(|w| self.vocab.get(w).copied());
        match ids {
            [Some(a), Some(b), Some(c)] => self.trigrams.get(&[a, b, c]).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// log2(f(abc) * N^2) - log2(f(a) * f(b) * f(c))
    fn pmi(&self, ids: [u32; 3], count: u64) -> f64 {
        let n = self.total as f64;
        let product: f64 = ids.iter().map(|&i| self.unigrams[i as usize] as f64).product();
        (count as f64 * n * n).log2() - product.log2()
    }

    /// Trigrams seen at least `min_freq` times, PMI descending, ties by
    /// words ascending.
    pub fn top_by_pmi(&self, min_freq: u64, n: usize) -> Vec<Trigram> {
        let mut ranked: Vec<([u32; 3], u64, f64)> = self
            .trigrams
            .iter()
            .filter(|(_, &count)| count >= min_freq)
            .map(|(&ids, &count)| (ids, count, self.pmi(ids, count)))
            .collect();
        ranked.sort_by(|a, b| {
            b.2.total_cmp(&a.2).then_with(|| {
                let wa = a.0.map(|i| self.words[i as usize].as_str());
                let wb = b.0.map(|i| self.words[i as usize].as_str());
                wa.cmp(&wb)
            })
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(ids, count, pmi)| Trigram {
                words: ids.map(|i| self.words[i as usize].clone()),
                count,
                pmi,
            })
            .collect()
    }
}
