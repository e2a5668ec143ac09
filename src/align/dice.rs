//!
//! Dice coefficient aligner
//!
//! ```text
//! dice(f, e) = 2 c(f, e) / (c(f) + c(e))
//! ```
//!
//! where `c(f, e)` counts co-occurrences of every french token with every
//! english token of the same sentence pair. Decoding is competitive linking.
//!
use super::linking::competitive_linking;
use super::sentence::{Alignment, SentencePair};
use super::WordAligner;
use crate::counter::{Counter, CounterMap};
use crate::error::{Error, Result};
use log::info;

#[derive(Clone, Debug, Default)]
pub struct DiceAligner {
    french_count: Counter<String>,
    english_count: Counter<String>,
    /// `c[f][e]`
    pair_count: CounterMap<String, String>,
}

impl DiceAligner {
    pub fn new() -> Self {
        DiceAligner::default()
    }
    ///
    /// Dice coefficient of `french` and `english`, `0` if both are unseen.
    ///
    pub fn score(&self, french: &str, english: &str) -> f64 {
        let denominator = self.french_count.get(french) + self.english_count.get(english);
        if denominator > 0.0 {
            2.0 * self.pair_count.get(french, english) / denominator
        } else {
            0.0
        }
    }
}

impl WordAligner for DiceAligner {
    fn train(&mut self, pairs: &[SentencePair]) -> Result<()> {
        if pairs.is_empty() {
            return Err(Error::EmptyTrainingData);
        }
        for pair in pairs {
            for f in pair.french.iter() {
                self.french_count.increment(f.clone(), 1.0);
                for e in pair.english.iter() {
                    self.pair_count.increment(f.clone(), e.clone(), 1.0);
                }
            }
            for e in pair.english.iter() {
                self.english_count.increment(e.clone(), 1.0);
            }
        }
        info!(
            "dice trained n_french_words={} n_english_words={}",
            self.french_count.len(),
            self.english_count.len()
        );
        Ok(())
    }
    fn align(&self, pair: &SentencePair) -> Alignment {
        competitive_linking(pair, |i, j| self.score(&pair.french[j], &pair.english[i]))
    }
}
