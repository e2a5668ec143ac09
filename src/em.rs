//!
//! EM estimation of word translation (and distortion) tables
//!
//! ## Model
//!
//! For one direction, every source sentence `S` generates the target sentence
//! `T` word by word. Target word `T_j` is generated by one of the source words
//! `S_i` with probability
//!
//! ```text
//! t[S_i][T_j] * q[(|S|, |T|, j)][i]
//! ```
//!
//! where `q` is fixed to 1 when distortion is disabled (IBM model 1).
//!
//! ## E-step
//!
//! For every target position `j`, `Z = sum_i t * q` and each source position
//! receives the posterior `t * q / Z` as an expected count. Positions with
//! `Z = 0` contribute nothing.
//!
//! ## M-step
//!
//! The expected counts are conditionally normalized and *replace* the tables.
//!
//! The number of iterations is fixed; there is no convergence test.
//!
pub mod estep;
pub mod tables;

pub use estep::PartialCounts;
pub use tables::{DistortionKey, DistortionTable, TranslationTable};

use crate::align::SentencePair;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

///
/// Training parameters of EM.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmConfig {
    /// number of EM iterations
    pub n_iterations: usize,
    /// estimate the distortion table `q` (IBM model 2) or not (IBM model 1)
    pub distortion: bool,
}

impl EmConfig {
    /// IBM model 1 setting
    pub fn ibm1() -> Self {
        EmConfig {
            n_iterations: 5,
            distortion: false,
        }
    }
    /// IBM model 2 setting
    pub fn ibm2() -> Self {
        EmConfig {
            n_iterations: 5,
            distortion: true,
        }
    }
}

impl Default for EmConfig {
    fn default() -> Self {
        EmConfig::ibm1()
    }
}

///
/// Which side of a sentence pair generates the other.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// english is the source, french the target: `t[e][f]`
    EnglishToFrench,
    /// french is the source, english the target: `t[f][e]`
    FrenchToEnglish,
}

impl Direction {
    ///
    /// `(source, target)` sides of `pair`.
    ///
    pub fn split<'a>(&self, pair: &'a SentencePair) -> (&'a [String], &'a [String]) {
        match self {
            Direction::EnglishToFrench => (pair.english.as_slice(), pair.french.as_slice()),
            Direction::FrenchToEnglish => (pair.french.as_slice(), pair.english.as_slice()),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Direction::EnglishToFrench => write!(f, "e->f"),
            Direction::FrenchToEnglish => write!(f, "f->e"),
        }
    }
}

///
/// Log of each EM iteration
///
#[derive(Clone, Copy, Debug)]
pub struct EmLog {
    pub iteration: usize,
    /// `sum ln Z` of the E-step in this iteration
    pub log_likelihood: f64,
}

impl std::fmt::Display for EmLog {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}\t{}", self.iteration, self.log_likelihood)
    }
}

///
/// Translation (and distortion) tables of one direction.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionalModel {
    direction: Direction,
    use_distortion: bool,
    translation: TranslationTable,
    distortion: DistortionTable,
}

impl DirectionalModel {
    ///
    /// Initial tables.
    ///
    /// * `t[s][t] = 1 / (1 + |T|)` for every co-occurring pair; when the pair
    ///   co-occurs in several sentences the last one wins.
    /// * `q[(|S|, |T|, j)][i] = 1 / (1 + |S|)`.
    ///
    pub fn init(pairs: &[SentencePair], direction: Direction, use_distortion: bool) -> Self {
        let mut translation = TranslationTable::new();
        let mut distortion = DistortionTable::new();
        for pair in pairs {
            let (source, target) = direction.split(pair);
            let t0 = 1.0 / (1.0 + target.len() as f64);
            for s in source {
                for t in target {
                    translation.set(s.clone(), t.clone(), t0);
                }
            }
            if use_distortion {
                let q0 = 1.0 / (1.0 + source.len() as f64);
                for j in 0..target.len() {
                    let key = DistortionKey::new(source.len(), target.len(), j);
                    for i in 0..source.len() {
                        distortion.set(key, i, q0);
                    }
                }
            }
        }
        DirectionalModel {
            direction,
            use_distortion,
            translation,
            distortion,
        }
    }
    pub fn direction(&self) -> Direction {
        self.direction
    }
    pub fn translation(&self) -> &TranslationTable {
        &self.translation
    }
    pub fn distortion(&self) -> &DistortionTable {
        &self.distortion
    }
    ///
    /// `t[source][target]`, `0` if never co-occurred.
    ///
    pub fn t(&self, source: &str, target: &str) -> f64 {
        self.translation.get(source, target)
    }
    ///
    /// `q[(source_len, target_len, target_pos)][source_pos]`,
    /// always `1` if distortion is disabled.
    ///
    pub fn q(
        &self,
        source_len: usize,
        target_len: usize,
        target_pos: usize,
        source_pos: usize,
    ) -> f64 {
        if self.use_distortion {
            let key = DistortionKey::new(source_len, target_len, target_pos);
            self.distortion.get(&key, &source_pos)
        } else {
            1.0
        }
    }
    ///
    /// E-step of one sentence pair.
    ///
    pub fn expectation(&self, pair: &SentencePair) -> PartialCounts {
        let (source, target) = self.direction.split(pair);
        let mut counts = PartialCounts::new();
        for (j, t) in target.iter().enumerate() {
            let scores: Vec<f64> = source
                .iter()
                .enumerate()
                .map(|(i, s)| self.t(s, t) * self.q(source.len(), target.len(), j, i))
                .collect();
            let z: f64 = scores.iter().sum();
            if z > 0.0 {
                counts.log_likelihood += z.ln();
                let key = DistortionKey::new(source.len(), target.len(), j);
                for (i, s) in source.iter().enumerate() {
                    let posterior = scores[i] / z;
                    counts.translation.increment(s.clone(), t.clone(), posterior);
                    if self.use_distortion {
                        counts.distortion.increment(key, i, posterior);
                    }
                }
            }
        }
        counts
    }
    ///
    /// M-step: replace the tables with the normalized expected counts.
    ///
    pub fn maximize(&mut self, counts: PartialCounts) {
        self.translation = counts.translation.conditional_normalize();
        if self.use_distortion {
            self.distortion = counts.distortion.conditional_normalize();
        }
    }
    ///
    /// One EM iteration over the corpus.
    ///
    /// Sentences are processed in parallel and their counts merged in corpus
    /// order before the M-step.
    ///
    pub fn iterate(&mut self, pairs: &[SentencePair]) -> f64 {
        let partials: Vec<PartialCounts> = pairs
            .par_iter()
            .map(|pair| self.expectation(pair))
            .collect();
        let mut counts = PartialCounts::new();
        for partial in partials {
            counts.merge(partial);
        }
        let log_likelihood = counts.log_likelihood;
        self.maximize(counts);
        log_likelihood
    }
    ///
    /// `sum_j ln Z_j` of the corpus under the current tables.
    ///
    pub fn log_likelihood(&self, pairs: &[SentencePair]) -> f64 {
        pairs
            .par_iter()
            .map(|pair| self.expectation(pair).log_likelihood)
            .collect::<Vec<f64>>()
            .into_iter()
            .sum()
    }
}

///
/// Run EM for one direction.
///
pub fn estimate(
    pairs: &[SentencePair],
    direction: Direction,
    config: &EmConfig,
) -> DirectionalModel {
    estimate_with_logs(pairs, direction, config).0
}

///
/// Run EM for one direction and keep the log of every iteration.
///
pub fn estimate_with_logs(
    pairs: &[SentencePair],
    direction: Direction,
    config: &EmConfig,
) -> (DirectionalModel, Vec<EmLog>) {
    let mut model = DirectionalModel::init(pairs, direction, config.distortion);
    info!(
        "em {} init n_sentences={} n_source_words={}",
        direction,
        pairs.len(),
        model.translation.len()
    );
    let mut logs = Vec::with_capacity(config.n_iterations);
    for iteration in 0..config.n_iterations {
        let log_likelihood = model.iterate(pairs);
        info!("em {} iteration={} ll={}", direction, iteration, log_likelihood);
        logs.push(EmLog {
            iteration,
            log_likelihood,
        });
    }
    (model, logs)
}

///
/// Independently estimated models of both directions.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BidirectionalModel {
    pub english_to_french: DirectionalModel,
    pub french_to_english: DirectionalModel,
}

impl BidirectionalModel {
    ///
    /// Models with empty tables: every `t` is zero.
    ///
    pub fn untrained() -> Self {
        BidirectionalModel {
            english_to_french: DirectionalModel::init(&[], Direction::EnglishToFrench, false),
            french_to_english: DirectionalModel::init(&[], Direction::FrenchToEnglish, false),
        }
    }
    ///
    /// Estimate both directions over the same corpus in parallel.
    ///
    pub fn estimate(pairs: &[SentencePair], config: &EmConfig) -> Self {
        let (english_to_french, french_to_english) = rayon::join(
            || estimate(pairs, Direction::EnglishToFrench, config),
            || estimate(pairs, Direction::FrenchToEnglish, config),
        );
        BidirectionalModel {
            english_to_french,
            french_to_english,
        }
    }
    /// `t[e][f]` of the english to french model
    pub fn t_ef(&self, english: &str, french: &str) -> f64 {
        self.english_to_french.t(english, french)
    }
    /// `t[f][e]` of the french to english model
    pub fn t_fe(&self, french: &str, english: &str) -> f64 {
        self.french_to_english.t(french, english)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<SentencePair> {
        vec![
            SentencePair::from_strs(0, "the cat", "le chat"),
            SentencePair::from_strs(1, "the dog", "le chien"),
        ]
    }

    #[test]
    fn em_init_uniform() {
        let pairs = vec![
            SentencePair::from_strs(0, "the cat", "le chat"),
            SentencePair::from_strs(1, "the", "le"),
        ];
        let m = DirectionalModel::init(&pairs, Direction::EnglishToFrench, true);
        // last sentence wins: 1 / (1 + 1)
        assert_abs_diff_eq!(m.t("the", "le"), 0.5);
        assert_abs_diff_eq!(m.t("cat", "chat"), 1.0 / 3.0);
        assert_eq!(m.t("cat", "chien"), 0.0);
        assert_abs_diff_eq!(m.q(2, 2, 1, 0), 1.0 / 3.0);
        let m = DirectionalModel::init(&pairs, Direction::FrenchToEnglish, false);
        assert_abs_diff_eq!(m.t("chat", "cat"), 1.0 / 3.0);
        assert_eq!(m.q(2, 2, 1, 0), 1.0);
    }
    #[test]
    fn em_one_iteration() {
        let config = EmConfig {
            n_iterations: 1,
            distortion: false,
        };
        let m = estimate(&corpus(), Direction::EnglishToFrench, &config);
        assert_abs_diff_eq!(m.t("the", "le"), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m.t("the", "chat"), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(m.t("cat", "le"), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m.t("cat", "chat"), 0.5, epsilon = 1e-12);
    }
    #[test]
    fn em_shared_pair_grows() {
        let pairs = corpus();
        let mut history = vec![];
        for n_iterations in 1..=5 {
            let config = EmConfig {
                n_iterations,
                distortion: false,
            };
            let m = estimate(&pairs, Direction::EnglishToFrench, &config);
            history.push(m.t("the", "le"));
            if n_iterations == 5 {
                assert!(m.t("the", "le") > m.t("cat", "le"));
                assert!(m.t("cat", "chat") > m.t("cat", "le"));
            }
        }
        for w in history.windows(2).skip(1) {
            assert!(w[1] > w[0], "{:?}", history);
        }
    }
    #[test]
    fn em_conditional_tables_are_normalized() {
        let (m, logs) =
            estimate_with_logs(&corpus(), Direction::FrenchToEnglish, &EmConfig::ibm2());
        assert_eq!(logs.len(), 5);
        for (_, c) in m.translation().iter() {
            assert_abs_diff_eq!(c.total(), 1.0, epsilon = 1e-9);
        }
        for (_, c) in m.distortion().iter() {
            assert_abs_diff_eq!(c.total(), 1.0, epsilon = 1e-9);
        }
        // likelihood never decreases once the tables are normalized
        for w in logs.windows(2).skip(1) {
            assert!(w[1].log_likelihood >= w[0].log_likelihood - 1e-12);
        }
    }
    #[test]
    fn em_empty_side_contributes_nothing() {
        let pairs = vec![
            SentencePair::from_strs(0, "the", "le"),
            SentencePair::from_strs(1, "", "chat"),
        ];
        let m = estimate(&pairs, Direction::EnglishToFrench, &EmConfig::ibm2());
        assert_abs_diff_eq!(m.t("the", "le"), 1.0);
        assert_eq!(m.t("the", "chat"), 0.0);
    }
    #[test]
    fn em_bidirectional() {
        let m = BidirectionalModel::estimate(&corpus(), &EmConfig::ibm1());
        assert!(m.t_ef("the", "le") > 0.5);
        assert!(m.t_fe("le", "the") > 0.5);
        assert_eq!(m.english_to_french.direction(), Direction::EnglishToFrench);
    }
}
