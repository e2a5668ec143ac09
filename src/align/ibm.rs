//!
//! IBM model 1 and 2 aligners
//!
//! Both train a `BidirectionalModel` by EM and decode by competitive linking.
//! The two directions are combined only here, at decoding time, by summing
//! their raw probabilities:
//!
//! ```text
//! ibm1(e_i, f_j) = t_fe[f][e] + t_ef[e][f]
//! ibm2(e_i, f_j) = t_fe[f][e] q_fe[(|F|, |E|, i)][j] + t_ef[e][f] q_ef[(|E|, |F|, j)][i]
//! ```
//!
use super::linking::competitive_linking;
use super::sentence::{Alignment, SentencePair};
use super::WordAligner;
use crate::em::{BidirectionalModel, EmConfig};
use crate::error::{Error, Result};

///
/// IBM model 1 aligner.
///
#[derive(Clone, Debug)]
pub struct Ibm1Aligner {
    config: EmConfig,
    model: BidirectionalModel,
}

impl Ibm1Aligner {
    pub fn new(n_iterations: usize) -> Self {
        Ibm1Aligner {
            config: EmConfig {
                n_iterations,
                distortion: false,
            },
            model: BidirectionalModel::untrained(),
        }
    }
    pub fn model(&self) -> &BidirectionalModel {
        &self.model
    }
    ///
    /// `t_fe[f][e] + t_ef[e][f]`
    ///
    pub fn score(&self, english: &str, french: &str) -> f64 {
        ibm1_score(&self.model, english, french)
    }
}

impl Default for Ibm1Aligner {
    fn default() -> Self {
        Ibm1Aligner::new(EmConfig::ibm1().n_iterations)
    }
}

///
/// IBM-1 score of the pair under both directions. Shared with the HMM
/// aligner's last-resort decoding.
///
pub fn ibm1_score(model: &BidirectionalModel, english: &str, french: &str) -> f64 {
    model.t_fe(french, english) + model.t_ef(english, french)
}

impl WordAligner for Ibm1Aligner {
    fn train(&mut self, pairs: &[SentencePair]) -> Result<()> {
        if pairs.is_empty() {
            return Err(Error::EmptyTrainingData);
        }
        self.model = BidirectionalModel::estimate(pairs, &self.config);
        Ok(())
    }
    fn align(&self, pair: &SentencePair) -> Alignment {
        competitive_linking(pair, |i, j| self.score(&pair.english[i], &pair.french[j]))
    }
}

///
/// IBM model 2 aligner.
///
#[derive(Clone, Debug)]
pub struct Ibm2Aligner {
    config: EmConfig,
    model: BidirectionalModel,
}

impl Ibm2Aligner {
    pub fn new(n_iterations: usize) -> Self {
        Ibm2Aligner {
            config: EmConfig {
                n_iterations,
                distortion: true,
            },
            model: BidirectionalModel::untrained(),
        }
    }
    pub fn model(&self) -> &BidirectionalModel {
        &self.model
    }
    ///
    /// Score of linking english position `i` and french position `j` of
    /// `pair`.
    ///
    pub fn score(&self, pair: &SentencePair, i: usize, j: usize) -> f64 {
        let (n_e, n_f) = (pair.english.len(), pair.french.len());
        let (e, f) = (pair.english[i].as_str(), pair.french[j].as_str());
        let fe = &self.model.french_to_english;
        let ef = &self.model.english_to_french;
        fe.t(f, e) * fe.q(n_f, n_e, i, j) + ef.t(e, f) * ef.q(n_e, n_f, j, i)
    }
}

impl Default for Ibm2Aligner {
    fn default() -> Self {
        Ibm2Aligner::new(EmConfig::ibm2().n_iterations)
    }
}

impl WordAligner for Ibm2Aligner {
    fn train(&mut self, pairs: &[SentencePair]) -> Result<()> {
        if pairs.is_empty() {
            return Err(Error::EmptyTrainingData);
        }
        self.model = BidirectionalModel::estimate(pairs, &self.config);
        Ok(())
    }
    fn align(&self, pair: &SentencePair) -> Alignment {
        competitive_linking(pair, |i, j| self.score(pair, i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<SentencePair> {
        vec![
            SentencePair::from_strs(0, "the", "le"),
            SentencePair::from_strs(1, "cat", "chat"),
            SentencePair::from_strs(2, "the dog", "le chien"),
            SentencePair::from_strs(3, "a cat", "un chat"),
        ]
    }

    #[test]
    fn ibm1_score_is_sum_of_directions() {
        let mut a = Ibm1Aligner::default();
        a.train(&corpus()).unwrap();
        let m = a.model();
        assert_abs_diff_eq!(
            a.score("the", "le"),
            m.t_fe("le", "the") + m.t_ef("the", "le")
        );
        // "the" only ever co-occurs with "le" and "chien"
        assert_eq!(a.score("the", "chat"), 0.0);
    }
    #[test]
    fn ibm2_score_uses_distortion() {
        let mut a = Ibm2Aligner::default();
        a.train(&corpus()).unwrap();
        let pair = SentencePair::from_strs(9, "the cat", "le chat");
        let fe = &a.model().french_to_english;
        let ef = &a.model().english_to_french;
        let expected = fe.t("le", "the") * fe.q(2, 2, 0, 0) + ef.t("the", "le") * ef.q(2, 2, 0, 0);
        assert_abs_diff_eq!(a.score(&pair, 0, 0), expected);
    }
    #[test]
    fn ibm_untrained_aligns_everything() {
        let pair = SentencePair::from_strs(0, "a b", "x y");
        let a = Ibm1Aligner::default().align(&pair);
        assert_eq!(a.len(), 2);
    }
}
