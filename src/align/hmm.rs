//!
//! HMM word aligner
//!
//! Hidden states are english positions, observations are french words. For a
//! pair with `|E| = n` english and `|F| = m` french words the trellis is
//!
//! ```text
//! Start -> (j, 0) -> (j, 1) -> ... -> (j, m - 1) -> End
//! ```
//!
//! with `RawProb` weights
//!
//! ```text
//! w(Start -> (j, 0))          = emission(j, 0)
//! w((j', i - 1) -> (j, i))    = emission(j, i) * jump(n, j' -> j)^exponent
//! w((j, m - 1) -> End)        = 1
//! ```
//!
//! ## Emission
//!
//! * `Bidirectional`: `t_ef[e][f] + t_fe[f][e]` of the IBM-1 tables
//! * `Positional`: `t_ef[e][f] * q_ef[(n, m, i)][j]` of the IBM-2 tables
//!
//! A zero emission is replaced by `unseen_emission`.
//!
//! ## Jump
//!
//! A fixed distance-based table, conditionally normalized per `(n, j')`.
//!
use super::ibm::ibm1_score;
use super::linking::competitive_linking;
use super::sentence::{Alignment, SentencePair};
use super::WordAligner;
use crate::counter::CounterMap;
use crate::decode::{never, FallbackDecoder};
use crate::em::{BidirectionalModel, EmConfig};
use crate::error::{Error, Result};
use crate::score::{rp, RawProb};
use crate::trellis::{TransitionModel, Trellis};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

///
/// How emission scores are computed from the EM tables.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HmmEmission {
    /// sum of both IBM-1 directions
    Bidirectional,
    /// english to french IBM-2 translation times distortion
    Positional,
}

///
/// Shape of the unnormalized jump weight from `j'` to `j` in a sentence of
/// `n` english words.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpShape {
    /// `n - |j - j'|`
    Linear,
    /// `(n - |j - j'|)^2`, and `(n - 2)^2` for staying put
    /// (`(n - 1)^2` when `n = 2`)
    SquaredStayPenalty,
}

impl JumpShape {
    ///
    /// Unnormalized weight of the jump `from -> to`.
    ///
    pub fn weight(&self, n: usize, from: usize, to: usize) -> f64 {
        let n = n as f64;
        let distance = (to as f64 - from as f64).abs();
        match self {
            JumpShape::Linear => n - distance,
            JumpShape::SquaredStayPenalty => {
                if from != to {
                    (n - distance).powi(2)
                } else if n == 2.0 {
                    (n - 1.0).powi(2)
                } else {
                    (n - 2.0).powi(2)
                }
            }
        }
    }
}

///
/// Parameters of `HmmAligner`.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HmmConfig {
    pub emission: HmmEmission,
    pub jump_shape: JumpShape,
    /// jump probabilities are raised to this power
    pub jump_exponent: f64,
    /// emission used when the tables give zero
    pub unseen_emission: f64,
    /// EM iterations of the underlying IBM model
    pub n_iterations: usize,
}

impl HmmConfig {
    ///
    /// Bidirectional IBM-1 emissions with the squared jump table.
    ///
    pub fn hmm() -> Self {
        HmmConfig {
            emission: HmmEmission::Bidirectional,
            jump_shape: JumpShape::SquaredStayPenalty,
            jump_exponent: 1.5,
            unseen_emission: 1e-6,
            n_iterations: 5,
        }
    }
    ///
    /// Positional IBM-2 emissions with the linear jump table.
    ///
    pub fn hmm_ibm2() -> Self {
        HmmConfig {
            emission: HmmEmission::Positional,
            jump_shape: JumpShape::Linear,
            jump_exponent: 0.1,
            unseen_emission: 1e-6,
            n_iterations: 5,
        }
    }
}

impl Default for HmmConfig {
    fn default() -> Self {
        HmmConfig::hmm()
    }
}

///
/// Conditioning context of a jump: english length and the previous english
/// position.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new)]
pub struct JumpKey {
    pub english_len: usize,
    pub from: usize,
}

///
/// `jump[(n, j')][j]`, normalized over `j`.
///
#[derive(Clone, Debug)]
pub struct JumpTable(CounterMap<JumpKey, usize>);

impl JumpTable {
    ///
    /// Jump table of sentences with `english_len` english words.
    ///
    pub fn build(shape: JumpShape, english_len: usize) -> Self {
        let mut table = CounterMap::new();
        for from in 0..english_len {
            let key = JumpKey::new(english_len, from);
            for to in 0..english_len {
                table.set(key, to, shape.weight(english_len, from, to));
            }
        }
        JumpTable(table.conditional_normalize())
    }
    pub fn prob(&self, english_len: usize, from: usize, to: usize) -> f64 {
        self.0.get(&JumpKey::new(english_len, from), &to)
    }
}

///
/// State of the alignment trellis.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlignState {
    Start,
    /// french position `french` is generated by english position `english`
    Link { english: usize, french: usize },
    End,
}

///
/// HMM aligner.
///
#[derive(Clone, Debug)]
pub struct HmmAligner {
    config: HmmConfig,
    model: BidirectionalModel,
}

impl HmmAligner {
    pub fn new(config: HmmConfig) -> Self {
        HmmAligner {
            config,
            model: BidirectionalModel::untrained(),
        }
    }
    pub fn config(&self) -> &HmmConfig {
        &self.config
    }
    ///
    /// Emission score of english position `j` and french position `i`,
    /// floored to `unseen_emission`.
    ///
    pub fn emission(&self, pair: &SentencePair, j: usize, i: usize) -> f64 {
        let (e, f) = (pair.english[j].as_str(), pair.french[i].as_str());
        let ef = &self.model.english_to_french;
        let score = match self.config.emission {
            HmmEmission::Bidirectional => ef.t(e, f) + self.model.t_fe(f, e),
            HmmEmission::Positional => {
                ef.t(e, f) * ef.q(pair.english.len(), pair.french.len(), i, j)
            }
        };
        if score > 0.0 {
            score
        } else {
            self.config.unseen_emission
        }
    }
    ///
    /// Alignment trellis of `pair`. Requires both sides to be non-empty.
    ///
    pub fn build_trellis(&self, pair: &SentencePair) -> Trellis<AlignState, RawProb> {
        let model = SentenceModel {
            aligner: self,
            pair,
            jumps: JumpTable::build(self.config.jump_shape, pair.english.len()),
        };
        Trellis::build(
            &model,
            AlignState::Start,
            AlignState::End,
            pair.french.len() + 1,
        )
    }
}

impl Default for HmmAligner {
    fn default() -> Self {
        HmmAligner::new(HmmConfig::hmm())
    }
}

/// Scoring function of one sentence pair.
struct SentenceModel<'a> {
    aligner: &'a HmmAligner,
    pair: &'a SentencePair,
    jumps: JumpTable,
}

impl<'a> TransitionModel for SentenceModel<'a> {
    type State = AlignState;
    type Weight = RawProb;
    fn successors(&self, state: &AlignState) -> Vec<(AlignState, RawProb)> {
        let n_e = self.pair.english.len();
        let n_f = self.pair.french.len();
        let exponent = self.aligner.config.jump_exponent;
        match *state {
            AlignState::Start => (0..n_e)
                .map(|j| {
                    let w = rp(self.aligner.emission(self.pair, j, 0));
                    (AlignState::Link { english: j, french: 0 }, w)
                })
                .collect(),
            AlignState::Link { english, french } if french + 1 < n_f => (0..n_e)
                .map(|j| {
                    let i = french + 1;
                    let jump = rp(self.jumps.prob(n_e, english, j)).powf(exponent);
                    let w = rp(self.aligner.emission(self.pair, j, i)) * jump;
                    (AlignState::Link { english: j, french: i }, w)
                })
                .collect(),
            AlignState::Link { .. } => vec![(AlignState::End, RawProb::one())],
            AlignState::End => vec![],
        }
    }
}

impl WordAligner for HmmAligner {
    fn train(&mut self, pairs: &[SentencePair]) -> Result<()> {
        if pairs.is_empty() {
            return Err(Error::EmptyTrainingData);
        }
        let config = EmConfig {
            n_iterations: self.config.n_iterations,
            distortion: self.config.emission == HmmEmission::Positional,
        };
        info!("hmm aligner training with {:?}", self.config);
        self.model = BidirectionalModel::estimate(pairs, &config);
        Ok(())
    }
    ///
    /// Viterbi, then greedy, then competitive linking on IBM-1 scores.
    ///
    fn align(&self, pair: &SentencePair) -> Alignment {
        if pair.english.is_empty() || pair.french.is_empty() {
            let mut alignment = Alignment::new();
            for i in 0..pair.french.len() {
                alignment.add_link(None, i, true);
            }
            return alignment;
        }
        let trellis = self.build_trellis(pair);
        match FallbackDecoder::new(never::<AlignState>).decode(&trellis) {
            Ok((path, by)) => {
                debug!("sentence {} decoded by {:?}", pair.id, by);
                let mut alignment = Alignment::new();
                for state in path {
                    if let AlignState::Link { english, french } = state {
                        alignment.add_link(Some(english), french, true);
                    }
                }
                alignment
            }
            Err(e) => {
                warn!(
                    "sentence {}: trellis decoding failed ({}), using competitive linking",
                    pair.id, e
                );
                competitive_linking(pair, |i, j| {
                    ibm1_score(&self.model, &pair.english[i], &pair.french[j])
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(JumpShape::Linear, 3, 0, 0 => 3.0 ; "linear stay")]
    #[test_case(JumpShape::Linear, 3, 0, 2 => 1.0 ; "linear far")]
    #[test_case(JumpShape::SquaredStayPenalty, 3, 0, 1 => 4.0 ; "squared move")]
    #[test_case(JumpShape::SquaredStayPenalty, 3, 1, 1 => 1.0 ; "squared stay")]
    #[test_case(JumpShape::SquaredStayPenalty, 2, 1, 1 => 1.0 ; "squared stay n2")]
    #[test_case(JumpShape::SquaredStayPenalty, 1, 0, 0 => 1.0 ; "squared stay n1")]
    fn jump_shape_weight(shape: JumpShape, n: usize, from: usize, to: usize) -> f64 {
        shape.weight(n, from, to)
    }

    #[test]
    fn jump_table_is_normalized() {
        let table = JumpTable::build(JumpShape::SquaredStayPenalty, 4);
        for from in 0..4 {
            let total: f64 = (0..4).map(|to| table.prob(4, from, to)).sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
        }
        // weights 4, 9, 4, 1 from position 0 (stay is penalized)
        assert_abs_diff_eq!(table.prob(4, 0, 0), 4.0 / 18.0);
        assert_abs_diff_eq!(table.prob(4, 0, 1), 9.0 / 18.0);
        assert_eq!(table.prob(5, 0, 0), 0.0);
    }
    #[test]
    fn hmm_trellis_shape() {
        let aligner = HmmAligner::default();
        let pair = SentencePair::from_strs(0, "a b c", "x y");
        let t = aligner.build_trellis(&pair);
        // start, two french layers, end
        assert_eq!(t.n_layers(), 4);
        assert_eq!(t.layers()[1].len(), 3);
        assert_eq!(t.layers()[3], vec![AlignState::End]);
        // untrained: every emission is the unseen floor
        let w = t
            .weight(&AlignState::Start, &AlignState::Link { english: 1, french: 0 })
            .unwrap();
        assert_abs_diff_eq!(w, rp(1e-6));
    }
    #[test]
    fn hmm_empty_english_links_null() {
        let aligner = HmmAligner::default();
        let pair = SentencePair::from_strs(0, "", "x y");
        let a = aligner.align(&pair);
        assert_eq!(a.len(), 2);
        assert!(a.pairs().is_empty());
    }
    #[test]
    fn hmm_presets() {
        assert_eq!(HmmConfig::hmm().jump_shape, JumpShape::SquaredStayPenalty);
        assert_eq!(HmmConfig::hmm_ibm2().emission, HmmEmission::Positional);
        assert_abs_diff_eq!(HmmConfig::hmm_ibm2().jump_exponent, 0.1);
    }
}
