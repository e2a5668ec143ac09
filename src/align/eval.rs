//!
//! Alignment quality against reference alignments
//!
//! ```text
//! precision = |A ∩ P| / |A|
//! recall    = |A ∩ S| / |S|
//! AER       = 1 - (|A ∩ S| + |A ∩ P|) / (|S| + |A|)
//! ```
//!
//! for proposed links `A`, sure reference links `S` and possible reference
//! links `P`. Links to null are not counted.
//!
use super::sentence::{Alignment, SentencePair};
use crate::error::{Error, Result};
use fnv::FnvHashMap as HashMap;

///
/// Link counts accumulated over a test set.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignmentScore {
    pub proposed_sure: usize,
    pub proposed_possible: usize,
    pub proposed: usize,
    pub sure: usize,
}

impl AlignmentScore {
    ///
    /// Compare proposed alignments (in the order of `pairs`) with the
    /// references keyed by sentence id.
    ///
    pub fn evaluate(
        pairs: &[SentencePair],
        proposed: &[Alignment],
        references: &HashMap<usize, Alignment>,
    ) -> Result<AlignmentScore> {
        let mut score = AlignmentScore::default();
        for (pair, proposed) in pairs.iter().zip(proposed.iter()) {
            let reference = references
                .get(&pair.id)
                .ok_or(Error::MissingReference(pair.id))?;
            score.add(pair, reference, proposed);
        }
        Ok(score)
    }
    ///
    /// Add the counts of one sentence pair.
    ///
    pub fn add(&mut self, pair: &SentencePair, reference: &Alignment, proposed: &Alignment) {
        for j in 0..pair.french.len() {
            for i in 0..pair.english.len() {
                let is_proposed = proposed.contains_sure(i, j);
                let sure = reference.contains_sure(i, j);
                let possible = reference.contains_possible(i, j);
                if is_proposed && sure {
                    self.proposed_sure += 1;
                }
                if is_proposed && possible {
                    self.proposed_possible += 1;
                }
                if is_proposed {
                    self.proposed += 1;
                }
                if sure {
                    self.sure += 1;
                }
            }
        }
    }
    pub fn precision(&self) -> f64 {
        self.proposed_possible as f64 / self.proposed as f64
    }
    pub fn recall(&self) -> f64 {
        self.proposed_sure as f64 / self.sure as f64
    }
    /// alignment error rate
    pub fn aer(&self) -> f64 {
        1.0 - (self.proposed_sure + self.proposed_possible) as f64 / (self.sure + self.proposed) as f64
    }
}

impl std::fmt::Display for AlignmentScore {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "precision={:.4} recall={:.4} aer={:.4}",
            self.precision(),
            self.recall(),
            self.aer()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_counts() {
        let pair = SentencePair::from_strs(7, "a b", "x y");
        let mut reference = Alignment::new();
        reference.add_link(Some(0), 0, true);
        reference.add_link(Some(1), 1, false);
        let mut proposed = Alignment::new();
        proposed.add_link(Some(0), 0, true);
        proposed.add_link(Some(1), 1, true);
        let mut references = HashMap::default();
        references.insert(7, reference);
        let s = AlignmentScore::evaluate(&[pair], &[proposed], &references).unwrap();
        assert_eq!(s.proposed, 2);
        assert_eq!(s.sure, 1);
        assert_abs_diff_eq!(s.precision(), 1.0);
        assert_abs_diff_eq!(s.recall(), 1.0);
        // 1 - (1 + 2) / (1 + 2)
        assert_abs_diff_eq!(s.aer(), 0.0);
    }
    #[test]
    fn score_missing_reference() {
        let pair = SentencePair::from_strs(1, "a", "x");
        let r = AlignmentScore::evaluate(&[pair], &[Alignment::new()], &HashMap::default());
        assert!(matches!(r, Err(Error::MissingReference(1))));
    }
}
