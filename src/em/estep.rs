//!
//! E-step: expected counts of one sentence pair
//!
use super::tables::{DistortionTable, TranslationTable};

///
/// Expected counts accumulated over some sentence pairs.
///
/// Computed independently per sentence and then merged, so the E-step can
/// run in parallel.
///
#[derive(Clone, Debug, Default)]
pub struct PartialCounts {
    pub translation: TranslationTable,
    pub distortion: DistortionTable,
    /// `sum_j ln Z_j` over target positions with `Z_j > 0`
    pub log_likelihood: f64,
}

impl PartialCounts {
    pub fn new() -> Self {
        PartialCounts::default()
    }
    ///
    /// Add the counts of `other` into `self`.
    ///
    pub fn merge(&mut self, other: PartialCounts) {
        self.translation.merge(other.translation);
        self.distortion.merge(other.distortion);
        self.log_likelihood += other.log_likelihood;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::em::tables::DistortionKey;

    #[test]
    fn partial_counts_merge() {
        let mut a = PartialCounts::new();
        a.translation.increment("the".to_string(), "le".to_string(), 0.5);
        a.log_likelihood = -1.0;
        let mut b = PartialCounts::new();
        b.translation.increment("the".to_string(), "le".to_string(), 0.25);
        b.distortion.increment(DistortionKey::new(2, 2, 0), 1, 1.0);
        b.log_likelihood = -2.0;
        a.merge(b);
        assert_abs_diff_eq!(a.translation.get("the", "le"), 0.75);
        assert_abs_diff_eq!(a.distortion.get(&DistortionKey::new(2, 2, 0), &1), 1.0);
        assert_abs_diff_eq!(a.log_likelihood, -3.0);
    }
}
