//!
//! Word alignment
//!
//! Every aligner implements `WordAligner`: it is trained on sentence pairs
//! and then links each french word to an english word or to null.
//!
//! * `BaselineAligner` positional diagonal
//! * `DiceAligner` Dice coefficient and competitive linking
//! * `Ibm1Aligner`, `Ibm2Aligner` EM tables and competitive linking
//! * `HmmAligner` EM tables decoded over a trellis
//!
pub mod baseline;
pub mod dice;
pub mod eval;
pub mod hmm;
pub mod ibm;
pub mod linking;
pub mod sentence;

pub use baseline::BaselineAligner;
pub use dice::DiceAligner;
pub use eval::AlignmentScore;
pub use hmm::{AlignState, HmmAligner, HmmConfig, HmmEmission, JumpKey, JumpShape, JumpTable};
pub use ibm::{Ibm1Aligner, Ibm2Aligner};
pub use linking::competitive_linking;
pub use sentence::{Alignment, Link, SentencePair};

use crate::error::Result;
use crate::utils::progress_common_style;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

///
/// Trainable word aligner.
///
pub trait WordAligner: Sync {
    fn train(&mut self, pairs: &[SentencePair]) -> Result<()>;
    fn align(&self, pair: &SentencePair) -> Alignment;
}

///
/// Align every sentence pair in parallel, keeping the input order.
///
pub fn align_all<A: WordAligner + ?Sized>(aligner: &A, pairs: &[SentencePair]) -> Vec<Alignment> {
    pairs
        .par_iter()
        .progress_with_style(progress_common_style())
        .map(|pair| aligner.align(pair))
        .collect()
}
