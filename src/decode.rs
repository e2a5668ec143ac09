//!
//! Best-path decoders over a `Trellis`
//!
//! * `ViterbiDecoder` exact max-product dynamic programming
//! * `GreedyDecoder` locally best successor at every step
//! * `FallbackDecoder` Viterbi first, greedy when Viterbi fails or its path
//!   is rejected by a predicate
//!
//! All decoders return the full state path `start..=end` and break ties by
//! taking the first transition in insertion order.
//!
pub mod fallback;
pub mod greedy;
pub mod viterbi;

pub use fallback::{never, DecodedBy, FallbackDecoder};
pub use greedy::GreedyDecoder;
pub use viterbi::ViterbiDecoder;

use crate::error::DecodeError;
use crate::score::Weight;
use crate::trellis::Trellis;
use std::fmt::Debug;
use std::hash::Hash;

///
/// Decoder that extracts one path from a trellis.
///
pub trait TrellisDecoder<S, W>
where
    S: Clone + Eq + Hash + Debug,
    W: Weight,
{
    fn best_path(&self, trellis: &Trellis<S, W>) -> Result<Vec<S>, DecodeError>;
}
