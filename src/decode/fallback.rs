//!
//! Viterbi with a greedy fallback
//!
//! Viterbi is run first. Greedy decoding replaces its result when
//!
//! 1. Viterbi cannot reach the end state, or
//! 2. the predicate flags the Viterbi path as suspicious.
//!
//! The predicate is a heuristic (for the tagger: "the path contains a tag
//! that is known to be produced by degenerate paths"), kept explicit so it
//! can be tested and swapped.
//!
use super::{GreedyDecoder, TrellisDecoder, ViterbiDecoder};
use crate::error::DecodeError;
use crate::score::Weight;
use crate::trellis::Trellis;
use log::{debug, warn};
use std::fmt::Debug;
use std::hash::Hash;

///
/// Which decoder produced the returned path.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodedBy {
    Viterbi,
    Greedy,
}

///
/// Decoder running `ViterbiDecoder` and then `GreedyDecoder` if needed.
///
#[derive(Clone, Debug)]
pub struct FallbackDecoder<P> {
    predicate: P,
}

impl<P> FallbackDecoder<P> {
    ///
    /// `predicate(path) == true` means the Viterbi path must be replaced.
    ///
    pub fn new(predicate: P) -> Self {
        FallbackDecoder { predicate }
    }
    ///
    /// Decode and report which decoder produced the path.
    ///
    pub fn decode<S, W>(&self, trellis: &Trellis<S, W>) -> Result<(Vec<S>, DecodedBy), DecodeError>
    where
        S: Clone + Eq + Hash + Debug,
        W: Weight,
        P: Fn(&[S]) -> bool,
    {
        match ViterbiDecoder.best_path(trellis) {
            Ok(path) if !(self.predicate)(&path) => Ok((path, DecodedBy::Viterbi)),
            Ok(path) => {
                debug!("viterbi path rejected by predicate, trying greedy");
                match GreedyDecoder.best_path(trellis) {
                    Ok(greedy) => Ok((greedy, DecodedBy::Greedy)),
                    Err(e) => {
                        warn!("greedy fallback failed ({}), keeping viterbi path", e);
                        Ok((path, DecodedBy::Viterbi))
                    }
                }
            }
            Err(e) => {
                warn!("viterbi failed ({}), falling back to greedy", e);
                GreedyDecoder
                    .best_path(trellis)
                    .map(|path| (path, DecodedBy::Greedy))
            }
        }
    }
}

impl<S, W, P> TrellisDecoder<S, W> for FallbackDecoder<P>
where
    S: Clone + Eq + Hash + Debug,
    W: Weight,
    P: Fn(&[S]) -> bool,
{
    fn best_path(&self, trellis: &Trellis<S, W>) -> Result<Vec<S>, DecodeError> {
        self.decode(trellis).map(|(path, _)| path)
    }
}

///
/// Predicate accepting every path; the fallback then only fires when
/// Viterbi fails.
///
pub fn never<S>(_path: &[S]) -> bool {
    false
}
