//!
//! Parameter tables estimated by EM
//!
use crate::counter::CounterMap;
use serde::{Deserialize, Serialize};

///
/// `t[source word][target word]`
///
pub type TranslationTable = CounterMap<String, String>;

///
/// `q[(|S|, |T|, j)][i]`: probability that target position `j` is aligned
/// to source position `i`, given both sentence lengths.
///
pub type DistortionTable = CounterMap<DistortionKey, usize>;

///
/// Conditioning context of a distortion probability.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new)]
pub struct DistortionKey {
    pub source_len: usize,
    pub target_len: usize,
    pub target_pos: usize,
}

impl std::fmt::Display for DistortionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}_{}_{}", self.source_len, self.target_len, self.target_pos)
    }
}
