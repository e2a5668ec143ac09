//!
//! Trellis state of the trigram tagger
//!
use super::{START_TAG, STOP_TAG};
use serde::{Deserialize, Serialize};

///
/// The two previous tags and the position of the next word to tag.
///
/// States are compared by value, so two states reached by different paths
/// with the same history are the same trellis node.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new)]
pub struct TagState {
    pub prev_prev_tag: String,
    pub prev_tag: String,
    pub position: usize,
}

impl TagState {
    /// `(<S>, <S>, 0)`
    pub fn start() -> Self {
        TagState::new(START_TAG.to_string(), START_TAG.to_string(), 0)
    }
    /// `(</S>, </S>, position)`
    pub fn stop(position: usize) -> Self {
        TagState::new(STOP_TAG.to_string(), STOP_TAG.to_string(), position)
    }
    ///
    /// State after tagging the current position with `tag`.
    ///
    pub fn next_state(&self, tag: &str) -> Self {
        TagState::new(self.prev_tag.clone(), tag.to_string(), self.position + 1)
    }
    ///
    /// Tag sequence spelled by a path of states, boundary tags included.
    ///
    /// A path of `k` states gives `k + 1` tags.
    ///
    pub fn to_tag_list(states: &[TagState]) -> Vec<String> {
        match states.first() {
            None => Vec::new(),
            Some(first) => std::iter::once(first.prev_prev_tag.clone())
                .chain(states.iter().map(|s| s.prev_tag.clone()))
                .collect(),
        }
    }
}

impl std::fmt::Display for TagState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.prev_prev_tag, self.prev_tag, self.position)
    }
}
