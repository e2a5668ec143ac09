//!
//! Viterbi decoding
//!
//! Bottom-up dynamic programming in layer order with an explicit memo table:
//!
//! ```text
//! best(start) = 1
//! best(s)     = max_{u -> s} best(u) * w(u -> s)
//! ```
//!
//! where the max runs over predecessors `u` that are themselves reachable
//! from start. The first predecessor reaching the maximum wins.
//!
use super::TrellisDecoder;
use crate::error::DecodeError;
use crate::score::Weight;
use crate::trellis::Trellis;
use fnv::FnvHashMap as HashMap;
use std::fmt::Debug;
use std::hash::Hash;

///
/// Exact max-product decoder.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct ViterbiDecoder;

/// Memo entry: best score of the state and the predecessor giving it.
#[derive(Clone, Debug)]
struct Cell<S, W> {
    score: W,
    backpointer: Option<S>,
}

impl ViterbiDecoder {
    ///
    /// Best path together with its weight.
    ///
    pub fn decode<S, W>(&self, trellis: &Trellis<S, W>) -> Result<(Vec<S>, W), DecodeError>
    where
        S: Clone + Eq + Hash + Debug,
        W: Weight,
    {
        let mut memo: HashMap<S, Cell<S, W>> = HashMap::default();
        memo.insert(
            trellis.start().clone(),
            Cell {
                score: W::one(),
                backpointer: None,
            },
        );

        for layer in trellis.layers().iter().skip(1) {
            for state in layer {
                let mut best: Option<(W, &S)> = None;
                for (pred, w) in trellis.backward(state) {
                    if let Some(cell) = memo.get(pred) {
                        let score = cell.score.times(*w);
                        match best {
                            Some((b, _)) if !(score > b) => {}
                            _ => best = Some((score, pred)),
                        }
                    }
                }
                // no reachable predecessor: state stays out of the memo
                if let Some((score, pred)) = best {
                    memo.insert(
                        state.clone(),
                        Cell {
                            score,
                            backpointer: Some(pred.clone()),
                        },
                    );
                }
            }
        }

        let score = match memo.get(trellis.end()) {
            Some(cell) if !cell.score.is_zero() => cell.score,
            _ => return Err(DecodeError::Unreachable),
        };

        let mut path = vec![trellis.end().clone()];
        let mut cur = trellis.end();
        while let Some(prev) = memo.get(cur).and_then(|cell| cell.backpointer.as_ref()) {
            path.push(prev.clone());
            cur = prev;
        }
        path.reverse();
        Ok((path, score))
    }
}

impl<S, W> TrellisDecoder<S, W> for ViterbiDecoder
where
    S: Clone + Eq + Hash + Debug,
    W: Weight,
{
    fn best_path(&self, trellis: &Trellis<S, W>) -> Result<Vec<S>, DecodeError> {
        self.decode(trellis).map(|(path, _)| path)
    }
}
