//!
//! Greedy decoding: from start, always follow the best outgoing transition.
//!
use super::TrellisDecoder;
use crate::error::DecodeError;
use crate::score::Weight;
use crate::trellis::Trellis;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyDecoder;

impl<S, W> TrellisDecoder<S, W> for GreedyDecoder
where
    S: Clone + Eq + Hash + Debug,
    W: Weight,
{
    fn best_path(&self, trellis: &Trellis<S, W>) -> Result<Vec<S>, DecodeError> {
        let mut path = vec![trellis.start().clone()];
        let mut cur = trellis.start();
        while cur != trellis.end() {
            // a layered trellis cannot be longer than its layers
            if path.len() > trellis.n_layers() {
                return Err(DecodeError::DeadEnd(format!("{:?}", cur)));
            }
            let mut best: Option<(&S, W)> = None;
            for (next, w) in trellis.forward(cur) {
                match best {
                    Some((_, b)) if !(*w > b) => {}
                    _ => best = Some((next, *w)),
                }
            }
            match best {
                Some((next, _)) => {
                    path.push(next.clone());
                    cur = next;
                }
                None => return Err(DecodeError::DeadEnd(format!("{:?}", cur))),
            }
        }
        Ok(path)
    }
}
