//!
//! Layered trellis (lattice) of states
//!
//! ## Construction
//!
//! A `Trellis` is built by frontier expansion from a start state using a
//! `TransitionModel`, which answers "which states can follow this one, and
//! with what weight". After `n_steps` expansions the trellis has
//! `n_steps + 1` layers:
//!
//! ```text
//! layer 0      layer 1      ...   layer n_steps
//! [start] ---> [s1, s2] --> ... --> [end]
//! ```
//!
//! * the end state is never expanded.
//! * states derived twice in the same layer are merged (value equality).
//! * each transition is indexed both forward and backward.
//!
//! States inside a layer keep their discovery order, which makes decoding
//! deterministic.
//!
use crate::score::Weight;
use fnv::FnvHashMap as HashMap;
use fnv::FnvHashSet as HashSet;
use log::debug;
use std::fmt::Debug;
use std::hash::Hash;

///
/// Scoring function that generates the legal successors of a state.
///
/// Returning a state here makes the transition legal; a transition that is
/// never returned is illegal and does not appear in the trellis.
///
pub trait TransitionModel {
    type State: Clone + Eq + Hash + Debug;
    type Weight: Weight;
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, Self::Weight)>;
}

///
/// Trellis with transitions of weight `W` between states `S`.
///
#[derive(Clone, Debug)]
pub struct Trellis<S: Eq + Hash, W> {
    start: S,
    end: S,
    layers: Vec<Vec<S>>,
    forward: HashMap<S, Vec<(S, W)>>,
    backward: HashMap<S, Vec<(S, W)>>,
}

impl<S, W> Trellis<S, W>
where
    S: Clone + Eq + Hash + Debug,
    W: Weight,
{
    ///
    /// Empty trellis that has only the start layer.
    ///
    pub fn new(start: S, end: S) -> Self {
        Trellis {
            layers: vec![vec![start.clone()]],
            start,
            end,
            forward: HashMap::default(),
            backward: HashMap::default(),
        }
    }
    ///
    /// Build the trellis by expanding `start` for exactly `n_steps` layers.
    ///
    pub fn build<M>(model: &M, start: S, end: S, n_steps: usize) -> Self
    where
        M: TransitionModel<State = S, Weight = W>,
    {
        let mut trellis = Trellis::new(start, end);
        for step in 0..n_steps {
            let mut next: Vec<S> = Vec::new();
            let mut seen: HashSet<S> = HashSet::default();
            let frontier = trellis.layers[step].clone();
            for state in frontier.iter() {
                if *state == trellis.end {
                    continue;
                }
                for (succ, weight) in model.successors(state) {
                    trellis.set_transition(state.clone(), succ.clone(), weight);
                    if seen.insert(succ.clone()) {
                        next.push(succ);
                    }
                }
            }
            debug!("trellis layer={} n_states={}", step + 1, next.len());
            trellis.layers.push(next);
        }
        trellis
    }
    ///
    /// Append a layer of states. Used for lattices assembled by hand.
    ///
    pub fn push_layer(&mut self, states: Vec<S>) {
        self.layers.push(states);
    }
    ///
    /// Add the transition `from -> to`, overwriting the weight if the
    /// transition already exists.
    ///
    pub fn set_transition(&mut self, from: S, to: S, weight: W) {
        upsert(self.forward.entry(from.clone()).or_default(), to.clone(), weight);
        upsert(self.backward.entry(to).or_default(), from, weight);
    }
    /// Outgoing transitions of `state`, empty if there are none.
    pub fn forward(&self, state: &S) -> &[(S, W)] {
        self.forward.get(state).map(|v| v.as_slice()).unwrap_or(&[])
    }
    /// Incoming transitions of `state`, empty if there are none.
    pub fn backward(&self, state: &S) -> &[(S, W)] {
        self.backward.get(state).map(|v| v.as_slice()).unwrap_or(&[])
    }
    /// Weight of `from -> to` if the transition is legal.
    pub fn weight(&self, from: &S, to: &S) -> Option<W> {
        self.forward(from)
            .iter()
            .find(|(s, _)| s == to)
            .map(|(_, w)| *w)
    }
    pub fn start(&self) -> &S {
        &self.start
    }
    pub fn end(&self) -> &S {
        &self.end
    }
    /// States of each layer in discovery order.
    pub fn layers(&self) -> &[Vec<S>] {
        &self.layers
    }
    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }
    pub fn n_transitions(&self) -> usize {
        self.forward.values().map(|v| v.len()).sum()
    }
    ///
    /// Weight of a path, or `None` if it uses an illegal transition.
    ///
    pub fn path_weight(&self, path: &[S]) -> Option<W> {
        let mut w = W::one();
        for pair in path.windows(2) {
            w = w.times(self.weight(&pair[0], &pair[1])?);
        }
        Some(w)
    }
}

fn upsert<S: Eq, W>(edges: &mut Vec<(S, W)>, state: S, weight: W) {
    match edges.iter_mut().find(|(s, _)| *s == state) {
        Some(edge) => edge.1 = weight,
        None => edges.push((state, weight)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{lp, LogProb};

    /// `0 -> {1, 2} -> 3`, with the end state `3`.
    struct Diamond;
    impl TransitionModel for Diamond {
        type State = u32;
        type Weight = LogProb;
        fn successors(&self, s: &u32) -> Vec<(u32, LogProb)> {
            match s {
                0 => vec![(1, lp(-1.0)), (2, lp(-2.0))],
                1 | 2 => vec![(3, lp(-0.5))],
                _ => vec![(99, lp(0.0))],
            }
        }
    }

    #[test]
    fn trellis_build_layers() {
        let t = Trellis::build(&Diamond, 0, 3, 2);
        assert_eq!(t.n_layers(), 3);
        assert_eq!(t.layers()[0], vec![0]);
        assert_eq!(t.layers()[1], vec![1, 2]);
        // state 3 is derived twice but merged
        assert_eq!(t.layers()[2], vec![3]);
        assert_eq!(t.n_transitions(), 4);
        assert_eq!(t.backward(&3).len(), 2);
        assert_eq!(t.forward(&3).len(), 0);
        assert!(t.forward(&42).is_empty());
    }
    #[test]
    fn trellis_end_is_not_expanded() {
        // one more step than needed: layer 3 is empty since 3 is end
        let t = Trellis::build(&Diamond, 0, 3, 3);
        assert_eq!(t.n_layers(), 4);
        assert!(t.layers()[3].is_empty());
        assert!(t.forward(&3).is_empty());
    }
    #[test]
    fn trellis_set_transition_overwrites() {
        let mut t = Trellis::build(&Diamond, 0, 3, 2);
        t.set_transition(0, 1, lp(-5.0));
        assert_eq!(t.forward(&0).len(), 2);
        assert_eq!(t.weight(&0, &1), Some(lp(-5.0)));
        assert_eq!(t.backward(&1), &[(0, lp(-5.0))]);
        assert_eq!(t.weight(&1, &2), None);
    }
    #[test]
    fn trellis_path_weight() {
        let t = Trellis::build(&Diamond, 0, 3, 2);
        assert_abs_diff_eq!(t.path_weight(&[0, 1, 3]).unwrap(), lp(-1.5));
        assert_eq!(t.path_weight(&[0, 3]), None);
    }
}
