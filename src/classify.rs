//!
//! Maximum-entropy classification
//!
//! Training data are `LabeledInstance`s whose inputs are turned into sparse
//! feature counts by a `FeatureExtractor`. Two trainers produce the same
//! `MaxEntClassifier`:
//!
//! * `MaxEntTrainer` minimizes the penalized negative log conditional
//!   likelihood with a `GradientMinimizer`
//! * `PerceptronTrainer` runs an averaged perceptron
//!
pub mod encoding;
pub mod maxent;
pub mod minimize;
pub mod objective;
pub mod perceptron;

pub use encoding::{EncodedDatum, Encoding, IndexLinearizer, Indexer};
pub use maxent::{MaxEntClassifier, MaxEntTrainer};
pub use minimize::{GradientDescentMinimizer, GradientMinimizer};
pub use objective::{DifferentiableFunction, ObjectiveFunction};
pub use perceptron::PerceptronTrainer;

use crate::counter::Counter;
use std::hash::Hash;

///
/// Input with its gold label.
///
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct LabeledInstance<I, L> {
    pub label: L,
    pub input: I,
}

///
/// Sparse feature counts of an input.
///
pub trait FeatureExtractor<I, F: Eq + Hash> {
    fn extract_features(&self, input: &I) -> Counter<F>;
}

impl<I, F, T> FeatureExtractor<I, F> for T
where
    F: Eq + Hash,
    T: Fn(&I) -> Counter<F>,
{
    fn extract_features(&self, input: &I) -> Counter<F> {
        self(input)
    }
}

///
/// Every element of the input is a feature with count 1 per occurrence.
///
#[allow(clippy::ptr_arg)]
pub fn bag_of_features(input: &Vec<String>) -> Counter<String> {
    let mut c = Counter::new();
    for feature in input {
        c.increment(feature.clone(), 1.0);
    }
    c
}
