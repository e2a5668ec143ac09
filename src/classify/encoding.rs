//!
//! Dense encoding of sparse features and labels
//!
//! * `Indexer` maps objects to `0..len` in first-seen order
//! * `Encoding` holds the feature and label indexers
//! * `IndexLinearizer` flattens `(feature, label)` into one weight index
//! * `EncodedDatum` is a datum as `(feature index, count)` pairs
//!
use super::{FeatureExtractor, LabeledInstance};
use crate::counter::Counter;
use fnv::FnvHashMap as HashMap;
use std::hash::Hash;

///
/// Bijection between objects and `0..len`.
///
#[derive(Clone, Debug)]
pub struct Indexer<T: Eq + Hash> {
    items: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> Indexer<T> {
    pub fn new() -> Self {
        Indexer {
            items: Vec::new(),
            index: HashMap::default(),
        }
    }
    /// Index of `item`, adding it if unseen.
    pub fn add(&mut self, item: T) -> usize {
        match self.index.get(&item) {
            Some(&i) => i,
            None => {
                let i = self.items.len();
                self.index.insert(item.clone(), i);
                self.items.push(item);
                i
            }
        }
    }
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.index.get(item).copied()
    }
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Eq + Hash + Clone> Default for Indexer<T> {
    fn default() -> Self {
        Indexer::new()
    }
}

///
/// Feature and label indexers built from training data.
///
#[derive(Clone, Debug)]
pub struct Encoding<F: Eq + Hash, L: Eq + Hash> {
    pub features: Indexer<F>,
    pub labels: Indexer<L>,
}

impl<F, L> Encoding<F, L>
where
    F: Eq + Hash + Clone,
    L: Eq + Hash + Clone,
{
    ///
    /// Index every label and every feature extracted from `data`.
    ///
    pub fn build<I, X>(data: &[LabeledInstance<I, L>], extractor: &X) -> Self
    where
        X: FeatureExtractor<I, F>,
    {
        let mut features = Indexer::new();
        let mut labels = Indexer::new();
        for instance in data {
            labels.add(instance.label.clone());
            for feature in extractor.extract_features(&instance.input).keys() {
                features.add(feature.clone());
            }
        }
        Encoding { features, labels }
    }
    pub fn n_features(&self) -> usize {
        self.features.len()
    }
    pub fn n_labels(&self) -> usize {
        self.labels.len()
    }
}

///
/// `(feature, label) <-> label + feature * n_labels`
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, new)]
pub struct IndexLinearizer {
    pub n_features: usize,
    pub n_labels: usize,
}

impl IndexLinearizer {
    pub fn n_linear_indexes(&self) -> usize {
        self.n_features * self.n_labels
    }
    pub fn linear_index(&self, feature: usize, label: usize) -> usize {
        label + feature * self.n_labels
    }
    pub fn feature_index(&self, linear_index: usize) -> usize {
        linear_index / self.n_labels
    }
    pub fn label_index(&self, linear_index: usize) -> usize {
        linear_index % self.n_labels
    }
}

///
/// Sparse feature counts of one datum. Features unknown to the encoding are
/// dropped.
///
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedDatum {
    pub label: Option<usize>,
    pub features: Vec<(usize, f64)>,
}

impl EncodedDatum {
    pub fn encode<F, L>(features: &Counter<F>, encoding: &Encoding<F, L>) -> Self
    where
        F: Eq + Hash + Clone,
        L: Eq + Hash + Clone,
    {
        let features = features
            .iter()
            .filter_map(|(f, count)| encoding.features.index_of(f).map(|i| (i, count)))
            .collect();
        EncodedDatum {
            label: None,
            features,
        }
    }
    pub fn encode_labeled<F, L>(features: &Counter<F>, label: &L, encoding: &Encoding<F, L>) -> Self
    where
        F: Eq + Hash + Clone,
        L: Eq + Hash + Clone,
    {
        EncodedDatum {
            label: encoding.labels.index_of(label),
            ..EncodedDatum::encode(features, encoding)
        }
    }
    /// `Σ_f w[(f, label)] * count(f)`
    pub fn activation(&self, weights: &[f64], linearizer: &IndexLinearizer, label: usize) -> f64 {
        self.features
            .iter()
            .map(|&(f, count)| weights[linearizer.linear_index(f, label)] * count)
            .sum()
    }
}
