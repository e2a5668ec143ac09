//!
//! Maximum-entropy classifier and its trainer
//!
use super::encoding::{EncodedDatum, Encoding, IndexLinearizer};
use super::minimize::{GradientDescentMinimizer, GradientMinimizer};
use super::objective::{log_probabilities, ObjectiveFunction};
use super::{FeatureExtractor, LabeledInstance};
use crate::counter::Counter;
use crate::error::{Error, Result};
use log::info;
use std::hash::Hash;

/// Relative tolerance handed to the minimizer.
pub const TOLERANCE: f64 = 1e-4;

///
/// Log-linear classifier `P(l | x) ∝ exp(Σ_f w(f, l) count_x(f))`.
///
#[derive(Clone, Debug)]
pub struct MaxEntClassifier<F: Eq + Hash, L: Eq + Hash, X> {
    weights: Vec<f64>,
    encoding: Encoding<F, L>,
    linearizer: IndexLinearizer,
    extractor: X,
}

impl<F, L, X> MaxEntClassifier<F, L, X>
where
    F: Eq + Hash + Clone,
    L: Eq + Hash + Clone,
{
    pub fn new(weights: Vec<f64>, encoding: Encoding<F, L>, extractor: X) -> Self {
        let linearizer = IndexLinearizer::new(encoding.n_features(), encoding.n_labels());
        MaxEntClassifier {
            weights,
            encoding,
            linearizer,
            extractor,
        }
    }
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
    pub fn encoding(&self) -> &Encoding<F, L> {
        &self.encoding
    }
    fn log_probability_vec<I>(&self, input: &I) -> Vec<f64>
    where
        X: FeatureExtractor<I, F>,
    {
        let datum = EncodedDatum::encode(&self.extractor.extract_features(input), &self.encoding);
        log_probabilities(&datum, &self.weights, &self.linearizer)
    }
    ///
    /// `ln P(l | input)` of every training label, in label index order.
    ///
    pub fn log_probabilities<I>(&self, input: &I) -> Counter<L>
    where
        X: FeatureExtractor<I, F>,
    {
        self.log_probability_vec(input)
            .into_iter()
            .enumerate()
            .filter_map(|(i, lp)| self.encoding.labels.get(i).map(|l| (l.clone(), lp)))
            .collect()
    }
    pub fn probabilities<I>(&self, input: &I) -> Counter<L>
    where
        X: FeatureExtractor<I, F>,
    {
        self.log_probabilities(input)
            .iter()
            .map(|(l, lp)| (l.clone(), lp.exp()))
            .collect()
    }
    ///
    /// Most probable label; the first label wins a tie.
    ///
    pub fn label<I>(&self, input: &I) -> Option<L>
    where
        X: FeatureExtractor<I, F>,
    {
        self.log_probabilities(input).arg_max().cloned()
    }
}

///
/// Trains `MaxEntClassifier` by minimizing the penalized negative log
/// likelihood.
///
#[derive(Clone, Copy, Debug, PartialEq, new)]
pub struct MaxEntTrainer {
    /// prior standard deviation, `0` for no prior
    pub sigma: f64,
    /// maximum minimizer iterations
    pub iterations: usize,
}

impl Default for MaxEntTrainer {
    fn default() -> Self {
        MaxEntTrainer::new(1.0, 20)
    }
}

impl MaxEntTrainer {
    pub fn train<I, F, L, X>(
        &self,
        data: &[LabeledInstance<I, L>],
        extractor: X,
    ) -> Result<MaxEntClassifier<F, L, X>>
    where
        F: Eq + Hash + Clone,
        L: Eq + Hash + Clone,
        X: FeatureExtractor<I, F>,
    {
        if data.is_empty() {
            return Err(Error::EmptyTrainingData);
        }
        let encoding = Encoding::build(data, &extractor);
        let linearizer = IndexLinearizer::new(encoding.n_features(), encoding.n_labels());
        let encoded = encode_data(data, &extractor, &encoding);
        info!(
            "maxent training n_data={} n_features={} n_labels={} sigma={}",
            data.len(),
            encoding.n_features(),
            encoding.n_labels(),
            self.sigma
        );
        let objective = ObjectiveFunction::new(&encoded, linearizer, self.sigma);
        let initial = vec![0.0; linearizer.n_linear_indexes()];
        let weights =
            GradientDescentMinimizer::new(self.iterations).minimize(&objective, &initial, TOLERANCE);
        Ok(MaxEntClassifier::new(weights, encoding, extractor))
    }
}

///
/// Encode every labeled instance of `data`.
///
pub fn encode_data<I, F, L, X>(
    data: &[LabeledInstance<I, L>],
    extractor: &X,
    encoding: &Encoding<F, L>,
) -> Vec<EncodedDatum>
where
    F: Eq + Hash + Clone,
    L: Eq + Hash + Clone,
    X: FeatureExtractor<I, F>,
{
    data.iter()
        .map(|d| {
            EncodedDatum::encode_labeled(&extractor.extract_features(&d.input), &d.label, encoding)
        })
        .collect()
}
