//!
//! Averaged perceptron over the max-ent encoding
//!
//! Mistake-driven updates on the linearized weights; the returned weights are
//! the average of the weight vector after every datum of every pass. The
//! result is used as a `MaxEntClassifier`, so its scores are soft-maxed into
//! probabilities.
//!
use super::encoding::{EncodedDatum, Encoding, IndexLinearizer};
use super::maxent::{encode_data, MaxEntClassifier};
use super::{FeatureExtractor, LabeledInstance};
use crate::error::{Error, Result};
use log::{debug, info};
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Eq, new)]
pub struct PerceptronTrainer {
    /// passes over the data
    pub iterations: usize,
}

impl Default for PerceptronTrainer {
    fn default() -> Self {
        PerceptronTrainer::new(10)
    }
}

/// Highest-scoring label; the first label wins a tie.
fn predict(datum: &EncodedDatum, weights: &[f64], linearizer: &IndexLinearizer) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for label in 0..linearizer.n_labels {
        let score = datum.activation(weights, linearizer, label);
        if score > best_score {
            best = label;
            best_score = score;
        }
    }
    best
}

impl PerceptronTrainer {
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
            "perceptron training n_data={} n_features={} n_labels={}",
            data.len(),
            encoding.n_features(),
            encoding.n_labels()
        );

        let mut weights = vec![0.0; linearizer.n_linear_indexes()];
        let mut sum = vec![0.0; linearizer.n_linear_indexes()];
        let mut n_steps = 0usize;
        for iteration in 0..self.iterations {
            let mut n_mistakes = 0;
            for datum in encoded.iter() {
                if let Some(gold) = datum.label {
                    let guess = predict(datum, &weights, &linearizer);
                    if guess != gold {
                        n_mistakes += 1;
                        for &(f, count) in datum.features.iter() {
                            weights[linearizer.linear_index(f, gold)] += count;
                            weights[linearizer.linear_index(f, guess)] -= count;
                        }
                    }
                }
                for (s, w) in sum.iter_mut().zip(weights.iter()) {
                    *s += w;
                }
                n_steps += 1;
            }
            debug!("perceptron iteration={} n_mistakes={}", iteration, n_mistakes);
        }
        if n_steps > 0 {
            for s in sum.iter_mut() {
                *s /= n_steps as f64;
            }
        }
        Ok(MaxEntClassifier::new(sum, encoding, extractor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::bag_of_features;

    #[test]
    fn perceptron_toy_predicts_zero() {
        let d = |label: &str, features: &[&str]| {
            let features: Vec<String> = features.iter().map(|f| f.to_string()).collect();
            LabeledInstance::new(label.to_string(), features)
        };
        let data = vec![
            d("0", &["0", "1", "2"]),
            d("1", &["0", "1", "10"]),
            d("0", &["1", "20"]),
        ];
        let classifier = PerceptronTrainer::default().train(&data, bag_of_features).unwrap();
        let test = vec!["1".to_string(), "2".to_string()];
        assert_eq!(classifier.label(&test), Some("0".to_string()));
    }
    #[test]
    fn perceptron_separates_disjoint_features() {
        let d = |label: &str, f: &str| LabeledInstance::new(label.to_string(), vec![f.to_string()]);
        let data = vec![d("a", "x"), d("b", "y"), d("a", "x")];
        let classifier = PerceptronTrainer::new(3).train(&data, bag_of_features).unwrap();
        assert_eq!(classifier.label(&vec!["y".to_string()]), Some("b".to_string()));
        assert_eq!(classifier.label(&vec!["x".to_string()]), Some("a".to_string()));
    }
}
