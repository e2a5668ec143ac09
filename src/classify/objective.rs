//!
//! Max-ent training objective
//!
//! Negative log conditional likelihood of the labeled data with a Gaussian
//! prior on the weights:
//!
//! ```text
//! f(w) = -Σ_d ln P(y_d | x_d; w) + Σ_k w_k^2 / (2 σ^2)
//!
//! ∂f/∂w(f, l) = Σ_d count_d(f) (P(l | x_d; w) - [l = y_d]) + w(f, l) / σ^2
//! ```
//!
//! `σ = 0` disables the prior.
//!
use super::encoding::{EncodedDatum, IndexLinearizer};
use rayon::prelude::*;

///
/// Function with a gradient, as seen by a minimizer.
///
pub trait DifferentiableFunction: Sync {
    fn dimension(&self) -> usize;
    fn value_and_gradient(&self, x: &[f64]) -> (f64, Vec<f64>);
    fn value(&self, x: &[f64]) -> f64 {
        self.value_and_gradient(x).0
    }
}

///
/// Normalized log-probability of every label of `datum`.
///
pub fn log_probabilities(
    datum: &EncodedDatum,
    weights: &[f64],
    linearizer: &IndexLinearizer,
) -> Vec<f64> {
    let activations: Vec<f64> = (0..linearizer.n_labels)
        .map(|label| datum.activation(weights, linearizer, label))
        .collect();
    let max = activations.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let log_z = max + activations.iter().map(|a| (a - max).exp()).sum::<f64>().ln();
    activations.iter().map(|a| a - log_z).collect()
}

///
/// `f(w)` over encoded training data.
///
#[derive(Clone, Debug)]
pub struct ObjectiveFunction<'a> {
    pub data: &'a [EncodedDatum],
    pub linearizer: IndexLinearizer,
    pub sigma: f64,
}

impl<'a> ObjectiveFunction<'a> {
    pub fn new(data: &'a [EncodedDatum], linearizer: IndexLinearizer, sigma: f64) -> Self {
        ObjectiveFunction {
            data,
            linearizer,
            sigma,
        }
    }
    /// Likelihood term and its gradient for one datum.
    fn datum_term(&self, datum: &EncodedDatum, x: &[f64]) -> (f64, Vec<(usize, f64)>) {
        let log_probs = log_probabilities(datum, x, &self.linearizer);
        let gold = datum.label;
        let value = gold.map_or(0.0, |y| -log_probs[y]);
        let mut grad = Vec::with_capacity(datum.features.len() * log_probs.len());
        for &(f, count) in datum.features.iter() {
            for (label, lp) in log_probs.iter().enumerate() {
                let indicator = if gold == Some(label) { 1.0 } else { 0.0 };
                grad.push((
                    self.linearizer.linear_index(f, label),
                    count * (lp.exp() - indicator),
                ));
            }
        }
        (value, grad)
    }
}

impl<'a> DifferentiableFunction for ObjectiveFunction<'a> {
    fn dimension(&self) -> usize {
        self.linearizer.n_linear_indexes()
    }
    fn value_and_gradient(&self, x: &[f64]) -> (f64, Vec<f64>) {
        let terms: Vec<(f64, Vec<(usize, f64)>)> = self
            .data
            .par_iter()
            .map(|datum| self.datum_term(datum, x))
            .collect();
        let mut value = 0.0;
        let mut gradient = vec![0.0; self.dimension()];
        for (v, grad) in terms {
            value += v;
            for (k, g) in grad {
                gradient[k] += g;
            }
        }
        if self.sigma > 0.0 {
            let s2 = self.sigma * self.sigma;
            for (k, w) in x.iter().enumerate() {
                value += w * w / (2.0 * s2);
                gradient[k] += w / s2;
            }
        }
        (value, gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Vec<EncodedDatum> {
        vec![
            EncodedDatum {
                label: Some(0),
                features: vec![(0, 1.0), (1, 1.0)],
            },
            EncodedDatum {
                label: Some(1),
                features: vec![(1, 2.0)],
            },
        ]
    }

    #[test]
    fn objective_at_zero_weights() {
        let data = data();
        let f = ObjectiveFunction::new(&data, IndexLinearizer::new(2, 2), 1.0);
        let (v, g) = f.value_and_gradient(&vec![0.0; 4]);
        // two data points at probability 1/2
        assert_abs_diff_eq!(v, 2.0 * 2f64.ln(), epsilon = 1e-12);
        // feature 0 only fires with label 0: 1 * (0.5 - 1) and 1 * (0.5 - 0)
        assert_abs_diff_eq!(g[0], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(g[1], 0.5, epsilon = 1e-12);
    }
    #[test]
    fn gradient_matches_finite_differences() {
        let data = data();
        let f = ObjectiveFunction::new(&data, IndexLinearizer::new(2, 2), 0.7);
        let x = vec![0.3, -0.2, 0.1, 0.5];
        let (_, g) = f.value_and_gradient(&x);
        let h = 1e-6;
        for k in 0..x.len() {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[k] += h;
            xm[k] -= h;
            let numeric = (f.value(&xp) - f.value(&xm)) / (2.0 * h);
            assert_relative_eq!(g[k], numeric, epsilon = 1e-6);
        }
    }
    #[test]
    fn log_probabilities_are_normalized() {
        let d = &data()[0];
        let lp = log_probabilities(d, &[1.0, -1.0, 2.0, 0.0], &IndexLinearizer::new(2, 2));
        let total: f64 = lp.iter().map(|x| x.exp()).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    }
}
