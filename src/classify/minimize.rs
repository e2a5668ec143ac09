//!
//! Gradient-based minimization
//!
//! `GradientMinimizer` is the seam where a quasi-Newton optimizer would plug
//! in. `GradientDescentMinimizer` is steepest descent with a backtracking
//! (Armijo) line search.
//!
use super::objective::DifferentiableFunction;
use log::{debug, info};

pub trait GradientMinimizer {
    ///
    /// Approximate minimizer of `f` starting from `initial`. Stops when the
    /// relative decrease of the value falls below `tolerance`.
    ///
    fn minimize<F: DifferentiableFunction>(&self, f: &F, initial: &[f64], tolerance: f64) -> Vec<f64>;
}

///
/// Steepest descent with backtracking line search.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientDescentMinimizer {
    pub max_iterations: usize,
    /// first step size tried at every iteration
    pub initial_step: f64,
    /// step multiplier when the sufficient-decrease test fails
    pub shrink: f64,
    /// Armijo constant
    pub sufficient_decrease: f64,
}

impl GradientDescentMinimizer {
    pub fn new(max_iterations: usize) -> Self {
        GradientDescentMinimizer {
            max_iterations,
            ..Default::default()
        }
    }
}

impl Default for GradientDescentMinimizer {
    fn default() -> Self {
        GradientDescentMinimizer {
            max_iterations: 100,
            initial_step: 1.0,
            shrink: 0.5,
            sufficient_decrease: 1e-4,
        }
    }
}

/// Smallest step before the line search gives up.
const MIN_STEP: f64 = 1e-20;

impl GradientMinimizer for GradientDescentMinimizer {
    fn minimize<F: DifferentiableFunction>(&self, f: &F, initial: &[f64], tolerance: f64) -> Vec<f64> {
        let mut x = initial.to_vec();
        let (mut value, mut gradient) = f.value_and_gradient(&x);
        for iteration in 0..self.max_iterations {
            let norm2: f64 = gradient.iter().map(|g| g * g).sum();
            if norm2 == 0.0 {
                debug!("minimize iteration={} zero gradient", iteration);
                break;
            }
            let mut step = self.initial_step;
            let accepted = loop {
                let candidate: Vec<f64> = x
                    .iter()
                    .zip(gradient.iter())
                    .map(|(xi, gi)| xi - step * gi)
                    .collect();
                let v = f.value(&candidate);
                if v <= value - self.sufficient_decrease * step * norm2 {
                    break Some((candidate, v));
                }
                step *= self.shrink;
                if step < MIN_STEP {
                    break None;
                }
            };
            let (candidate, new_value) = match accepted {
                Some(c) => c,
                None => {
                    debug!("minimize iteration={} line search failed", iteration);
                    break;
                }
            };
            let scale = value.abs().max(new_value.abs()).max(1e-10);
            let improvement = (value - new_value) / scale;
            debug!(
                "minimize iteration={} value={} step={} improvement={}",
                iteration, new_value, step, improvement
            );
            x = candidate;
            let (v, g) = f.value_and_gradient(&x);
            value = v;
            gradient = g;
            if improvement < tolerance {
                break;
            }
        }
        info!("minimize finished value={}", value);
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `Σ (x_k - k)^2`
    struct Quadratic(usize);

    impl DifferentiableFunction for Quadratic {
        fn dimension(&self) -> usize {
            self.0
        }
        fn value_and_gradient(&self, x: &[f64]) -> (f64, Vec<f64>) {
            let v = x.iter().enumerate().map(|(k, xk)| (xk - k as f64).powi(2)).sum();
            let g = x.iter().enumerate().map(|(k, xk)| 2.0 * (xk - k as f64)).collect();
            (v, g)
        }
    }

    #[test]
    fn gradient_descent_finds_quadratic_minimum() {
        let m = GradientDescentMinimizer::new(200);
        let x = m.minimize(&Quadratic(3), &[5.0, 5.0, 5.0], 1e-12);
        for (k, xk) in x.iter().enumerate() {
            assert_abs_diff_eq!(*xk, k as f64, epsilon = 1e-6);
        }
    }
    #[test]
    fn gradient_descent_stops_at_minimum() {
        let m = GradientDescentMinimizer::default();
        let x = m.minimize(&Quadratic(2), &[0.0, 1.0], 1e-4);
        assert_eq!(x, vec![0.0, 1.0]);
    }
}
