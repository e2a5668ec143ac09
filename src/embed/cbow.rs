//!
//! CBOW training
//!
//! For every position the averaged input vectors of the surrounding words
//! (`hidden`) predict the center word through
//!
//! * hierarchical softmax: one logistic unit per inner node on the Huffman
//!   path of the word, target `1 - code`
//! * negative sampling: one logistic unit for the word (target 1) and for
//!   each of `negative_samples` uniformly drawn words (target 0)
//!
//! The accumulated error is added to every context input vector.
//!
use super::huffman::HuffmanNode;
use super::EmbeddingConfig;
use fnv::FnvHashMap as HashMap;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// `y += a * x`
fn axpy(y: &mut [f64], a: f64, x: &[f64]) {
    for (yi, xi) in y.iter_mut().zip(x.iter()) {
        *yi += a * xi;
    }
}

///
/// Mutable state of one training run: weight matrices, scratch buffers and
/// the random generator.
///
#[derive(Clone, Debug)]
pub struct TrainingContext {
    pub config: EmbeddingConfig,
    nodes: Vec<HuffmanNode>,
    index: HashMap<String, usize>,
    /// `V x d` word vectors
    pub input: Vec<Vec<f64>>,
    /// `(V - 1) x d` inner node vectors
    pub output: Vec<Vec<f64>>,
    /// `V x d` negative-sampling vectors
    pub negative: Vec<Vec<f64>>,
    hidden: Vec<f64>,
    error: Vec<f64>,
    rng: Xoshiro256PlusPlus,
}

impl TrainingContext {
    ///
    /// Input vectors start uniform in `[0, 1/d)`, the others at zero.
    ///
    pub fn new(config: EmbeddingConfig, nodes: Vec<HuffmanNode>) -> Self {
        let d = config.dimension;
        let v = nodes.len();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
        let input = (0..v)
            .map(|_| (0..d).map(|_| rng.gen::<f64>() / d as f64).collect())
            .collect();
        let index = nodes.iter().map(|n| (n.word.clone(), n.index)).collect();
        TrainingContext {
            config,
            index,
            input,
            output: vec![vec![0.0; d]; v.saturating_sub(1)],
            negative: vec![vec![0.0; d]; v],
            hidden: vec![0.0; d],
            error: vec![0.0; d],
            rng,
            nodes,
        }
    }
    pub fn vocab_size(&self) -> usize {
        self.nodes.len()
    }
    pub fn nodes(&self) -> &[HuffmanNode] {
        &self.nodes
    }
    ///
    /// One CBOW pass over a sentence. Words missing from the vocabulary are
    /// skipped.
    ///
    pub fn train_sentence(&mut self, sentence: &[String]) {
        let ids: Vec<usize> = sentence
            .iter()
            .filter_map(|w| self.index.get(w).copied())
            .collect();
        for position in 0..ids.len() {
            self.train_position(&ids, position);
        }
    }
    fn context_positions(&mut self, len: usize, position: usize) -> Vec<usize> {
        let window = self.config.window;
        // random window shrink
        let shrink = if window > 0 { self.rng.gen_range(0..window) } else { 0 };
        let reach = window - shrink;
        let lo = position.saturating_sub(reach);
        let hi = (position + reach).min(len.saturating_sub(1));
        (lo..=hi).filter(|&p| p != position).collect()
    }
    fn train_position(&mut self, ids: &[usize], position: usize) {
        let context = self.context_positions(ids.len(), position);
        if context.is_empty() {
            return;
        }
        let alpha = self.config.alpha;
        let target = ids[position];

        for x in self.hidden.iter_mut() {
            *x = 0.0;
        }
        for x in self.error.iter_mut() {
            *x = 0.0;
        }
        for &p in context.iter() {
            axpy(&mut self.hidden, 1.0, &self.input[ids[p]]);
        }
        let c = context.len() as f64;
        for x in self.hidden.iter_mut() {
            *x /= c;
        }

        if self.config.hierarchical_softmax {
            let node = &self.nodes[target];
            for (&bit, &point) in node.code.iter().zip(node.points.iter()) {
                let f = dot(&self.hidden, &self.output[point]);
                let g = (1.0 - bit as f64 - sigmoid(f)) * alpha;
                axpy(&mut self.error, g, &self.output[point]);
                axpy(&mut self.output[point], g, &self.hidden);
            }
        }

        let v = self.nodes.len();
        for i in 0..=self.config.negative_samples {
            let (point, label) = if i == 0 {
                (target, 1.0)
            } else {
                let sample = self.rng.gen_range(0..v);
                if sample == target {
                    continue;
                }
                (sample, 0.0)
            };
            let f = dot(&self.hidden, &self.negative[point]);
            let g = (label - sigmoid(f)) * alpha;
            axpy(&mut self.error, g, &self.negative[point]);
            axpy(&mut self.negative[point], g, &self.hidden);
        }

        for &p in context.iter() {
            axpy(&mut self.input[ids[p]], 1.0, &self.error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Counter;
    use crate::embed::huffman::huffman_coding;

    fn context(config: EmbeddingConfig) -> TrainingContext {
        let counts: Counter<String> = vec![
            ("a".to_string(), 3.0),
            ("b".to_string(), 2.0),
            ("c".to_string(), 1.0),
        ]
        .into();
        TrainingContext::new(config, huffman_coding(&counts))
    }

    #[test]
    fn cbow_initial_weights() {
        let t = context(EmbeddingConfig::default());
        assert_eq!(t.vocab_size(), 3);
        assert_eq!(t.input.len(), 3);
        assert_eq!(t.output.len(), 2);
        let d = t.config.dimension as f64;
        assert!(t.input.iter().flatten().all(|&x| x >= 0.0 && x < 1.0 / d));
        assert!(t.negative.iter().flatten().all(|&x| x == 0.0));
    }
    #[test]
    fn cbow_update_touches_context_only() {
        let mut t = context(EmbeddingConfig {
            window: 1,
            ..Default::default()
        });
        let before = t.input.clone();
        let sentence: Vec<String> = vec!["a".into(), "b".into()];
        // output vectors start at zero, so the first pass only moves them
        t.train_sentence(&sentence);
        t.train_sentence(&sentence);
        // both words are each other's context
        assert_ne!(t.input[0], before[0]);
        assert_ne!(t.input[1], before[1]);
        assert_eq!(t.input[2], before[2]);
    }
    #[test]
    fn cbow_single_word_sentence_is_a_no_op() {
        let mut t = context(EmbeddingConfig::default());
        let before = t.input.clone();
        t.train_sentence(&["c".to_string()]);
        t.train_sentence(&["zzz".to_string()]);
        assert_eq!(t.input, before);
    }
}
