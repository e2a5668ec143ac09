//!
//! Word embeddings by CBOW
//!
//! ```text
//! sentences -> vocabulary counts -> Huffman coding -> TrainingContext
//!           -> iterations x sentences x positions -> Embeddings
//! ```
//!
//! Training is sequential and fully determined by `EmbeddingConfig::seed`.
//!
pub mod cbow;
pub mod huffman;

pub use cbow::TrainingContext;
pub use huffman::{huffman_coding, HuffmanNode};

use crate::counter::Counter;
use crate::error::{Error, Result};
use fnv::FnvHashMap as HashMap;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub dimension: usize,
    /// maximum distance of a context word
    pub window: usize,
    /// learning rate
    pub alpha: f64,
    pub negative_samples: usize,
    pub iterations: usize,
    pub hierarchical_softmax: bool,
    pub seed: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        EmbeddingConfig {
            dimension: 100,
            window: 5,
            alpha: 0.025,
            negative_samples: 5,
            iterations: 5,
            hierarchical_softmax: true,
            seed: 0,
        }
    }
}

///
/// Word vectors, in vocabulary order (decreasing count).
///
#[derive(Clone, Debug, PartialEq)]
pub struct Embeddings {
    pub dimension: usize,
    pub words: Vec<String>,
    pub vectors: Vec<Vec<f32>>,
    index: HashMap<String, usize>,
}

impl Embeddings {
    pub fn new(dimension: usize, words: Vec<String>, vectors: Vec<Vec<f32>>) -> Self {
        let index = words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();
        Embeddings {
            dimension,
            words,
            vectors,
            index,
        }
    }
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.index.get(word).map(|&i| self.vectors[i].as_slice())
    }
    pub fn len(&self) -> usize {
        self.words.len()
    }
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<f32>)> + '_ {
        self.words.iter().zip(self.vectors.iter())
    }
    /// Cosine similarity of two words, `None` if either is unknown.
    pub fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        Some(cosine_similarity(self.get(a)?, self.get(b)?))
    }
    ///
    /// `k` nearest words of `word` by cosine similarity, most similar first.
    ///
    pub fn most_similar(&self, word: &str, k: usize) -> Vec<(String, f32)> {
        let query = match self.get(word) {
            Some(v) => v,
            None => return Vec::new(),
        };
        let mut scored: Vec<(String, f32)> = self
            .iter()
            .filter(|(w, _)| w.as_str() != word)
            .map(|(w, v)| (w.clone(), cosine_similarity(query, v)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

///
/// `a·b / (|a| |b|)`, `0` if either vector is zero.
///
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

/// Occurrence count of every word, in first-seen order.
pub fn vocabulary_counts(sentences: &[Vec<String>]) -> Counter<String> {
    let mut counts = Counter::new();
    for word in sentences.iter().flatten() {
        counts.increment(word.clone(), 1.0);
    }
    counts
}

///
/// Train CBOW embeddings of every word of `sentences`.
///
pub fn train_embeddings(sentences: &[Vec<String>], config: &EmbeddingConfig) -> Result<Embeddings> {
    let counts = vocabulary_counts(sentences);
    if counts.is_empty() {
        return Err(Error::EmptyTrainingData);
    }
    let nodes = huffman_coding(&counts);
    info!(
        "embedding training vocab_size={} n_sentences={} config={:?}",
        nodes.len(),
        sentences.len(),
        config
    );
    let mut context = TrainingContext::new(*config, nodes);
    for iteration in 0..config.iterations {
        for sentence in sentences {
            context.train_sentence(sentence);
        }
        info!("embedding iteration={} done", iteration);
    }
    let words = context.nodes().iter().map(|n| n.word.clone()).collect();
    let vectors = context
        .input
        .iter()
        .map(|v| v.iter().map(|&x| x as f32).collect())
        .collect();
    Ok(Embeddings::new(config.dimension, words, vectors))
}
