//!
//! Interpolated trigram scorer
//!
//! For a known word `w` seen with tag `t`:
//!
//! ```text
//! score(t) = ln(λ3 P(t | t'', t') + λ2 P(t | t') + λ1 P(t)) + ln P(w | t)
//! ```
//!
//! Transition tables are add-one smoothed over every tag seen in training.
//! For an unknown word the score is `ln P(t | signature(w))`, where the
//! signature distribution is estimated on rare training words.
//!
use super::context::{LabeledLocalTrigramContext, LocalTrigramContext};
use super::scorer::{LocalTrigramScorer, TrigramFilter};
use super::START_TAG;
use crate::counter::{Counter, CounterMap};
use log::info;
use serde::{Deserialize, Serialize};

/// Words seen at most this many times train the signature distribution.
pub const RARE_WORD_COUNT: f64 = 5.0;

/// Words shorter than this are signed by their first letter.
const SHORT_WORD_LEN: usize = 12;

///
/// Interpolation weights `λ3, λ2, λ1`.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterpolationWeights {
    pub trigram: f64,
    pub bigram: f64,
    pub unigram: f64,
}

impl Default for InterpolationWeights {
    fn default() -> Self {
        InterpolationWeights {
            trigram: 0.6,
            bigram: 0.3,
            unigram: 0.1,
        }
    }
}

///
/// Coarse class of an unknown word, checked in this order:
///
/// 1. `startSentence` if it follows `<S>`
/// 2. `initCapital` if it starts with an uppercase letter
/// 3. `digital` if it contains a digit
/// 4. `firstLetter-c` if shorter than 12 characters
/// 5. `lastLetter-c` otherwise
///
/// ```
/// use statnlp::tagger::signature;
/// assert_eq!(signature("Paris", "DT"), "initCapital");
/// assert_eq!(signature("paris", "<S>"), "startSentence");
/// assert_eq!(signature("1990s", "IN"), "digital");
/// assert_eq!(signature("walked", "PRP"), "firstLetter-w");
/// assert_eq!(signature("internationalization", "DT"), "lastLetter-n");
/// ```
pub fn signature(word: &str, prev_tag: &str) -> String {
    let first = word.chars().next();
    if prev_tag == START_TAG {
        "startSentence".to_string()
    } else if first.map_or(false, |c| c.is_uppercase()) {
        "initCapital".to_string()
    } else if word.chars().any(|c| c.is_ascii_digit()) {
        "digital".to_string()
    } else if word.chars().count() < SHORT_WORD_LEN {
        format!("firstLetter-{}", first.unwrap_or(' '))
    } else {
        format!("lastLetter-{}", word.chars().last().unwrap_or(' '))
    }
}

/// `(t'', t')` history key of the trigram table
type History = (String, String);

///
/// Trigram HMM scorer with linear interpolation and unknown-word signatures.
///
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InterpolatedTrigramScorer {
    pub weights: InterpolationWeights,
    pub restrict_trigrams: bool,
    /// every training tag, in first-seen order
    tags: Counter<String>,
    trigram: CounterMap<History, String>,
    bigram: CounterMap<String, String>,
    /// `P(w | t)`
    emission: CounterMap<String, String>,
    /// `P(t | w)`, only used to know which words are seen
    words_to_tags: CounterMap<String, String>,
    /// `P(t | signature)`
    signatures: CounterMap<String, String>,
    /// `P(t)` over first occurrences, for unseen signatures
    unknown_word_tags: Counter<String>,
    seen_trigrams: TrigramFilter,
}

impl InterpolatedTrigramScorer {
    pub fn new(weights: InterpolationWeights, restrict_trigrams: bool) -> Self {
        InterpolatedTrigramScorer {
            weights,
            restrict_trigrams,
            ..Default::default()
        }
    }
    /// number of distinct tags seen in training
    pub fn n_tags(&self) -> usize {
        self.tags.len()
    }
    ///
    /// Smoothed `P(tag | t'', t')`; an unseen history is uniform.
    ///
    pub fn trigram_prob(&self, prev_prev_tag: &str, prev_tag: &str, tag: &str) -> f64 {
        let history = (prev_prev_tag.to_string(), prev_tag.to_string());
        match self.trigram.counter(&history) {
            Some(c) => c.get(tag),
            None => self.uniform(),
        }
    }
    ///
    /// Smoothed `P(tag | t')`; an unseen history is uniform.
    ///
    pub fn bigram_prob(&self, prev_tag: &str, tag: &str) -> f64 {
        match self.bigram.counter(prev_tag) {
            Some(c) => c.get(tag),
            None => self.uniform(),
        }
    }
    pub fn unigram_prob(&self, tag: &str) -> f64 {
        self.tags.get(tag)
    }
    /// interpolated transition probability
    pub fn transition_prob(&self, prev_prev_tag: &str, prev_tag: &str, tag: &str) -> f64 {
        let w = &self.weights;
        w.trigram * self.trigram_prob(prev_prev_tag, prev_tag, tag)
            + w.bigram * self.bigram_prob(prev_tag, tag)
            + w.unigram * self.unigram_prob(tag)
    }
    fn uniform(&self) -> f64 {
        if self.tags.is_empty() {
            0.0
        } else {
            1.0 / self.tags.len() as f64
        }
    }
    fn unknown_word_scores(&self, word: &str, prev_tag: &str) -> Counter<String> {
        let dist = self
            .signatures
            .counter(&signature(word, prev_tag))
            .unwrap_or(&self.unknown_word_tags);
        dist.iter()
            .filter(|(_, p)| *p > 0.0)
            .map(|(tag, p)| (tag.clone(), p.ln()))
            .collect()
    }
}

/// Add one to every `(history, tag)` of `table` over all `tags`.
fn add_one<K>(table: &mut CounterMap<K, String>, tags: &Counter<String>)
where
    K: Clone + Eq + std::hash::Hash,
{
    let histories: Vec<K> = table.keys().cloned().collect();
    for h in histories {
        for tag in tags.keys() {
            table.increment(h.clone(), tag.clone(), 1.0);
        }
    }
}

impl LocalTrigramScorer for InterpolatedTrigramScorer {
    fn log_scores(&self, context: &LocalTrigramContext) -> Counter<String> {
        let word = context.current_word();
        let (pp, p) = (&context.prev_prev_tag, &context.prev_tag);
        let scores: Counter<String> = match self.words_to_tags.counter(word) {
            Some(seen_tags) => seen_tags
                .keys()
                .filter_map(|tag| {
                    let emission = self.emission.get(tag.as_str(), word);
                    let transition = self.transition_prob(pp, p, tag);
                    if emission > 0.0 && transition > 0.0 {
                        Some((tag.clone(), transition.ln() + emission.ln()))
                    } else {
                        None
                    }
                })
                .collect(),
            None => self.unknown_word_scores(word, p),
        };
        if self.restrict_trigrams {
            self.seen_trigrams.restrict(context, scores)
        } else {
            scores
        }
    }
    fn train(&mut self, contexts: &[LabeledLocalTrigramContext]) {
        let mut tags = Counter::new();
        let mut trigram = CounterMap::new();
        let mut bigram = CounterMap::new();
        let mut emission = CounterMap::new();
        let mut words_to_tags = CounterMap::new();
        let mut word_counts: Counter<String> = Counter::new();
        let mut unknown_word_tags = Counter::new();
        let mut seen_trigrams = TrigramFilter::new();

        for c in contexts {
            let word = c.current_word();
            let tag = &c.current_tag;
            let (pp, p) = (&c.context.prev_prev_tag, &c.context.prev_tag);
            if !words_to_tags.contains_key(word) {
                unknown_word_tags.increment(tag.clone(), 1.0);
            }
            tags.increment(tag.clone(), 1.0);
            trigram.increment((pp.clone(), p.clone()), tag.clone(), 1.0);
            bigram.increment(p.clone(), tag.clone(), 1.0);
            emission.increment(tag.clone(), word.to_string(), 1.0);
            words_to_tags.increment(word.to_string(), tag.clone(), 1.0);
            word_counts.increment(word.to_string(), 1.0);
            seen_trigrams.insert(pp, p, tag);
        }

        let mut signatures = CounterMap::new();
        for c in contexts {
            let word = c.current_word();
            if word_counts.get(word) <= RARE_WORD_COUNT {
                signatures.increment(signature(word, &c.context.prev_tag), c.current_tag.clone(), 1.0);
            }
        }

        add_one(&mut trigram, &tags);
        add_one(&mut bigram, &tags);
        add_one(&mut signatures, &tags);

        info!(
            "interpolated trigram scorer: n_tags={} n_words={} n_histories={} n_signatures={}",
            tags.len(),
            word_counts.len(),
            trigram.len(),
            signatures.len()
        );

        self.tags = tags.normalize();
        self.trigram = trigram.conditional_normalize();
        self.bigram = bigram.conditional_normalize();
        self.emission = emission.conditional_normalize();
        self.words_to_tags = words_to_tags.conditional_normalize();
        self.signatures = signatures.conditional_normalize();
        self.unknown_word_tags = unknown_word_tags.normalize();
        self.seen_trigrams = seen_trigrams;
    }
}
