//!
//! Local trigram scorers
//!
//! A scorer maps a `LocalTrigramContext` to the log-probabilities of the tags
//! that may follow it. Tags missing from the returned counter are illegal
//! successors and never enter the trellis.
//!
use super::context::{LabeledLocalTrigramContext, LocalTrigramContext};
use crate::counter::{Counter, CounterMap};
use fnv::FnvHashSet as HashSet;
use log::info;
use serde::{Deserialize, Serialize};

///
/// Scoring function of the tagger.
///
pub trait LocalTrigramScorer: Send + Sync {
    ///
    /// Log-probabilities of the legal tags of `context`.
    ///
    fn log_scores(&self, context: &LocalTrigramContext) -> Counter<String>;
    ///
    /// Estimate the scorer from gold contexts.
    ///
    fn train(&mut self, contexts: &[LabeledLocalTrigramContext]);
}

///
/// Set of tag trigrams seen in training.
///
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrigramFilter {
    seen: HashSet<(String, String, String)>,
}

impl TrigramFilter {
    pub fn new() -> Self {
        TrigramFilter::default()
    }
    pub fn insert(&mut self, prev_prev_tag: &str, prev_tag: &str, tag: &str) {
        self.seen
            .insert((prev_prev_tag.to_string(), prev_tag.to_string(), tag.to_string()));
    }
    pub fn contains(&self, prev_prev_tag: &str, prev_tag: &str, tag: &str) -> bool {
        // tuple of owned strings cannot be borrowed as a tuple of &str
        self.seen
            .contains(&(prev_prev_tag.to_string(), prev_tag.to_string(), tag.to_string()))
    }
    pub fn len(&self) -> usize {
        self.seen.len()
    }
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
    ///
    /// Keep the candidates whose trigram was seen after the history of
    /// `context`. If none was seen, every candidate is kept.
    ///
    pub fn restrict(&self, context: &LocalTrigramContext, scores: Counter<String>) -> Counter<String> {
        let allowed: Counter<String> = scores
            .iter()
            .filter(|(tag, _)| self.contains(&context.prev_prev_tag, &context.prev_tag, tag))
            .map(|(tag, s)| (tag.clone(), s))
            .collect();
        if allowed.is_empty() {
            scores
        } else {
            allowed
        }
    }
}

///
/// Scores each tag by `P(tag | word)`, ignoring the tag history except for
/// the optional trigram restriction.
///
/// Unknown words use the distribution of tags of words at their first
/// occurrence in training.
///
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MostFrequentTagScorer {
    pub restrict_trigrams: bool,
    words_to_tags: CounterMap<String, String>,
    unknown_word_tags: Counter<String>,
    seen_trigrams: TrigramFilter,
}

impl MostFrequentTagScorer {
    pub fn new(restrict_trigrams: bool) -> Self {
        MostFrequentTagScorer {
            restrict_trigrams,
            ..Default::default()
        }
    }
}

impl LocalTrigramScorer for MostFrequentTagScorer {
    fn log_scores(&self, context: &LocalTrigramContext) -> Counter<String> {
        let tags = self
            .words_to_tags
            .counter(context.current_word())
            .unwrap_or(&self.unknown_word_tags);
        let scores: Counter<String> = tags
            .iter()
            .filter(|(_, p)| *p > 0.0)
            .map(|(tag, p)| (tag.clone(), p.ln()))
            .collect();
        if self.restrict_trigrams {
            self.seen_trigrams.restrict(context, scores)
        } else {
            scores
        }
    }
    fn train(&mut self, contexts: &[LabeledLocalTrigramContext]) {
        let mut words_to_tags = CounterMap::new();
        let mut unknown_word_tags = Counter::new();
        let mut seen_trigrams = TrigramFilter::new();
        for c in contexts {
            let word = c.current_word();
            if !words_to_tags.contains_key(word) {
                unknown_word_tags.increment(c.current_tag.clone(), 1.0);
            }
            words_to_tags.increment(word.to_string(), c.current_tag.clone(), 1.0);
            seen_trigrams.insert(&c.context.prev_prev_tag, &c.context.prev_tag, &c.current_tag);
        }
        info!(
            "most frequent tag scorer: n_words={} n_trigrams={}",
            words_to_tags.len(),
            seen_trigrams.len()
        );
        self.words_to_tags = words_to_tags.conditional_normalize();
        self.unknown_word_tags = unknown_word_tags.normalize();
        self.seen_trigrams = seen_trigrams;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::context::{extract_all_labeled_contexts, TaggedSentence};
    use crate::tagger::START_TAG;

    fn corpus() -> Vec<TaggedSentence> {
        vec![
            TaggedSentence::from_pairs(&[("the", "DT"), ("cat", "NN")]),
            TaggedSentence::from_pairs(&[("the", "DT"), ("run", "NN")]),
            TaggedSentence::from_pairs(&[("cats", "NNS"), ("run", "VBP")]),
        ]
    }

    #[test]
    fn most_frequent_known_word() {
        let corpus = corpus();
        let mut scorer = MostFrequentTagScorer::new(false);
        scorer.train(&extract_all_labeled_contexts(&corpus));
        let words = vec!["run".to_string()];
        let c = LocalTrigramContext::new(&words, 0, START_TAG, START_TAG);
        let scores = scorer.log_scores(&c);
        assert_eq!(scores.len(), 2);
        assert_abs_diff_eq!(scores.get("NN"), 0.5f64.ln());
        assert_abs_diff_eq!(scores.get("VBP"), 0.5f64.ln());
    }
    #[test]
    fn most_frequent_unknown_word() {
        let corpus = corpus();
        let mut scorer = MostFrequentTagScorer::new(false);
        scorer.train(&extract_all_labeled_contexts(&corpus));
        let words = vec!["dog".to_string()];
        let c = LocalTrigramContext::new(&words, 0, START_TAG, START_TAG);
        let scores = scorer.log_scores(&c);
        // first occurrences: the/DT cat/NN </S>/</S> run/NN cats/NNS
        let total: f64 = scores.iter().map(|(_, s)| s.exp()).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(scores.get("NN"), (2.0f64 / 5.0).ln());
    }
    #[test]
    fn restricted_trigrams_filter_and_fall_back() {
        let corpus = corpus();
        let mut scorer = MostFrequentTagScorer::new(true);
        scorer.train(&extract_all_labeled_contexts(&corpus));
        let words = vec!["the".to_string(), "run".to_string()];
        // after (<S>, DT) only NN was seen
        let c = LocalTrigramContext::new(&words, 1, START_TAG, "DT");
        let scores = scorer.log_scores(&c);
        assert_eq!(scores.keys().collect::<Vec<_>>(), vec!["NN"]);
        // unseen history: the filter would empty the set, so it is ignored
        let c = LocalTrigramContext::new(&words, 1, "XX", "YY");
        assert_eq!(scorer.log_scores(&c).len(), 2);
    }
}
