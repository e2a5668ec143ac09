//!
//! Trigram part-of-speech tagger
//!
//! A sentence of `n` words is tagged by decoding a trellis of `TagState`s:
//!
//! ```text
//! (<S>, <S>, 0) -> (<S>, t0, 1) -> (t0, t1, 2) -> ... -> (</S>, </S>, n + 2)
//! ```
//!
//! The scorer decides which tags may follow a state and with which
//! log-probability (`LogProb` weights, combined by addition). The decoded
//! path spells `n + 4` tags, of which the two leading `<S>` and the two
//! trailing `</S>` are stripped.
//!
pub mod context;
pub mod eval;
pub mod interpolated;
pub mod scorer;
pub mod state;

pub use context::{
    extract_all_labeled_contexts, extract_labeled_contexts, LabeledLocalTrigramContext,
    LocalTrigramContext, TaggedSentence,
};
pub use eval::TaggerEvaluation;
pub use interpolated::{signature, InterpolatedTrigramScorer, InterpolationWeights};
pub use scorer::{LocalTrigramScorer, MostFrequentTagScorer, TrigramFilter};
pub use state::TagState;

use crate::decode::TrellisDecoder;
use crate::error::{Error, Result};
use crate::score::{lp, LogProb};
use crate::trellis::{TransitionModel, Trellis};
use crate::utils::progress_common_style;
use fnv::FnvHashSet as HashSet;
use indicatif::ParallelProgressIterator;
use log::info;
use rayon::prelude::*;

pub const START_WORD: &str = "<S>";
pub const STOP_WORD: &str = "</S>";
pub const START_TAG: &str = "<S>";
pub const STOP_TAG: &str = "</S>";

///
/// Predicate for `FallbackDecoder`: true if the path passes through any of
/// `tags`.
///
/// ```
/// use statnlp::tagger::{contains_tag, TagState};
/// let pred = contains_tag(&["AFX"]);
/// let path = vec![TagState::start(), TagState::start().next_state("AFX")];
/// assert!(pred(&path[..]));
/// assert!(!pred(&path[..1]));
/// ```
pub fn contains_tag(tags: &[&str]) -> impl Fn(&[TagState]) -> bool + Clone + Send + Sync {
    let tags: HashSet<String> = tags.iter().map(|t| t.to_string()).collect();
    move |path: &[TagState]| path.iter().any(|s| tags.contains(&s.prev_tag))
}

///
/// Words seen in training, used to find unknown words at evaluation.
///
pub fn vocabulary(sentences: &[TaggedSentence]) -> HashSet<String> {
    sentences
        .iter()
        .flat_map(|s| s.words.iter().cloned())
        .collect()
}

///
/// Tagger combining a scorer `Sc` and a trellis decoder `D`.
///
#[derive(Clone, Debug)]
pub struct PosTagger<Sc, D> {
    scorer: Sc,
    decoder: D,
}

/// Scoring function of one sentence.
struct SentenceModel<'a, Sc> {
    scorer: &'a Sc,
    words: &'a [String],
}

impl<'a, Sc: LocalTrigramScorer> TransitionModel for SentenceModel<'a, Sc> {
    type State = TagState;
    type Weight = LogProb;
    fn successors(&self, state: &TagState) -> Vec<(TagState, LogProb)> {
        let context = LocalTrigramContext::new(
            self.words,
            state.position,
            &state.prev_prev_tag,
            &state.prev_tag,
        );
        self.scorer
            .log_scores(&context)
            .iter()
            .map(|(tag, score)| (state.next_state(tag), lp(score)))
            .collect()
    }
}

impl<Sc, D> PosTagger<Sc, D>
where
    Sc: LocalTrigramScorer,
    D: TrellisDecoder<TagState, LogProb>,
{
    pub fn new(scorer: Sc, decoder: D) -> Self {
        PosTagger { scorer, decoder }
    }
    pub fn scorer(&self) -> &Sc {
        &self.scorer
    }
    ///
    /// Train the scorer on the labeled contexts of `sentences`.
    ///
    pub fn train(&mut self, sentences: &[TaggedSentence]) -> Result<()> {
        if sentences.is_empty() {
            return Err(Error::EmptyTrainingData);
        }
        let contexts = extract_all_labeled_contexts(sentences);
        info!(
            "training tagger on n_sentences={} n_contexts={}",
            sentences.len(),
            contexts.len()
        );
        self.scorer.train(&contexts);
        Ok(())
    }
    ///
    /// Trellis over `words`, with `n + 2` expansions from the start state.
    ///
    pub fn build_trellis(&self, words: &[String]) -> Trellis<TagState, LogProb> {
        let model = SentenceModel {
            scorer: &self.scorer,
            words,
        };
        let n_steps = words.len() + 2;
        Trellis::build(&model, TagState::start(), TagState::stop(n_steps), n_steps)
    }
    ///
    /// Best tag sequence of `words`, one tag per word.
    ///
    pub fn tag(&self, words: &[String]) -> Result<Vec<String>> {
        let trellis = self.build_trellis(words);
        let path = self.decoder.best_path(&trellis)?;
        Ok(strip_boundary_tags(TagState::to_tag_list(&path)))
    }
    ///
    /// Log-score of the gold tagging, summed over every position including
    /// the two closing ones. `-inf` if some gold tag is not a legal successor
    /// of its context.
    ///
    pub fn score_tagging(&self, sentence: &TaggedSentence) -> f64 {
        let mut score = 0.0;
        for c in extract_labeled_contexts(sentence) {
            let scores = self.scorer.log_scores(&c.context);
            if !scores.contains_key(&c.current_tag) {
                return f64::NEG_INFINITY;
            }
            score += scores.get(&c.current_tag);
        }
        score
    }
}

impl<Sc, D> PosTagger<Sc, D>
where
    Sc: LocalTrigramScorer,
    D: TrellisDecoder<TagState, LogProb> + Sync,
{
    ///
    /// Tag every sentence in parallel, keeping the input order.
    ///
    pub fn tag_all(&self, sentences: &[Vec<String>]) -> Result<Vec<Vec<String>>> {
        sentences
            .par_iter()
            .progress_with_style(progress_common_style())
            .map(|words| self.tag(words))
            .collect()
    }
}

fn strip_boundary_tags(tags: Vec<String>) -> Vec<String> {
    let n = tags.len();
    if n < 4 {
        return Vec::new();
    }
    tags.into_iter().skip(2).take(n - 4).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{FallbackDecoder, GreedyDecoder, ViterbiDecoder};

    fn corpus() -> Vec<TaggedSentence> {
        vec![
            TaggedSentence::from_pairs(&[("the", "DT"), ("cat", "NN"), ("runs", "VBZ")]),
            TaggedSentence::from_pairs(&[("the", "DT"), ("dog", "NN"), ("runs", "VBZ")]),
            TaggedSentence::from_pairs(&[("a", "DT"), ("dog", "NN"), ("barks", "VBZ")]),
        ]
    }
    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(|w| w.to_string()).collect()
    }

    #[test]
    fn tagger_trellis_shape() {
        let mut tagger = PosTagger::new(MostFrequentTagScorer::new(false), ViterbiDecoder);
        tagger.train(&corpus()).unwrap();
        let t = tagger.build_trellis(&words("the cat"));
        // start, two words, two closing positions
        assert_eq!(t.n_layers(), 5);
        assert_eq!(t.end(), &TagState::stop(4));
        assert_eq!(t.layers()[4], vec![TagState::stop(4)]);
    }
    #[test]
    fn tagger_tags_seen_sentence() {
        let mut tagger = PosTagger::new(InterpolatedTrigramScorer::default(), ViterbiDecoder);
        tagger.train(&corpus()).unwrap();
        assert_eq!(tagger.tag(&words("a cat runs")).unwrap(), vec!["DT", "NN", "VBZ"]);
        assert!(tagger.tag(&[]).unwrap().is_empty());
    }
    #[test]
    fn tagger_with_fallback_decoder() {
        let mut tagger = PosTagger::new(
            MostFrequentTagScorer::new(true),
            FallbackDecoder::new(contains_tag(&["AFX"])),
        );
        tagger.train(&corpus()).unwrap();
        let tagged = tagger
            .tag_all(&[words("the dog barks"), words("a dog")])
            .unwrap();
        assert_eq!(tagged[0], vec!["DT", "NN", "VBZ"]);
        assert_eq!(tagged[1], vec!["DT", "NN"]);
    }
    #[test]
    fn score_of_gold_tagging() {
        let mut tagger = PosTagger::new(MostFrequentTagScorer::new(false), GreedyDecoder);
        tagger.train(&corpus()).unwrap();
        let gold = TaggedSentence::from_pairs(&[("the", "DT"), ("dog", "NN")]);
        // every word has a single tag, and </S> always ends a sentence
        assert_abs_diff_eq!(tagger.score_tagging(&gold), 0.0);
        let wrong = TaggedSentence::from_pairs(&[("the", "NN"), ("dog", "NN")]);
        assert_eq!(tagger.score_tagging(&wrong), f64::NEG_INFINITY);
    }
    #[test]
    fn train_on_nothing_fails() {
        let mut tagger = PosTagger::new(MostFrequentTagScorer::new(false), ViterbiDecoder);
        assert!(matches!(tagger.train(&[]), Err(Error::EmptyTrainingData)));
    }
    #[test]
    fn boundary_tags_are_stripped() {
        let tags = vec!["<S>", "<S>", "DT", "</S>", "</S>"];
        let tags = tags.into_iter().map(String::from).collect();
        assert_eq!(strip_boundary_tags(tags), vec!["DT"]);
        assert!(strip_boundary_tags(vec![]).is_empty());
    }
}
