//!
//! Tagger evaluation
//!
use super::context::TaggedSentence;
use super::scorer::LocalTrigramScorer;
use super::state::TagState;
use super::PosTagger;
use crate::decode::TrellisDecoder;
use crate::error::Result;
use crate::score::LogProb;
use fnv::FnvHashSet as HashSet;
use itertools::izip;
use log::{debug, info};
use rayon::prelude::*;

///
/// Tag accuracy, accuracy on words unseen in training, and the number of
/// sentences whose gold tagging outscores the decoded one.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaggerEvaluation {
    pub n_tags: usize,
    pub n_correct: usize,
    pub n_unknown: usize,
    pub n_unknown_correct: usize,
    /// decoder suboptimalities
    pub n_suboptimal: usize,
}

impl TaggerEvaluation {
    ///
    /// Tag every sentence of `gold` and compare with its tags.
    ///
    pub fn evaluate<Sc, D>(
        tagger: &PosTagger<Sc, D>,
        gold: &[TaggedSentence],
        training_vocabulary: &HashSet<String>,
    ) -> Result<Self>
    where
        Sc: LocalTrigramScorer,
        D: TrellisDecoder<TagState, LogProb> + Sync,
    {
        let per_sentence: Vec<TaggerEvaluation> = gold
            .par_iter()
            .map(|sentence| -> Result<TaggerEvaluation> {
                let guessed = tagger.tag(&sentence.words)?;
                let mut e = TaggerEvaluation::default();
                for (word, gold_tag, guessed_tag) in izip!(&sentence.words, &sentence.tags, &guessed) {
                    let correct = gold_tag == guessed_tag;
                    e.n_tags += 1;
                    e.n_correct += correct as usize;
                    if !training_vocabulary.contains(word) {
                        e.n_unknown += 1;
                        e.n_unknown_correct += correct as usize;
                    }
                }
                let gold_score = tagger.score_tagging(sentence);
                let guessed_score =
                    tagger.score_tagging(&TaggedSentence::new(sentence.words.clone(), guessed));
                if gold_score > guessed_score {
                    debug!(
                        "decoder suboptimality: gold={} guessed={} words={:?}",
                        gold_score, guessed_score, sentence.words
                    );
                    e.n_suboptimal += 1;
                }
                Ok(e)
            })
            .collect::<Result<_>>()?;
        let total = per_sentence
            .into_iter()
            .fold(TaggerEvaluation::default(), |a, b| a.add(&b));
        info!("{}", total);
        Ok(total)
    }
    pub fn add(&self, other: &TaggerEvaluation) -> TaggerEvaluation {
        TaggerEvaluation {
            n_tags: self.n_tags + other.n_tags,
            n_correct: self.n_correct + other.n_correct,
            n_unknown: self.n_unknown + other.n_unknown,
            n_unknown_correct: self.n_unknown_correct + other.n_unknown_correct,
            n_suboptimal: self.n_suboptimal + other.n_suboptimal,
        }
    }
    pub fn accuracy(&self) -> f64 {
        ratio(self.n_correct, self.n_tags)
    }
    pub fn unknown_accuracy(&self) -> f64 {
        ratio(self.n_unknown_correct, self.n_unknown)
    }
}

/// `0.0` when there is nothing to count
fn ratio(a: usize, b: usize) -> f64 {
    if b == 0 {
        0.0
    } else {
        a as f64 / b as f64
    }
}

impl std::fmt::Display for TaggerEvaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Tag Accuracy: {:.4} (Unknown Accuracy: {:.4}) Decoder Suboptimalities Detected: {}",
            self.accuracy(),
            self.unknown_accuracy(),
            self.n_suboptimal
        )
    }
}
