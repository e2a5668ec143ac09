//!
//! Tagged sentences and local trigram contexts
//!
//! Word and tag lookups are bounded: an index before the sentence reads as
//! `<S>` and an index at or past its end reads as `</S>`.
//!
use super::{START_TAG, START_WORD, STOP_TAG, STOP_WORD};
use serde::{Deserialize, Serialize};

///
/// Words with their gold tags. `tags` is either empty-string filled (for
/// untagged input) or has the same length as `words`.
///
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, new)]
pub struct TaggedSentence {
    pub words: Vec<String>,
    pub tags: Vec<String>,
}

impl TaggedSentence {
    ///
    /// Build from `(word, tag)` pairs.
    ///
    /// ```
    /// use statnlp::tagger::TaggedSentence;
    /// let s = TaggedSentence::from_pairs(&[("the", "DT"), ("cat", "NN")]);
    /// assert_eq!(s.len(), 2);
    /// assert_eq!(s.tags[1], "NN");
    /// ```
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        TaggedSentence {
            words: pairs.iter().map(|(w, _)| w.to_string()).collect(),
            tags: pairs.iter().map(|(_, t)| t.to_string()).collect(),
        }
    }
    pub fn len(&self) -> usize {
        self.words.len()
    }
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Bounded lookup into a word or tag sequence.
fn bounded<'a>(items: &'a [String], index: isize, start: &'a str, stop: &'a str) -> &'a str {
    if index < 0 {
        start
    } else {
        items.get(index as usize).map(|s| s.as_str()).unwrap_or(stop)
    }
}

///
/// Everything a scorer may look at when scoring the tag of `position`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalTrigramContext<'a> {
    pub words: &'a [String],
    pub position: usize,
    pub prev_prev_tag: String,
    pub prev_tag: String,
}

impl<'a> LocalTrigramContext<'a> {
    pub fn new(words: &'a [String], position: usize, prev_prev_tag: &str, prev_tag: &str) -> Self {
        LocalTrigramContext {
            words,
            position,
            prev_prev_tag: prev_prev_tag.to_string(),
            prev_tag: prev_tag.to_string(),
        }
    }
    /// Word at `position`, `</S>` past the end.
    pub fn current_word(&self) -> &str {
        self.word_at(self.position as isize)
    }
    /// Bounded word lookup relative to the sentence start.
    pub fn word_at(&self, index: isize) -> &str {
        bounded(self.words, index, START_WORD, STOP_WORD)
    }
}

///
/// Context together with the gold tag of its position.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledLocalTrigramContext<'a> {
    pub context: LocalTrigramContext<'a>,
    pub current_tag: String,
}

impl<'a> LabeledLocalTrigramContext<'a> {
    pub fn current_word(&self) -> &str {
        self.context.current_word()
    }
}

///
/// Labeled contexts of positions `0..=n+1` of a sentence of `n` words.
///
/// The last two contexts carry the `</S>` word and tag, so a scorer trained
/// on them learns how sentences end.
///
pub fn extract_labeled_contexts(sentence: &TaggedSentence) -> Vec<LabeledLocalTrigramContext<'_>> {
    let tag = |i: isize| bounded(&sentence.tags, i, START_TAG, STOP_TAG);
    (0..=sentence.len() + 1)
        .map(|position| {
            let p = position as isize;
            LabeledLocalTrigramContext {
                context: LocalTrigramContext::new(&sentence.words, position, tag(p - 2), tag(p - 1)),
                current_tag: tag(p).to_string(),
            }
        })
        .collect()
}

///
/// Labeled contexts of every sentence, in corpus order.
///
pub fn extract_all_labeled_contexts(sentences: &[TaggedSentence]) -> Vec<LabeledLocalTrigramContext<'_>> {
    sentences.iter().flat_map(extract_labeled_contexts).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_cover_boundaries() {
        let s = TaggedSentence::from_pairs(&[("the", "DT"), ("cat", "NN")]);
        let cs = extract_labeled_contexts(&s);
        assert_eq!(cs.len(), 4);
        let first = &cs[0];
        assert_eq!(first.current_word(), "the");
        assert_eq!(first.context.prev_prev_tag, START_TAG);
        assert_eq!(first.context.prev_tag, START_TAG);
        assert_eq!(first.current_tag, "DT");
        let third = &cs[2];
        assert_eq!(third.current_word(), STOP_WORD);
        assert_eq!(third.context.prev_prev_tag, "DT");
        assert_eq!(third.context.prev_tag, "NN");
        assert_eq!(third.current_tag, STOP_TAG);
        let last = &cs[3];
        assert_eq!(last.context.prev_prev_tag, "NN");
        assert_eq!(last.context.prev_tag, STOP_TAG);
        assert_eq!(last.current_tag, STOP_TAG);
    }
    #[test]
    fn bounded_word_lookup() {
        let s = TaggedSentence::from_pairs(&[("a", "X")]);
        let c = LocalTrigramContext::new(&s.words, 0, START_TAG, START_TAG);
        assert_eq!(c.word_at(-1), START_WORD);
        assert_eq!(c.word_at(0), "a");
        assert_eq!(c.word_at(5), STOP_WORD);
    }
    #[test]
    fn contexts_of_corpus_keep_order() {
        let a = TaggedSentence::from_pairs(&[("a", "X")]);
        let b = TaggedSentence::from_pairs(&[("b", "Y"), ("c", "Z")]);
        let corpus = vec![a, b];
        let cs = extract_all_labeled_contexts(&corpus);
        assert_eq!(cs.len(), 3 + 4);
        assert_eq!(cs[3].current_word(), "b");
    }
}
