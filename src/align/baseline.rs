//!
//! Positional baseline: french word `j` is linked to english word `j`.
//!
use super::sentence::{Alignment, SentencePair};
use super::WordAligner;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default)]
pub struct BaselineAligner;

impl WordAligner for BaselineAligner {
    fn train(&mut self, _pairs: &[SentencePair]) -> Result<()> {
        Ok(())
    }
    ///
    /// french words past the end of the english sentence go to null.
    ///
    fn align(&self, pair: &SentencePair) -> Alignment {
        let mut alignment = Alignment::new();
        for j in 0..pair.french.len() {
            let english = if j < pair.english.len() { Some(j) } else { None };
            alignment.add_link(english, j, true);
        }
        alignment
    }
}
