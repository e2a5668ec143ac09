//!
//! Competitive linking
//!
//! Greedy one-to-one alignment from a score matrix: repeatedly link the
//! highest scoring `(english, french)` pair among the unused positions and
//! remove both. French positions left over are linked to null.
//!
use super::sentence::{Alignment, SentencePair};

///
/// Align `pair` by competitive linking on `score(english_pos, french_pos)`.
///
/// The scan is french-major, english-minor with a strict `>`, so the first
/// pair in that order wins a tie. Pairs scoring `-inf` (or NaN) are never
/// linked.
///
pub fn competitive_linking<F>(pair: &SentencePair, score: F) -> Alignment
where
    F: Fn(usize, usize) -> f64,
{
    let n_english = pair.english.len();
    let n_french = pair.french.len();
    // scores[j][i]
    let scores: Vec<Vec<f64>> = (0..n_french)
        .map(|j| (0..n_english).map(|i| score(i, j)).collect())
        .collect();

    let mut english_used = vec![false; n_english];
    let mut french_used = vec![false; n_french];
    let mut alignment = Alignment::new();

    loop {
        let mut best: Option<(usize, usize)> = None;
        let mut best_score = f64::NEG_INFINITY;
        for j in (0..n_french).filter(|&j| !french_used[j]) {
            for i in (0..n_english).filter(|&i| !english_used[i]) {
                if scores[j][i] > best_score {
                    best_score = scores[j][i];
                    best = Some((i, j));
                }
            }
        }
        match best {
            Some((i, j)) => {
                english_used[i] = true;
                french_used[j] = true;
                alignment.add_link(Some(i), j, true);
            }
            None => break,
        }
    }

    for j in (0..n_french).filter(|&j| !french_used[j]) {
        alignment.add_link(None, j, true);
    }
    alignment
}
