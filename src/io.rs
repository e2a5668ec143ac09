//!
//! Corpus readers and writers
//!
//! * `parallel` sentence-aligned `.e`/`.f` files, `.wa` reference alignments
//!   and alignment predictions
//! * `tagged` one `word tag` per line, blank line between sentences
//! * `embeddings` word vectors in the word2vec text format
//! * `json` serde dumps of trained models
//!
pub mod embeddings;
pub mod json;
pub mod parallel;
pub mod tagged;

pub use embeddings::{read_embeddings, read_training_text, write_embeddings};
pub use json::{read_json, write_json};
pub use parallel::{read_alignments, read_corpus_dir, read_sentence_pairs, write_alignments};
pub use tagged::{read_sentences, read_tagged_sentences, write_tagged};

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

///
/// write string into a file
///
pub fn write_string<P: AsRef<Path>>(path: P, string: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(string.as_bytes())?;
    Ok(())
}
