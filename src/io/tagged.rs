//!
//! Tagged corpora: `word tag` per line, a blank line ends a sentence.
//!
use crate::error::{Error, Result};
use crate::tagger::TaggedSentence;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

///
/// Read tagged sentences. With `has_tags == false` only the first column is
/// read and every tag is the empty string.
///
pub fn read_tagged_sentences<P: AsRef<Path>>(
    path: P,
    has_tags: bool,
) -> Result<Vec<TaggedSentence>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut sentences = Vec::new();
    let mut current = TaggedSentence::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split_whitespace();
        match fields.next() {
            None => {
                if !current.is_empty() {
                    sentences.push(std::mem::take(&mut current));
                }
            }
            Some(word) => {
                let tag = if has_tags {
                    fields.next().ok_or_else(|| Error::Parse {
                        path: path.to_path_buf(),
                        line: i + 1,
                        reason: format!("word `{}` has no tag", word),
                    })?
                } else {
                    ""
                };
                current.words.push(word.to_string());
                current.tags.push(tag.to_string());
            }
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    info!("read {} sentences from {}", sentences.len(), path.display());
    Ok(sentences)
}

///
/// Words only, for tagging unlabeled text.
///
pub fn read_sentences<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    Ok(read_tagged_sentences(path, false)?
        .into_iter()
        .map(|s| s.words)
        .collect())
}

///
/// Write `word\ttag` lines with a blank line after each sentence.
///
pub fn write_tagged<P: AsRef<Path>>(
    path: P,
    sentences: &[Vec<String>],
    tags: &[Vec<String>],
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (words, tags) in sentences.iter().zip(tags) {
        for (word, tag) in words.iter().zip(tags) {
            writeln!(writer, "{}\t{}", word, tag)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
