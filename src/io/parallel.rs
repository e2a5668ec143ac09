//!
//! Parallel corpus and alignment files
//!
//! A corpus `base` is the pair of files `base.e` and `base.f` whose lines
//! look like
//!
//! ```text
//! <s snum=17> the cat </s>
//! ```
//!
//! Line `k` of both files must carry the same `snum`. Reference alignments
//! (`.wa`) have one link per line, 1-based:
//!
//! ```text
//! 17 2 1 S
//! 17 1 3 P
//! ```
//!
use crate::align::{Alignment, SentencePair};
use crate::error::{Error, Result};
use fnv::FnvHashMap as HashMap;
use log::info;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const ENGLISH_EXTENSION: &str = "e";
pub const FRENCH_EXTENSION: &str = "f";

///
/// Sentence id and words of one `<s snum=ID> ... </s>` line.
///
fn parse_sentence(line: &str, path: &Path, line_no: usize) -> Result<(usize, Vec<String>)> {
    let mut id = None;
    let mut words = Vec::new();
    for token in line.split_whitespace() {
        match token {
            "<s" | "</s>" => {}
            t if t.starts_with("snum=") => {
                let digits = t["snum=".len()..].trim_end_matches('>');
                let parsed = digits.parse::<usize>().map_err(|e| Error::Parse {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: format!("bad sentence id `{}`: {}", t, e),
                })?;
                id = Some(parsed);
            }
            t => words.push(t.to_string()),
        }
    }
    match id {
        Some(id) => Ok((id, words)),
        None => Err(Error::Parse {
            path: path.to_path_buf(),
            line: line_no,
            reason: "missing snum".to_string(),
        }),
    }
}

fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

///
/// Read the sentence pairs of `base.e` and `base.f`, stopping at the end of
/// the shorter file.
///
pub fn read_sentence_pairs<P: AsRef<Path>>(base: P) -> Result<Vec<SentencePair>> {
    let base = base.as_ref();
    let english_path = with_extension(base, ENGLISH_EXTENSION);
    let french_path = with_extension(base, FRENCH_EXTENSION);
    let english = BufReader::new(File::open(&english_path)?);
    let french = BufReader::new(File::open(&french_path)?);
    let mut pairs = Vec::new();
    for (i, (e, f)) in english.lines().zip(french.lines()).enumerate() {
        let (e, f) = (e?, f?);
        let (english_id, english_words) = parse_sentence(&e, &english_path, i + 1)?;
        let (french_id, french_words) = parse_sentence(&f, &french_path, i + 1)?;
        if english_id != french_id {
            return Err(Error::SentenceIdMismatch {
                file: base.display().to_string(),
                english_id: english_id.to_string(),
                french_id: french_id.to_string(),
            });
        }
        pairs.push(SentencePair::new(english_id, english_words, french_words));
    }
    info!("read {} sentence pairs from {}", pairs.len(), base.display());
    Ok(pairs)
}

/// Every `*.e` file under `dir`, recursively, sorted.
fn english_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            english_files(&path, found)?;
        } else if path.extension().map_or(false, |x| x == ENGLISH_EXTENSION) {
            found.push(path);
        }
    }
    Ok(())
}

///
/// Read every corpus under `dir` until at least `max_pairs` pairs are read.
///
pub fn read_corpus_dir<P: AsRef<Path>>(dir: P, max_pairs: usize) -> Result<Vec<SentencePair>> {
    let mut files = Vec::new();
    english_files(dir.as_ref(), &mut files)?;
    files.sort();
    let mut pairs = Vec::new();
    for file in files {
        if pairs.len() >= max_pairs {
            break;
        }
        pairs.extend(read_sentence_pairs(file.with_extension(""))?);
    }
    Ok(pairs)
}

///
/// Reference alignments keyed by sentence id.
///
pub fn read_alignments<P: AsRef<Path>>(path: P) -> Result<HashMap<usize, Alignment>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut alignments: HashMap<usize, Alignment> = HashMap::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parse_error = |reason: String| Error::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            reason,
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(parse_error(format!("expected 4 fields, found {}", fields.len())));
        }
        let number = |s: &str| -> Result<usize> {
            s.parse::<usize>()
                .map_err(|e| parse_error(format!("bad number `{}`: {}", s, e)))
        };
        let id = number(fields[0])?;
        let english = number(fields[1])?;
        let french = number(fields[2])?;
        if english == 0 || french == 0 {
            return Err(parse_error("positions are 1-based".to_string()));
        }
        alignments
            .entry(id)
            .or_default()
            .add_link(Some(english - 1), french - 1, fields[3] == "S");
    }
    Ok(alignments)
}

///
/// Write one line per sentence with its sure links as `f-e`, french-major.
///
pub fn write_alignments<P: AsRef<Path>>(path: P, alignments: &[Alignment]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for alignment in alignments {
        let mut pairs = alignment.pairs();
        pairs.sort_by_key(|&(e, f)| (f, e));
        for (e, f) in pairs {
            write!(writer, "{}-{} ", f, e)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::write_string;
    use tempfile::tempdir;

    #[test]
    fn read_parallel_corpus() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("mini");
        let english = "<s snum=1> the cat </s>\n<s snum=2> a dog </s>\n";
        let french = "<s snum=1> le chat </s>\n<s snum=2> un chien </s>\n";
        write_string(with_extension(&base, "e"), english).unwrap();
        write_string(with_extension(&base, "f"), french).unwrap();
        let pairs = read_sentence_pairs(&base).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], SentencePair::from_strs(2, "a dog", "un chien"));
        let all = read_corpus_dir(dir.path(), usize::MAX).unwrap();
        assert_eq!(all, pairs);
    }
    #[test]
    fn mismatched_ids_are_fatal() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("bad");
        write_string(with_extension(&base, "e"), "<s snum=1> the cat </s>\n").unwrap();
        write_string(with_extension(&base, "f"), "<s snum=9> le chat </s>\n").unwrap();
        match read_sentence_pairs(&base) {
            Err(Error::SentenceIdMismatch {
                english_id,
                french_id,
                ..
            }) => assert_eq!((english_id.as_str(), french_id.as_str()), ("1", "9")),
            other => panic!("unexpected {:?}", other),
        }
    }
    #[test]
    fn read_reference_alignments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mini.wa");
        write_string(&path, "1 1 1 S\n1 2 2 P\n2 1 2 S\n").unwrap();
        let refs = read_alignments(&path).unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs[&1].contains_sure(0, 0));
        assert!(!refs[&1].contains_sure(1, 1));
        assert!(refs[&1].contains_possible(1, 1));
        assert!(refs[&2].contains_sure(0, 1));

        write_string(&path, "1 1 S\n").unwrap();
        assert!(matches!(read_alignments(&path), Err(Error::Parse { line: 1, .. })));
    }
    #[test]
    fn write_predictions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out");
        let mut a = Alignment::new();
        a.add_link(Some(1), 0, true);
        a.add_link(Some(0), 1, true);
        a.add_link(None, 2, true);
        write_alignments(&path, &[a, Alignment::new()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0-1 1-0 \n\n");
    }
}
