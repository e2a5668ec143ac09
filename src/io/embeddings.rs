//!
//! word2vec text format
//!
//! ```text
//! N D
//! word v1 v2 ... vD
//! ```
//!
use crate::embed::Embeddings;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

///
/// Training text for the embedding trainer: one whitespace-tokenized
/// sentence per line, blank lines skipped.
///
pub fn read_training_text<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let reader = BufReader::new(File::open(path)?);
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let words: Vec<String> = line?.split_whitespace().map(|w| w.to_string()).collect();
        if !words.is_empty() {
            sentences.push(words);
        }
    }
    Ok(sentences)
}

pub fn write_embeddings<P: AsRef<Path>>(path: P, embeddings: &Embeddings) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{} {}", embeddings.len(), embeddings.dimension)?;
    for (word, vector) in embeddings.iter() {
        write!(writer, "{}", word)?;
        for v in vector {
            write!(writer, " {}", v)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

///
/// Read vectors written by `write_embeddings`.
///
pub fn read_embeddings<P: AsRef<Path>>(path: P) -> Result<Embeddings> {
    let path = path.as_ref();
    let parse_error = |line: usize, reason: String| Error::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    };
    let mut lines = BufReader::new(File::open(path)?).lines();
    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| parse_error(1, "empty file".to_string()))?;
    let header: Vec<usize> = header
        .split_whitespace()
        .map(|x| x.parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| parse_error(1, format!("bad header: {}", e)))?;
    let (n, dimension) = match header[..] {
        [n, d] => (n, d),
        _ => return Err(parse_error(1, "header must be `N D`".to_string())),
    };

    let mut words = Vec::with_capacity(n);
    let mut vectors = Vec::with_capacity(n);
    for (i, line) in lines.enumerate() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let word = match fields.next() {
            Some(word) => word.to_string(),
            None => continue,
        };
        let vector: Vec<f32> = fields
            .map(|x| x.parse::<f32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| parse_error(i + 2, format!("bad value: {}", e)))?;
        if vector.len() != dimension {
            return Err(parse_error(
                i + 2,
                format!("expected {} values, found {}", dimension, vector.len()),
            ));
        }
        words.push(word);
        vectors.push(vector);
    }
    if words.len() != n {
        return Err(parse_error(1, format!("expected {} words, found {}", n, words.len())));
    }
    Ok(Embeddings::new(dimension, words, vectors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeddings_text_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        let e = Embeddings::new(
            2,
            vec!["cat".to_string(), "dog".to_string()],
            vec![vec![0.5, -1.0], vec![0.25, 2.0]],
        );
        write_embeddings(&path, &e).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "2 2\ncat 0.5 -1\ndog 0.25 2\n"
        );
        assert_eq!(read_embeddings(&path).unwrap(), e);
    }
    #[test]
    fn training_text_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.txt");
        crate::io::write_string(&path, "the cat\n\n  a  dog barks \n").unwrap();
        let s = read_training_text(&path).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[1], vec!["a", "dog", "barks"]);
    }
    #[test]
    fn wrong_dimension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        crate::io::write_string(&path, "1 3\ncat 0.1 0.2\n").unwrap();
        assert!(matches!(read_embeddings(&path), Err(Error::Parse { line: 2, .. })));
    }
}
