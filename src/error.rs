//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by training, decoding and corpus I/O.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The english and french files disagree on a sentence id. Fatal.
    #[error("sentence id mismatch in {file}: english id {english_id} vs french id {french_id}")]
    SentenceIdMismatch {
        file: String,
        english_id: String,
        french_id: String,
    },

    /// Malformed line in an input file.
    #[error("parse error at {}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A test sentence has no reference alignment.
    #[error("no reference alignment for sentence {0}")]
    MissingReference(usize),

    #[error("decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("training data is empty")]
    EmptyTrainingData,
}

/// Failures of a single trellis decoder. Recovered by `FallbackDecoder`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// End has no path of nonzero weight from Start.
    #[error("end state is unreachable from start")]
    Unreachable,

    /// Greedy walk stopped at a state without successors.
    #[error("dead end at state {0}")]
    DeadEnd(String),
}

pub type Result<T> = std::result::Result<T, Error>;
