//! Error type shared by the classifier, aggregator, pipeline and output stages.

use std::io;
use std::path::PathBuf;

/// Failures surfaced by the log processing pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying line reader failed mid-stream
    #[error("failed to read input after line {line}")]
    Scan {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A kill line with fewer than four whitespace-separated tokens
    #[error("line {line}: malformed kill event: {text:?}")]
    MalformedKill { line: usize, text: String },

    /// A ClientUserinfoChanged line whose payload cannot be decoded
    #[error("line {line}: malformed userinfo change ({reason}): {text:?}")]
    MalformedUserinfo {
        line: usize,
        text: String,
        reason: &'static str,
    },

    #[error("failed to encode match report")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write match report to {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A pipeline thread panicked before reporting its result
    #[error("{0} thread panicked")]
    StagePanicked(&'static str),
}

impl Error {
    /// Input line the error refers to, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Scan { line, .. }
            | Error::MalformedKill { line, .. }
            | Error::MalformedUserinfo { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Malformed-input errors are the only ones `--on-error skip` may recover from
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::MalformedKill { .. } | Error::MalformedUserinfo { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
