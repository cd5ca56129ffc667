use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the indexing and scoring core
#[derive(Debug, Error)]
pub enum Error {
    /// A frequency table line that is not `<term> <doc_id> <frequency>`
    #[error("malformed frequency table line {line}: {reason} ({content:?})")]
    Format {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("document folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn format(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Error::Format {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
