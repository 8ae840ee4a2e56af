use thiserror::Error;

use super::todo::TodoId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// A required argument was missing, mistyped or empty.
    #[error("{0}")]
    Validation(String),
    #[error("todo not found: {0}")]
    NotFound(TodoId),
    /// Reading or writing the backing file failed. Never retried or repaired.
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl TodoError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    pub fn persistence(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Persistence(format!("{}: {}", path.display(), err))
    }
}

pub type TodoResult<T> = Result<T, TodoError>;
