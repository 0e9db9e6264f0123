//! Error types for name inference.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InferError>;

/// Failures surfaced by the inference engine.
///
/// An AST with no named node is not an error: the comment simply stays unnamed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InferError {
    /// The record breaks the upstream contract (no `context`, no `context.ast`,
    /// or an `ast` that is not a syntax node).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Traversal hit the configured depth or node budget.
    #[error("traversal limit exceeded: {what} > {limit}")]
    LimitExceeded { what: &'static str, limit: usize },
}

impl InferError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        InferError::MalformedInput(msg.into())
    }
}
