//! Error types for OGDL Core

use thiserror::Error;

use crate::limits::ValidationError;

/// Result type alias using OGDL's Error
pub type Result<T> = std::result::Result<T, Error>;

/// OGDL error types
///
/// Structural misses (unknown field, unmatched selector) are not errors:
/// they resolve to `Value::Nil`. Only malformed input ends up here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty index in path")]
    EmptyIndex,

    #[error("Index does not evaluate to a valid integer: {0}")]
    InvalidIndex(String),

    #[error("Missing operand for '{0}'")]
    MissingOperand(String),

    #[error("Assignment target is not a path: {0}")]
    NotAssignable(String),

    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error(transparent)]
    Limit(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Message the legacy evaluator returned as a successful string result
    /// in place of this error, if any.
    pub fn legacy_message(&self) -> Option<&'static str> {
        match self {
            Self::EmptyIndex => Some("empty []"),
            Self::InvalidIndex(_) => Some(LEGACY_INVALID_INDEX),
            _ => None,
        }
    }
}

pub(crate) const LEGACY_INVALID_INDEX: &str = "[] does not evaluate to a valid integer";
