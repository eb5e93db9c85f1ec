//! Node-level error type.

use thiserror::Error;

/// Errors raised while interpreting node vocabulary from user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The string does not name one of the six node kinds.
    #[error("unknown node kind: '{0}'")]
    UnknownKind(String),
}
