//! Error types for the LR(1) analyzer.

use thiserror::Error;

/// Errors that can occur while ingesting a grammar.
///
/// Table conflicts are not errors: construction always completes and
/// conflicts accumulate as data (see [`crate::tables::Conflict`]). Input
/// rejection at parse time is likewise reported through the trace, never as
/// an `Err`.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("malformed production (missing '->'): {0}")]
    MissingArrow(String),

    #[error("empty head in production: {0}")]
    EmptyHead(String),

    #[error("empty alternative in production: {0}")]
    EmptyAlternative(String),

    #[error("ε inside a multi-symbol body: {0}")]
    EpsilonInBody(String),

    #[error("empty grammar input")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
