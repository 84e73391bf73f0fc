//! Symbol type and sentinel markers for context-free grammars.
//!
//! Grammar symbols are arbitrary non-whitespace tokens. Two sentinels are
//! reserved: `ε` (the empty-string marker, appears only in FIRST sets) and
//! `$` (the end-of-input marker / lookahead).

use std::fmt;

/// The empty-string marker.
pub const EPSILON: &str = "ε";

/// The end-of-input marker.
pub const END_MARKER: &str = "$";

/// A grammar symbol.
///
/// Whether a symbol is a terminal or a nonterminal is decided by the grammar
/// it belongs to (a symbol is a nonterminal iff it heads some production),
/// so the type itself only distinguishes the two sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol from a token.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `ε` sentinel.
    pub fn epsilon() -> Self {
        Self(EPSILON.to_string())
    }

    /// The `$` sentinel.
    pub fn end_marker() -> Self {
        Self(END_MARKER.to_string())
    }

    /// Checks if this symbol is epsilon (ε).
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.0 == EPSILON
    }

    /// Checks if this symbol is the end marker ($).
    #[inline]
    pub fn is_end_marker(&self) -> bool {
        self.0 == END_MARKER
    }

    /// Returns the symbol's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the symbol with a prime appended, e.g. `S` → `S'`.
    ///
    /// Used to form the fresh start symbol of an augmented grammar.
    pub fn primed(&self) -> Symbol {
        Symbol(format!("{}'", self.0))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Joins a symbol sequence into a space-separated string.
pub fn symbols_to_string(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
