//! Error types for reading, validating and transforming automata.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The textual description could not be parsed.
    #[error("malformed input at line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The automaton failed the validity gate.
    #[error("invalid automaton: {0}")]
    Structural(#[from] ValidityError),

    /// An algorithm met a state or symbol outside the declared sets.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

impl Error {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Error::Malformed {
            line,
            message: message.into(),
        }
    }
}

/// The first structural invariant an automaton violates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidityError {
    /// A state or symbol label is the empty string.
    #[error("empty label")]
    EmptyLabel,

    #[error("duplicate state `{0}`")]
    DuplicateState(String),

    #[error("duplicate symbol `{0}`")]
    DuplicateSymbol(String),

    #[error("start state `{0}` is not a declared state")]
    UnknownStart(String),

    #[error("final state `{0}` is not a declared state")]
    UnknownFinalState(String),

    /// A transition references an undeclared source or destination.
    #[error("transition references undeclared state `{0}`")]
    UnknownTransitionState(String),

    #[error("transition uses undeclared symbol `{0}`")]
    UnknownSymbol(String),

    /// A stored `(state, symbol)` entry has no destinations.
    #[error("state `{state}` has an empty destination set on `{symbol}`")]
    EmptyDestinations { state: String, symbol: String },

    /// More than one destination for a (state, symbol) pair where a DFA was required.
    #[error("state `{state}` has {count} transitions on `{symbol}`")]
    Nondeterministic {
        state: String,
        symbol: String,
        count: usize,
    },
}
