//! Error types for automaton queries.

use thiserror::Error;

/// Errors that can occur when running an automaton on input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NfaError {
    /// No start state has been set.
    ///
    /// Simulation has nowhere to begin until `set_start` succeeds.
    #[error("automaton has no start state")]
    MissingStart,
}

/// A specialized `Result` type for automaton queries.
pub type Result<T> = std::result::Result<T, NfaError>;
