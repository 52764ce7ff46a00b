//! Epsilon-NFA construction and simulation.
//!
//! This module provides:
//! - Incremental construction of named states, alphabet and transitions
//! - Epsilon closure computation
//! - Subset simulation for acceptance and branch counting
//! - Structural DFA check
//! - PyO3 bindings for Python interoperability (feature `python`)

mod error;
mod nfa;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
mod symbol;

pub use error::{NfaError, Result};
pub use nfa::{Nfa, Simulation};
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use state::{NfaState, StateId, StateSet};
pub use symbol::{EPSILON, Symbol, is_epsilon};
