pub mod automaton;

pub use automaton::{EPSILON, Nfa, NfaError, NfaState, Simulation, StateId, StateSet, Symbol};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn nfa(m: &Bound<'_, PyModule>) -> PyResult<()> {
    automaton::automaton(m)
}
