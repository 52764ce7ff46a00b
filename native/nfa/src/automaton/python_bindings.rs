//! PyO3 bindings for the automaton module.
//!
//! States are addressed by name and symbols are one-character strings, so the
//! Python API mirrors the Rust one without wrapper objects.

use crate::automaton::error::NfaError;
use crate::automaton::nfa::Nfa;
use crate::automaton::symbol::{EPSILON, Symbol};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PySet;

impl From<NfaError> for PyErr {
    fn from(err: NfaError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// A Non-deterministic Finite Automaton with epsilon transitions.
#[pyclass(name = "NFA", module = "nfa")]
pub struct PyNfa {
    /// The underlying Rust NFA
    nfa: Nfa,
}

#[pymethods]
impl PyNfa {
    #[new]
    fn new() -> Self {
        Self { nfa: Nfa::new() }
    }

    /// The character used to label epsilon transitions.
    #[classattr]
    const EPSILON: Symbol = EPSILON;

    fn add_state(&mut self, name: &str) -> bool {
        self.nfa.add_state(name)
    }

    fn set_start(&mut self, name: &str) -> bool {
        self.nfa.set_start(name)
    }

    fn set_final(&mut self, name: &str) -> bool {
        self.nfa.set_final(name)
    }

    fn add_sigma(&mut self, symbol: Symbol) {
        self.nfa.add_sigma(symbol);
    }

    /// Add a transition to every named destination.
    #[pyo3(signature = (from_state, to_states, symbol))]
    fn add_transition(&mut self, from_state: &str, to_states: Vec<String>, symbol: Symbol) -> bool {
        self.nfa.add_transition(from_state, &to_states, symbol)
    }

    fn is_final(&self, name: &str) -> bool {
        self.nfa.is_final(name)
    }

    fn is_start(&self, name: &str) -> bool {
        self.nfa.is_start(name)
    }

    /// Get the alphabet as a set of one-character strings.
    fn get_sigma(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for symbol in self.nfa.sigma() {
            set.add(symbol.to_string())?;
        }
        Ok(set.unbind())
    }

    /// Names of the states in the epsilon closure of `name`.
    fn e_closure(&self, name: &str) -> PyResult<Vec<String>> {
        let state = self
            .nfa
            .state(name)
            .ok_or_else(|| PyValueError::new_err(format!("unknown state {name:?}")))?;
        let closure = self.nfa.e_closure(state.id());
        Ok(self
            .nfa
            .names(&closure)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    /// Check whether the NFA accepts the string.
    /// Raises ValueError when no start state was set.
    fn accepts(&self, input: &str) -> PyResult<bool> {
        Ok(self.nfa.accepts(input)?)
    }

    fn max_copies(&self, input: &str) -> PyResult<usize> {
        Ok(self.nfa.max_copies(input)?)
    }

    fn is_dfa(&self) -> bool {
        self.nfa.is_dfa()
    }

    fn __str__(&self) -> String {
        self.nfa.to_string()
    }

    fn __len__(&self) -> usize {
        self.nfa.num_states()
    }
}

/// Register the automaton classes.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNfa>()?;
    Ok(())
}
