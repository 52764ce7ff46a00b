//! Non-deterministic Finite Automaton with epsilon transitions.
//!
//! States are created by name and stored in an arena indexed by [`StateId`].
//! Every set of states the algorithms produce is a [`StateSet`]; input is run
//! through a subset simulation that tracks all branches at once.

use crate::automaton::error::{NfaError, Result};
use crate::automaton::state::{NfaState, StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol, is_epsilon};
use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// An Epsilon Non-deterministic Finite Automaton.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    /// State arena, indexed by id (ids follow creation order)
    states: Vec<NfaState>,
    /// Name -> id lookup
    index: IndexMap<String, StateId>,
    /// Declared alphabet (never contains epsilon)
    sigma: IndexSet<Symbol>,
    /// Start state, if one was set
    start: Option<StateId>,
    /// Final (accepting) states
    finals: StateSet,
}

/// Outcome of running the subset simulation over one input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    active: StateSet,
    max_copies: usize,
    accepted: bool,
}

impl Simulation {
    /// The active states once the whole input was consumed.
    pub fn active(&self) -> &StateSet {
        &self.active
    }

    /// Largest number of simultaneously active states, initial closure included.
    pub fn max_copies(&self) -> usize {
        self.max_copies
    }

    /// Whether a final state was active at the end of the input.
    pub fn accepted(&self) -> bool {
        self.accepted
    }
}

impl Nfa {
    /// Create a new empty NFA.
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    /// Add a state. Returns false if a state with this name already exists.
    pub fn add_state(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        let id = self.states.len() as StateId;
        self.states.push(NfaState::new(id, name));
        self.index.insert(name.to_owned(), id);
        true
    }

    /// Make `name` the start state, replacing any previous one.
    /// Returns false if no such state exists.
    pub fn set_start(&mut self, name: &str) -> bool {
        match self.lookup(name) {
            Some(id) => {
                self.start = Some(id);
                true
            }
            None => false,
        }
    }

    /// Mark `name` as a final state. Returns false if no such state exists.
    pub fn set_final(&mut self, name: &str) -> bool {
        match self.lookup(name) {
            Some(id) => {
                self.finals.insert(id);
                true
            }
            None => false,
        }
    }

    /// Add a symbol to the alphabet. The epsilon marker is never added.
    pub fn add_sigma(&mut self, symbol: Symbol) {
        if !is_epsilon(symbol) {
            self.sigma.insert(symbol);
        }
    }

    /// Add an edge labeled `symbol` from `from` to every state named in `to`.
    ///
    /// The symbol must be in the alphabet or be [`EPSILON`]. Names that do
    /// not resolve are skipped. Returns true if at least one new edge was
    /// added; re-adding an existing edge changes nothing.
    pub fn add_transition<I, S>(&mut self, from: &str, to: I, symbol: Symbol) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(from) = self.lookup(from) else {
            return false;
        };
        if !is_epsilon(symbol) && !self.sigma.contains(&symbol) {
            return false;
        }

        let mut added = false;
        for name in to {
            if let Some(dest) = self.lookup(name.as_ref()) {
                added |= self.states[from as usize].add_transition(symbol, dest);
            }
        }
        added
    }

    /// Whether `name` is a final state. Unknown names are not final.
    pub fn is_final(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|id| self.finals.contains(id))
    }

    /// Whether `name` is the start state. Unknown names are never the start.
    pub fn is_start(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|id| self.start == Some(id))
    }

    /// Get the alphabet (epsilon excluded), in insertion order.
    pub fn sigma(&self) -> &IndexSet<Symbol> {
        &self.sigma
    }

    /// Look a state up by name.
    pub fn state(&self, name: &str) -> Option<&NfaState> {
        self.lookup(name).map(|id| &self.states[id as usize])
    }

    pub fn state_by_id(&self, id: StateId) -> Option<&NfaState> {
        self.states.get(id as usize)
    }

    /// All states in creation order.
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get the start state, if set.
    pub fn start(&self) -> Option<&NfaState> {
        self.start.map(|id| &self.states[id as usize])
    }

    /// Get the final states.
    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    /// Resolve a set of ids to state names, in id order.
    pub fn names(&self, set: &StateSet) -> Vec<&str> {
        set.iter()
            .filter_map(|id| self.state_by_id(id))
            .map(NfaState::name)
            .collect()
    }

    /// The destinations of `from` on `symbol`, as an owned set.
    /// Empty when there is no such transition.
    pub fn to_states(&self, from: StateId, symbol: Symbol) -> StateSet {
        let mut set = StateSet::with_capacity(self.states.len());
        if let Some(state) = self.state_by_id(from) {
            for dest in state.to_states(symbol) {
                set.insert(dest);
            }
        }
        set
    }

    /// Compute the epsilon closure of a single state using DFS.
    ///
    /// The result always contains `state` itself. Epsilon cycles are fine:
    /// a state is pushed only if it has not been recorded yet.
    pub fn e_closure(&self, state: StateId) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let mut stack = vec![state];

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }

            // Follow epsilon transitions
            if let Some(current) = self.state_by_id(s) {
                for dest in current.to_states(EPSILON) {
                    if !closure.contains(dest) {
                        stack.push(dest);
                    }
                }
            }
        }

        closure
    }

    /// Get the epsilon closure of a set of states.
    pub fn e_closure_of(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            if !closure.contains(state) {
                closure.union_with(&self.e_closure(state));
            }
        }
        closure
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    fn step(&self, active: &StateSet, symbol: Symbol) -> StateSet {
        // 'e' in the input is an ordinary symbol, and never part of the alphabet
        if is_epsilon(symbol) {
            return StateSet::with_capacity(self.states.len());
        }

        let mut reached = StateSet::with_capacity(self.states.len());
        for state in active.iter() {
            if let Some(current) = self.state_by_id(state) {
                for dest in current.to_states(symbol) {
                    reached.insert(dest);
                }
            }
        }

        self.e_closure_of(&reached)
    }

    /// Run the subset simulation over `input`.
    ///
    /// Fails with [`NfaError::MissingStart`] if no start state was set.
    pub fn simulate(&self, input: &str) -> Result<Simulation> {
        let start = self.start.ok_or(NfaError::MissingStart)?;

        let mut active = self.e_closure(start);
        let mut max_copies = active.len();

        for symbol in input.chars() {
            // Nothing leaves the empty set
            if active.is_empty() {
                break;
            }
            active = self.step(&active, symbol);
            max_copies = max_copies.max(active.len());
        }

        let accepted = active.intersects(&self.finals);
        Ok(Simulation {
            active,
            max_copies,
            accepted,
        })
    }

    /// Check whether the NFA accepts `input`.
    pub fn accepts(&self, input: &str) -> Result<bool> {
        self.simulate(input).map(|sim| sim.accepted)
    }

    /// The largest number of states active at once while reading `input`.
    pub fn max_copies(&self, input: &str) -> Result<usize> {
        self.simulate(input).map(|sim| sim.max_copies)
    }

    /// Check whether this automaton is a total DFA.
    ///
    /// Every state needs exactly one destination for every alphabet symbol
    /// and no epsilon edges. Unreachable states count too, and a missing
    /// transition disqualifies the automaton.
    pub fn is_dfa(&self) -> bool {
        self.states.iter().all(|state| {
            !state.has_epsilon() && self.sigma.iter().all(|&c| state.out_degree(c) == 1)
        })
    }

    fn fmt_names(&self, f: &mut fmt::Formatter<'_>, set: &StateSet) -> fmt::Result {
        let names = self.names(set);
        if names.is_empty() {
            f.write_str("∅")
        } else {
            write!(f, "{{{}}}", names.join(","))
        }
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Q = { ")?;
        for state in &self.states {
            write!(f, "{} ", state.name())?;
        }
        f.write_str("}\nSigma = { ")?;
        for symbol in &self.sigma {
            write!(f, "{symbol} ")?;
        }
        f.write_str("}\ndelta =\n")?;

        let mut columns: Vec<Symbol> = self.sigma.iter().copied().collect();
        if self.states.iter().any(NfaState::has_epsilon) {
            columns.push(EPSILON);
        }
        for symbol in &columns {
            write!(f, "\t{symbol}")?;
        }
        f.write_str("\n")?;
        for state in &self.states {
            f.write_str(state.name())?;
            for &symbol in &columns {
                f.write_str("\t")?;
                self.fmt_names(f, &self.to_states(state.id(), symbol))?;
            }
            f.write_str("\n")?;
        }

        match self.start() {
            Some(start) => writeln!(f, "q0 = {}", start.name())?,
            None => f.write_str("q0 = undefined\n")?,
        }
        f.write_str("F = { ")?;
        for name in self.names(&self.finals) {
            write!(f, "{name} ")?;
        }
        f.write_str("}")
    }
}
