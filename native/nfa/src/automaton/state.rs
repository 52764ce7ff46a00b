//! State types for automata.

use crate::automaton::symbol::{Symbol, is_epsilon};
use fixedbitset::FixedBitSet;
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A state identifier represented as a u32.
///
/// Ids are dense and assigned in creation order, so they double as indices
/// into the automaton's state arena.
pub type StateId = u32;

/// A set of states implemented using a fixed-size bit set for efficiency.
///
/// Iteration yields states in ascending id order. Two sets compare equal when
/// they hold the same states, whatever capacity they were allocated with.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state into the set. Returns true if it was not present.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Check if every state of this set is also in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    /// Get the states as a vec, in ascending id order.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for id in self.iter() {
            id.hash(state);
        }
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let items: Vec<StateId> = iter.into_iter().collect();
        let capacity = items.iter().copied().max().map_or(0, |m| m as usize + 1);
        let mut set = Self::with_capacity(capacity);
        for state in items {
            set.insert(state);
        }
        set
    }
}

/// A named NFA state together with its outgoing transitions.
///
/// Equality and hashing only look at the name; the transition table is
/// owned data, not identity.
#[derive(Debug, Clone)]
pub struct NfaState {
    id: StateId,
    name: String,
    /// symbol -> destinations, epsilon included, insertion ordered
    transitions: IndexMap<Symbol, IndexSet<StateId>>,
}

impl NfaState {
    pub(crate) fn new(id: StateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transitions: IndexMap::new(),
        }
    }

    /// The state's arena id.
    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record an edge to `to` on `symbol`. Returns false if it already existed.
    pub(crate) fn add_transition(&mut self, symbol: Symbol, to: StateId) -> bool {
        self.transitions.entry(symbol).or_default().insert(to)
    }

    /// Destinations reached on `symbol`, in the order they were added.
    /// Yields nothing when there is no such transition.
    pub fn to_states(&self, symbol: Symbol) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .get(&symbol)
            .into_iter()
            .flat_map(|dests| dests.iter().copied())
    }

    /// Number of distinct destinations on `symbol`.
    pub fn out_degree(&self, symbol: Symbol) -> usize {
        self.transitions.get(&symbol).map_or(0, IndexSet::len)
    }

    /// Whether any epsilon edge leaves this state.
    pub fn has_epsilon(&self) -> bool {
        self.transitions
            .iter()
            .any(|(&symbol, dests)| is_epsilon(symbol) && !dests.is_empty())
    }

    /// All transitions as `(symbol, destination)` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&symbol, dests)| dests.iter().map(move |&to| (symbol, to)))
    }
}

impl PartialEq for NfaState {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NfaState {}

impl Hash for NfaState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for NfaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
