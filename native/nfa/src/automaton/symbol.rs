//! Symbol types for automata transitions.

/// An input symbol: a single character of the input string.
/// The special value `EPSILON` labels epsilon (empty) transitions.
pub type Symbol = char;

/// Special symbol representing epsilon (empty) transitions.
/// It is never part of a declared alphabet.
pub const EPSILON: Symbol = 'e';

/// Check if a symbol is the epsilon marker.
#[inline]
pub fn is_epsilon(symbol: Symbol) -> bool {
    symbol == EPSILON
}
