// Property-based tests for epsilon closure and subset simulation.
//
// Random automata are built over the alphabet {a, b}; the closure and the
// acceptance result are checked against a naive fixed-point reference.

use nfa::{EPSILON, Nfa, StateSet};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// GENERATORS
// ============================================================================

const SYMBOLS: [char; 3] = ['a', 'b', EPSILON];

#[derive(Debug, Clone)]
struct Shape {
    states: usize,
    edges: Vec<(usize, usize, char)>,
    finals: Vec<usize>,
    start: usize,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    (1usize..8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, prop::sample::select(SYMBOLS.to_vec())), 0..20),
            prop::collection::vec(0..n, 0..3),
            0..n,
        )
            .prop_map(|(states, edges, finals, start)| Shape {
                states,
                edges,
                finals,
                start,
            })
    })
}

fn input_strategy() -> impl Strategy<Value = String> {
    "[ab]{0,8}"
}

fn name(i: usize) -> String {
    format!("q{i}")
}

fn build(shape: &Shape) -> Nfa {
    let mut nfa = Nfa::new();
    for i in 0..shape.states {
        nfa.add_state(&name(i));
    }
    nfa.add_sigma('a');
    nfa.add_sigma('b');
    for &(from, to, symbol) in &shape.edges {
        nfa.add_transition(&name(from), [name(to)], symbol);
    }
    for &f in &shape.finals {
        nfa.set_final(&name(f));
    }
    nfa.set_start(&name(shape.start));
    nfa
}

/// Closure by repeated relaxation until nothing changes.
fn reference_closure(shape: &Shape, seed: &BTreeSet<usize>) -> BTreeSet<usize> {
    let mut closure = seed.clone();
    loop {
        let before = closure.len();
        for &(from, to, symbol) in &shape.edges {
            if symbol == EPSILON && closure.contains(&from) {
                closure.insert(to);
            }
        }
        if closure.len() == before {
            return closure;
        }
    }
}

fn reference_run(shape: &Shape, input: &str) -> (BTreeSet<usize>, usize) {
    let mut active = reference_closure(shape, &BTreeSet::from([shape.start]));
    let mut max = active.len();
    for c in input.chars() {
        let moved: BTreeSet<usize> = shape
            .edges
            .iter()
            .filter(|&&(from, _, symbol)| symbol == c && active.contains(&from))
            .map(|&(_, to, _)| to)
            .collect();
        active = reference_closure(shape, &moved);
        max = max.max(active.len());
    }
    (active, max)
}

fn ids(set: &StateSet) -> BTreeSet<usize> {
    set.iter().map(|id| id as usize).collect()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A closure contains its seed and is closed under itself.
    #[test]
    fn prop_closure_contains_seed_and_is_idempotent(shape in shape_strategy()) {
        let nfa = build(&shape);
        for state in nfa.states() {
            let closure = nfa.e_closure(state.id());
            prop_assert!(closure.contains(state.id()));
            for member in closure.iter() {
                prop_assert!(nfa.e_closure(member).is_subset(&closure));
            }
            prop_assert_eq!(
                ids(&closure),
                reference_closure(&shape, &BTreeSet::from([state.id() as usize]))
            );
        }
    }

    /// Simulation agrees with the naive reference run.
    #[test]
    fn prop_simulation_matches_reference(shape in shape_strategy(), input in input_strategy()) {
        let nfa = build(&shape);
        let sim = nfa.simulate(&input).unwrap();
        let (active, max) = reference_run(&shape, &input);

        prop_assert_eq!(ids(sim.active()), active.clone());
        prop_assert_eq!(sim.max_copies(), max);

        let accepted = active.iter().any(|s| shape.finals.contains(s));
        prop_assert_eq!(nfa.accepts(&input).unwrap(), accepted);
        prop_assert_eq!(nfa.max_copies(&input).unwrap(), max);
    }

    /// With no input, the only active states are the start's closure.
    #[test]
    fn prop_empty_input_copies_closure(shape in shape_strategy()) {
        let nfa = build(&shape);
        let start = nfa.start().map(|s| s.id()).unwrap();
        prop_assert_eq!(nfa.max_copies("").unwrap(), nfa.e_closure(start).len());
    }

    /// Copies never exceed the number of states.
    #[test]
    fn prop_copies_bounded(shape in shape_strategy(), input in input_strategy()) {
        let nfa = build(&shape);
        let sim = nfa.simulate(&input).unwrap();
        prop_assert!(sim.max_copies() <= nfa.num_states());
        prop_assert!(sim.active().len() <= sim.max_copies());
    }

    /// Any epsilon edge rules out a DFA.
    #[test]
    fn prop_epsilon_is_never_dfa(shape in shape_strategy()) {
        let nfa = build(&shape);
        if shape.edges.iter().any(|&(_, _, symbol)| symbol == EPSILON) {
            prop_assert!(!nfa.is_dfa());
        }
    }

    /// A total transition function with no epsilon edges is a DFA.
    #[test]
    fn prop_total_function_is_dfa(targets in prop::collection::vec((0usize..5, 0usize..5), 1..5)) {
        let n = targets.len();
        let mut nfa = Nfa::new();
        for i in 0..n {
            nfa.add_state(&name(i));
        }
        nfa.add_sigma('a');
        nfa.add_sigma('b');
        for (i, &(on_a, on_b)) in targets.iter().enumerate() {
            nfa.add_transition(&name(i), [name(on_a % n)], 'a');
            nfa.add_transition(&name(i), [name(on_b % n)], 'b');
        }
        prop_assert!(nfa.is_dfa());

        nfa.add_transition(&name(0), [name(0)], EPSILON);
        prop_assert!(!nfa.is_dfa());
    }
}
