//! Integer-indexed deterministic automaton.

use crate::automaton::model::Automaton;
use crate::automaton::nfa::{index_labels, lookup};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;
use crate::error::{Error, Result};
use std::collections::VecDeque;

/// A deterministic automaton over dense state and symbol identifiers.
///
/// Transitions are partial: a missing entry means the word is rejected.
#[derive(Debug, Clone)]
pub struct Dfa {
    num_states: usize,
    num_symbols: usize,
    start_state: StateId,
    final_states: StateSet,
    /// Row-major `[state][symbol]` successor
    transitions: Vec<Option<StateId>>,
}

impl Dfa {
    /// Create a DFA with no states over an alphabet of `num_symbols` symbols.
    pub fn new(num_symbols: usize) -> Self {
        Self {
            num_states: 0,
            num_symbols,
            start_state: 0,
            final_states: StateSet::with_capacity(16),
            transitions: Vec::new(),
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states as StateId;
        self.num_states += 1;
        self.transitions.resize(self.num_states * self.num_symbols, None);
        id
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = state;
    }

    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        let slot = self.slot(source, symbol);
        self.transitions[slot] = Some(destination);
    }

    fn slot(&self, state: StateId, symbol: SymbolId) -> usize {
        state as usize * self.num_symbols + symbol as usize
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions[self.slot(source, symbol)]
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_symbols(&self) -> usize {
        self.num_symbols
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Number of defined transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.iter().flatten().count()
    }

    /// All defined transitions in `(source, symbol)` order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        (0..self.num_states as StateId).flat_map(move |src| {
            (0..self.num_symbols as SymbolId)
                .filter_map(move |sym| self.transition(src, sym).map(|dst| (src, sym, dst)))
        })
    }

    /// Index a validated, deterministic automaton.
    pub fn from_automaton(automaton: &Automaton) -> Result<Self> {
        let state_ids = index_labels(automaton.states());
        let symbol_ids = index_labels(automaton.alphabet());

        let mut dfa = Dfa::new(automaton.alphabet().len());
        for _ in automaton.states() {
            dfa.add_state();
        }
        dfa.set_start_state(lookup(&state_ids, automaton.start(), "state")?);
        for state in automaton.final_states() {
            dfa.add_final_state(lookup(&state_ids, state, "state")?);
        }

        for (src, sym, dst) in automaton.transitions() {
            let src = lookup(&state_ids, src, "state")?;
            let sym = lookup(&symbol_ids, sym, "symbol")?;
            let dst = lookup(&state_ids, dst, "state")?;
            if dfa.transition(src, sym).is_some() {
                return Err(Error::Internal(format!(
                    "state #{src} has more than one transition on symbol #{sym}"
                )));
            }
            dfa.add_transition(src, sym, dst);
        }

        Ok(dfa)
    }

    /// Label the states and alphabet and produce an [`Automaton`].
    ///
    /// `state_labels[i]` names state `i`.
    pub fn to_automaton(&self, state_labels: &[String], alphabet: &[String]) -> Result<Automaton> {
        if state_labels.len() != self.num_states || alphabet.len() != self.num_symbols {
            return Err(Error::Internal(format!(
                "{} labels for {} states, {} symbols for an alphabet of {}",
                state_labels.len(),
                self.num_states,
                alphabet.len(),
                self.num_symbols
            )));
        }

        let mut builder = Automaton::builder()
            .states(state_labels.iter().cloned())
            .alphabet(alphabet.iter().cloned())
            .final_states(
                self.final_states
                    .iter()
                    .map(|state| state_labels[state as usize].clone()),
            );
        if let Some(start) = state_labels.get(self.start_state as usize) {
            builder = builder.start(start.clone());
        }
        for (src, sym, dst) in self.transitions() {
            builder = builder.transition(
                state_labels[src as usize].clone(),
                alphabet[sym as usize].clone(),
                state_labels[dst as usize].clone(),
            );
        }

        Ok(builder.build())
    }

    /// Find all states reachable from the start state, in breadth-first order.
    pub fn find_reachable_states(&self) -> Vec<StateId> {
        let mut order = Vec::new();
        if self.num_states == 0 {
            return order;
        }

        let mut reachable = StateSet::with_capacity(self.num_states);
        let mut queue = VecDeque::new();
        reachable.insert(self.start_state);
        queue.push_back(self.start_state);

        while let Some(state) = queue.pop_front() {
            order.push(state);
            for symbol in 0..self.num_symbols as SymbolId {
                if let Some(next) = self.transition(state, symbol) {
                    if reachable.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dfa_basic() {
        let mut dfa = Dfa::new(2);
        let s0 = dfa.add_state();
        let s1 = dfa.add_state();
        let s2 = dfa.add_state();

        dfa.set_start_state(s0);
        dfa.add_final_state(s2);
        dfa.add_transition(s0, 0, s1);
        dfa.add_transition(s1, 1, s2);

        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.start_state(), 0);
        assert_eq!(dfa.transition(s0, 0), Some(s1));
        assert_eq!(dfa.transition(s0, 1), None);
        assert_eq!(dfa.transition_count(), 2);
        assert_eq!(
            dfa.transitions().collect::<Vec<_>>(),
            vec![(0, 0, 1), (1, 1, 2)]
        );
    }

    #[test]
    fn test_reachable_states() {
        // 0 -a-> 2 -a-> 0, 1 is unreachable
        let mut dfa = Dfa::new(1);
        for _ in 0..3 {
            dfa.add_state();
        }
        dfa.add_transition(0, 0, 2);
        dfa.add_transition(2, 0, 0);
        dfa.add_transition(1, 0, 0);

        assert_eq!(dfa.find_reachable_states(), vec![0, 2]);
    }

    #[test]
    fn test_round_trip_through_automaton() {
        let automaton = Automaton::builder()
            .states(["p", "q"])
            .alphabet(["x", "y"])
            .start("q")
            .final_state("p")
            .transition("q", "x", "p")
            .transition("p", "y", "p")
            .build();

        let dfa = Dfa::from_automaton(&automaton).unwrap();
        assert_eq!(dfa.start_state(), 1);
        assert!(dfa.is_final(0));
        assert_eq!(dfa.transition(1, 0), Some(0));

        let back = dfa
            .to_automaton(automaton.states(), automaton.alphabet())
            .unwrap();
        assert_eq!(back.start(), "q");
        assert_eq!(back.transition_count(), 2);
        assert!(back.accepts(&["x", "y", "y"]));
        assert!(!back.accepts(&["y"]));
    }

    #[test]
    fn test_nondeterministic_input_is_rejected() {
        let automaton = Automaton::builder()
            .states(["p", "q"])
            .symbol("x")
            .start("p")
            .transition("p", "x", "p")
            .transition("p", "x", "q")
            .build();
        assert!(matches!(
            Dfa::from_automaton(&automaton),
            Err(Error::Internal(_))
        ));
    }
}
