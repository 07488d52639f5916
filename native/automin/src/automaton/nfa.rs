//! Integer-indexed view of a nondeterministic automaton.

use crate::automaton::model::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Dense lookup tables for a (possibly nondeterministic) automaton.
///
/// States and symbols are numbered by their position in the source
/// [`Automaton`], so every lookup during subset construction is an array
/// index rather than a string comparison.
#[derive(Debug, Clone)]
pub struct Nfa {
    num_states: usize,
    num_symbols: usize,
    start_state: StateId,
    final_states: StateSet,
    /// Row-major `[state][symbol]` destination sets
    transitions: Vec<StateSet>,
}

/// Position lookup for a list of unique labels.
pub(crate) fn index_labels(labels: &[String]) -> IndexMap<&str, u32> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i as u32))
        .collect()
}

pub(crate) fn lookup(index: &IndexMap<&str, u32>, label: &str, kind: &str) -> Result<u32> {
    index
        .get(label)
        .copied()
        .ok_or_else(|| Error::Internal(format!("{kind} `{label}` is not declared")))
}

impl Nfa {
    /// Index a validated automaton.
    pub fn from_automaton(automaton: &Automaton) -> Result<Self> {
        let state_ids = index_labels(automaton.states());
        let symbol_ids = index_labels(automaton.alphabet());
        let num_states = automaton.states().len();
        let num_symbols = automaton.alphabet().len();

        let mut final_states = StateSet::with_capacity(num_states);
        for state in automaton.final_states() {
            final_states.insert(lookup(&state_ids, state, "state")?);
        }

        let mut transitions = vec![StateSet::with_capacity(num_states); num_states * num_symbols];
        for (src, sym, dst) in automaton.transitions() {
            let src = lookup(&state_ids, src, "state")? as usize;
            let sym = lookup(&symbol_ids, sym, "symbol")? as usize;
            let dst = lookup(&state_ids, dst, "state")?;
            transitions[src * num_symbols + sym].insert(dst);
        }

        Ok(Self {
            num_states,
            num_symbols,
            start_state: lookup(&state_ids, automaton.start(), "state")?,
            final_states,
            transitions,
        })
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

    /// Destinations of a single state on `symbol`.
    pub fn destinations(&self, state: StateId, symbol: SymbolId) -> &StateSet {
        &self.transitions[state as usize * self.num_symbols + symbol as usize]
    }

    /// Union of the destinations of every state in `states` on `symbol`.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states);
        for state in states.iter() {
            reached.union_with(self.destinations(state, symbol));
        }
        reached
    }
}
