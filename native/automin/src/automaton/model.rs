//! The labelled automaton value shared by every stage of the pipeline.

use crate::error::ValidityError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Destination sets keyed by symbol, for one source state.
pub type SymbolMap = IndexMap<String, IndexSet<String>>;

/// A finite automaton over string-labelled states and symbols.
///
/// The same type carries NFAs and DFAs; [`Automaton::is_deterministic`]
/// tells them apart. Instances are built with [`AutomatonBuilder`] (or read
/// with [`crate::text::parse`]) and never mutated afterwards. Construction
/// does not check consistency, so callers run [`Automaton::validate`] before
/// handing an automaton to either algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automaton {
    states: Vec<String>,
    alphabet: Vec<String>,
    start: String,
    final_states: IndexSet<String>,
    /// source -> symbol -> destinations; empty destination sets are never stored
    transitions: IndexMap<String, SymbolMap>,
}

impl Automaton {
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::new()
    }

    /// States in declaration order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Symbols in declaration order.
    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn final_states(&self) -> &IndexSet<String> {
        &self.final_states
    }

    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.contains(state)
    }

    /// Outgoing transitions of `state`, keyed by symbol.
    pub fn transitions_from(&self, state: &str) -> Option<&SymbolMap> {
        self.transitions.get(state)
    }

    /// Destinations of `state` on `symbol`.
    pub fn successors(&self, state: &str, symbol: &str) -> Option<&IndexSet<String>> {
        self.transitions_from(state)?.get(symbol)
    }

    /// All transitions as `(source, symbol, destination)` triples, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.transitions.iter().flat_map(|(src, by_symbol)| {
            by_symbol.iter().flat_map(move |(sym, dests)| {
                dests
                    .iter()
                    .map(move |dst| (src.as_str(), sym.as_str(), dst.as_str()))
            })
        })
    }

    /// Number of `(source, symbol, destination)` triples.
    pub fn transition_count(&self) -> usize {
        self.transitions
            .values()
            .flat_map(|by_symbol| by_symbol.values())
            .map(IndexSet::len)
            .sum()
    }

    /// True iff every `(state, symbol)` pair has at most one destination.
    pub fn is_deterministic(&self) -> bool {
        self.first_nondeterminism().is_none()
    }

    fn first_nondeterminism(&self) -> Option<ValidityError> {
        self.transitions.iter().find_map(|(src, by_symbol)| {
            by_symbol
                .iter()
                .find(|(_, dests)| dests.len() > 1)
                .map(|(sym, dests)| ValidityError::Nondeterministic {
                    state: src.clone(),
                    symbol: sym.clone(),
                    count: dests.len(),
                })
        })
    }

    /// True iff every structural invariant holds.
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Like [`Automaton::validate`], reporting the first violated invariant.
    pub fn check(&self) -> Result<(), ValidityError> {
        let mut states = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if state.is_empty() {
                return Err(ValidityError::EmptyLabel);
            }
            if !states.insert(state.as_str()) {
                return Err(ValidityError::DuplicateState(state.clone()));
            }
        }

        let mut alphabet = HashSet::with_capacity(self.alphabet.len());
        for symbol in &self.alphabet {
            if symbol.is_empty() {
                return Err(ValidityError::EmptyLabel);
            }
            if !alphabet.insert(symbol.as_str()) {
                return Err(ValidityError::DuplicateSymbol(symbol.clone()));
            }
        }

        if !states.contains(self.start.as_str()) {
            return Err(ValidityError::UnknownStart(self.start.clone()));
        }

        if let Some(state) = self
            .final_states
            .iter()
            .find(|s| !states.contains(s.as_str()))
        {
            return Err(ValidityError::UnknownFinalState(state.clone()));
        }

        for (src, by_symbol) in &self.transitions {
            if !states.contains(src.as_str()) {
                return Err(ValidityError::UnknownTransitionState(src.clone()));
            }
            for (sym, dests) in by_symbol {
                if !alphabet.contains(sym.as_str()) {
                    return Err(ValidityError::UnknownSymbol(sym.clone()));
                }
                if dests.is_empty() {
                    return Err(ValidityError::EmptyDestinations {
                        state: src.clone(),
                        symbol: sym.clone(),
                    });
                }
                if let Some(dst) = dests.iter().find(|d| !states.contains(d.as_str())) {
                    return Err(ValidityError::UnknownTransitionState(dst.clone()));
                }
            }
        }

        Ok(())
    }

    /// Check validity and determinism together.
    pub fn check_deterministic(&self) -> Result<(), ValidityError> {
        self.check()?;
        match self.first_nondeterminism() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run the automaton on `word`, tracking every reachable state at once.
    pub fn accepts<S: AsRef<str>>(&self, word: &[S]) -> bool {
        let mut current: IndexSet<&str> = IndexSet::from([self.start.as_str()]);
        for symbol in word {
            let mut next = IndexSet::new();
            for state in &current {
                if let Some(dests) = self.successors(state, symbol.as_ref()) {
                    next.extend(dests.iter().map(String::as_str));
                }
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        current.iter().any(|state| self.is_final(state))
    }

    /// Check if the automaton accepts no word at all.
    pub fn is_empty(&self) -> bool {
        let mut visited: IndexSet<&str> = IndexSet::from([self.start.as_str()]);
        let mut next = 0;
        while let Some(&state) = visited.get_index(next) {
            if self.is_final(state) {
                return false;
            }
            if let Some(by_symbol) = self.transitions_from(state) {
                for dests in by_symbol.values() {
                    visited.extend(dests.iter().map(String::as_str));
                }
            }
            next += 1;
        }
        true
    }
}

/// Incremental constructor for [`Automaton`].
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: Vec<String>,
    alphabet: Vec<String>,
    start: Option<String>,
    final_states: IndexSet<String>,
    transitions: IndexMap<String, SymbolMap>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. Declaring it twice is recorded and caught by validation.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.states.push(state.into());
        self
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Declare a symbol. Declaring it twice is recorded and caught by validation.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.alphabet.push(symbol.into());
        self
    }

    pub fn alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn start(mut self, state: impl Into<String>) -> Self {
        self.start = Some(state.into());
        self
    }

    pub fn final_state(mut self, state: impl Into<String>) -> Self {
        self.final_states.insert(state.into());
        self
    }

    pub fn final_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.final_states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Add `source --symbol--> destination`. Repeating a transition is a no-op.
    pub fn transition(
        mut self,
        source: impl Into<String>,
        symbol: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.transitions
            .entry(source.into())
            .or_default()
            .entry(symbol.into())
            .or_default()
            .insert(destination.into());
        self
    }

    /// Finish construction. A missing start state becomes the empty label,
    /// which validation rejects.
    pub fn build(self) -> Automaton {
        Automaton {
            states: self.states,
            alphabet: self.alphabet,
            start: self.start.unwrap_or_default(),
            final_states: self.final_states,
            transitions: self.transitions,
        }
    }
}
