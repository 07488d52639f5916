//! Finite automata and the NFA -> DFA -> minimal DFA pipeline.
//!
//! This module provides:
//! - A labelled [`Automaton`] value with a validity predicate
//! - Subset construction (NFA to DFA conversion)
//! - Moore-style partition refinement (DFA minimization)
//! - Integer-indexed NFA/DFA views used by both algorithms

mod dfa;
mod label;
mod model;
mod nfa;
mod partition_refinement;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::Dfa;
pub use label::{decode_set, encode_set};
pub use model::{Automaton, AutomatonBuilder, SymbolMap};
pub use nfa::Nfa;
pub use partition_refinement::{BlockId, Partition, minimize, refine};
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{EMPTY_TOKEN, SymbolId, is_empty_token, is_valid_token};
