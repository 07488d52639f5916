//! Subset construction algorithm for converting an NFA to a DFA.

use crate::automaton::dfa::Dfa;
use crate::automaton::label::encode_set;
use crate::automaton::model::Automaton;
use crate::automaton::nfa::Nfa;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;
use crate::error::Result;
use indexmap::IndexSet;
use tracing::{debug, trace};

/// Convert an NFA to an equivalent DFA using the powerset construction.
///
/// Every alphabet symbol, including the reserved empty token, is treated as
/// an ordinary symbol. Only meta-states reachable from `{start}` are
/// produced, in discovery order, each labelled with the set of NFA states it
/// stands for.
pub fn subset_construction(nfa: &Automaton) -> Result<Automaton> {
    nfa.check()?;
    let indexed = Nfa::from_automaton(nfa)?;
    let (dfa, meta_states) = determinize(&indexed);

    let labels: Vec<String> = meta_states
        .iter()
        .map(|members| encode_set(members.iter().map(|s| nfa.states()[s as usize].as_str())))
        .collect();

    debug!(
        nfa_states = indexed.num_states(),
        dfa_states = dfa.num_states(),
        transitions = dfa.transition_count(),
        "subset construction finished"
    );

    dfa.to_automaton(&labels, nfa.alphabet())
}

/// Run the worklist over an indexed NFA.
///
/// Returns the DFA together with the member set of each DFA state; DFA state
/// `i` is the `i`-th entry of the returned set.
pub(crate) fn determinize(nfa: &Nfa) -> (Dfa, IndexSet<StateSet>) {
    let mut meta_states: IndexSet<StateSet> = IndexSet::new();
    let mut dfa = Dfa::new(nfa.num_symbols());

    let initial_set = StateSet::singleton(nfa.start_state(), nfa.num_states());
    let initial_dfa_state = dfa.add_state();
    dfa.set_start_state(initial_dfa_state);
    if initial_set.intersects(nfa.final_states()) {
        dfa.add_final_state(initial_dfa_state);
    }
    meta_states.insert(initial_set);

    // Meta-states at positions below `next` have been expanded.
    let mut next = 0;
    while next < meta_states.len() {
        let current_dfa_state = next as StateId;
        let current = meta_states[next].clone();
        trace!(meta_state = ?current, "expanding");

        for symbol in 0..nfa.num_symbols() as SymbolId {
            let successor = nfa.move_on_symbol(&current, symbol);
            if successor.is_empty() {
                continue;
            }

            let next_dfa_state = match meta_states.get_index_of(&successor) {
                Some(existing) => existing as StateId,
                None => {
                    let new_state = dfa.add_state();
                    if successor.intersects(nfa.final_states()) {
                        dfa.add_final_state(new_state);
                    }
                    meta_states.insert(successor);
                    new_state
                }
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state);
        }

        next += 1;
    }

    (dfa, meta_states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidityError};

    fn scenario() -> Automaton {
        Automaton::builder()
            .states(["A", "B", "C"])
            .alphabet(["a", "b"])
            .start("A")
            .final_state("C")
            .transition("A", "a", "A")
            .transition("A", "a", "B")
            .transition("B", "b", "C")
            .build()
    }

    #[test]
    fn test_subset_construction_scenario() {
        let dfa = subset_construction(&scenario()).unwrap();

        assert_eq!(dfa.states(), ["{A}", "{A,B}", "{C}"]);
        assert_eq!(dfa.start(), "{A}");
        assert_eq!(dfa.alphabet(), ["a", "b"]);
        assert_eq!(
            dfa.final_states().iter().collect::<Vec<_>>(),
            vec!["{C}"]
        );
        assert_eq!(
            dfa.transitions().collect::<Vec<_>>(),
            vec![
                ("{A}", "a", "{A,B}"),
                ("{A,B}", "a", "{A,B}"),
                ("{A,B}", "b", "{C}"),
            ]
        );
        assert_eq!(dfa.transition_count(), 3);
        assert!(dfa.validate());
        assert!(dfa.is_deterministic());
        assert!(dfa.transitions_from("{C}").is_none());
    }

    #[test]
    fn test_labels_do_not_alias() {
        // Meta-states {1,2} and {12} must stay distinct states.
        let nfa = Automaton::builder()
            .states(["0", "1", "2", "12"])
            .alphabet(["a", "b"])
            .start("0")
            .final_state("1")
            .transition("0", "a", "1")
            .transition("0", "a", "2")
            .transition("0", "b", "12")
            .build();
        let dfa = subset_construction(&nfa).unwrap();

        assert_eq!(dfa.states(), ["{0}", "{1,2}", "{12}"]);
        assert!(dfa.validate());
        // "1" is final; "12" merely contains the character.
        assert!(dfa.is_final("{1,2}"));
        assert!(!dfa.is_final("{12}"));
    }

    #[test]
    fn test_empty_token_is_an_ordinary_symbol() {
        let nfa = Automaton::builder()
            .states(["0", "1"])
            .alphabet(["emp", "a"])
            .start("0")
            .final_state("1")
            .transition("0", "emp", "1")
            .build();
        let dfa = subset_construction(&nfa).unwrap();

        assert!(dfa.accepts(&["emp"]));
        assert!(!dfa.accepts::<&str>(&[]));
    }

    #[test]
    fn test_final_start_state() {
        let nfa = Automaton::builder()
            .state("only")
            .symbol("a")
            .start("only")
            .final_state("only")
            .build();
        let dfa = subset_construction(&nfa).unwrap();

        assert_eq!(dfa.states(), ["{only}"]);
        assert!(dfa.is_final("{only}"));
        assert_eq!(dfa.transition_count(), 0);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let nfa = Automaton::builder()
            .state("A")
            .symbol("a")
            .start("A")
            .transition("A", "a", "Z")
            .build();
        assert!(matches!(
            subset_construction(&nfa),
            Err(Error::Structural(ValidityError::UnknownTransitionState(s))) if s == "Z"
        ));
    }

    #[test]
    fn test_determinize_members() {
        let nfa = Nfa::from_automaton(&scenario()).unwrap();
        let (dfa, meta_states) = determinize(&nfa);

        let members: Vec<Vec<StateId>> = meta_states.iter().map(StateSet::to_vec).collect();
        assert_eq!(members, vec![vec![0], vec![0, 1], vec![2]]);
        assert_eq!(dfa.final_states().to_vec(), vec![2]);
    }
}
