//! End-to-end checks of the NFA -> DFA -> minimal DFA pipeline.

use automin::{
    Automaton, Error, ValidityError, determinize_and_minimize, minimize, subset_construction,
    text,
};
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

fn fixture(name: &str) -> Automaton {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    text::read_file(path).unwrap()
}

/// Every word over `alphabet` of length at most `max_len`.
fn words(alphabet: &[String], max_len: usize) -> Vec<Vec<String>> {
    let mut all = vec![Vec::new()];
    let mut frontier: Vec<Vec<String>> = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &frontier {
            for symbol in alphabet {
                let mut longer = word.clone();
                longer.push(symbol.clone());
                next.push(longer);
            }
        }
        all.extend(next.iter().cloned());
        frontier = next;
    }
    all
}

fn all_reachable(automaton: &Automaton) -> bool {
    let mut seen = HashSet::from([automaton.start()]);
    let mut queue = VecDeque::from([automaton.start()]);
    while let Some(state) = queue.pop_front() {
        if let Some(by_symbol) = automaton.transitions_from(state) {
            for dest in by_symbol.values().flatten() {
                if seen.insert(dest.as_str()) {
                    queue.push_back(dest.as_str());
                }
            }
        }
    }
    automaton.states().iter().all(|s| seen.contains(s.as_str()))
}

#[test]
fn scenario_from_file() {
    let nfa = fixture("graph1.txt");
    assert!(nfa.validate());

    let pipeline = determinize_and_minimize(&nfa).unwrap();
    let dfa = &pipeline.dfa;
    assert_eq!(dfa.states(), ["{A}", "{A,B}", "{C}"]);
    assert_eq!(dfa.start(), "{A}");
    assert!(dfa.is_deterministic());
    assert_eq!(dfa.transition_count(), 3);

    let accepted: [&[&str]; 3] = [&["a", "b"], &["a", "a", "b"], &["a", "a", "a", "b"]];
    for word in accepted {
        assert!(dfa.accepts(word), "{word:?}");
    }
    let rejected: [&[&str]; 5] = [&[], &["b"], &["a"], &["a", "b", "b"], &["a", "b", "a", "b"]];
    for word in rejected {
        assert!(!dfa.accepts(word), "{word:?}");
    }

    let minimized = &pipeline.minimized;
    assert_eq!(minimized.states().len(), 3);
    assert_eq!(minimized.states(), ["{{A}}", r"{{A\,B}}", "{{C}}"]);
}

#[test]
fn numeric_labels_do_not_collide() {
    let nfa = fixture("numeric.txt");
    let dfa = subset_construction(&nfa).unwrap();

    assert!(dfa.validate());
    let unique: HashSet<&String> = dfa.states().iter().collect();
    assert_eq!(unique.len(), dfa.states().len());
    assert!(dfa.states().iter().any(|s| s == "{1,2}"));
    assert!(dfa.states().iter().any(|s| s == "{12}"));
    assert!(dfa.is_final("{1,2}"));
    assert!(!dfa.is_final("{12}"));

    let minimized = minimize(&dfa).unwrap();
    for word in words(nfa.alphabet(), 5) {
        assert_eq!(nfa.accepts(&word), minimized.accepts(&word), "{word:?}");
    }
}

#[test]
fn minimize_merges_redundant_dfa_states() {
    // `x` and `y` both lead to an accepting sink; the two sinks are equivalent.
    let nfa = Automaton::builder()
        .states(["s", "f1", "f2"])
        .alphabet(["x", "y"])
        .start("s")
        .final_states(["f1", "f2"])
        .transition("s", "x", "f1")
        .transition("s", "y", "f2")
        .transition("f1", "x", "f1")
        .transition("f2", "x", "f2")
        .build();

    let pipeline = determinize_and_minimize(&nfa).unwrap();
    assert_eq!(pipeline.dfa.states().len(), 3);
    assert_eq!(pipeline.minimized.states(), ["{{s}}", r"{{f1},{f2}}"]);
    assert!(pipeline.minimized.accepts(&["y", "x", "x"]));
}

#[test]
fn invalid_input_aborts_pipeline() {
    let nfa = Automaton::builder()
        .states(["A", "B"])
        .symbol("a")
        .start("C")
        .build();
    assert!(matches!(
        determinize_and_minimize(&nfa),
        Err(Error::Structural(ValidityError::UnknownStart(s))) if s == "C"
    ));
}

#[derive(Debug, Clone)]
struct RandomNfa {
    num_states: usize,
    num_symbols: usize,
    finals: Vec<bool>,
    edges: Vec<(usize, usize, usize)>,
}

impl RandomNfa {
    fn build(&self) -> Automaton {
        // Plain numbers as labels, so the set encoding has to keep
        // {1,2} and {12} apart.
        let name = |i: usize| i.to_string();
        let symbol = |j: usize| format!("s{j}");

        let mut builder = Automaton::builder()
            .states((0..self.num_states).map(name))
            .alphabet((0..self.num_symbols).map(symbol))
            .start(name(0));
        for (i, &is_final) in self.finals.iter().enumerate() {
            if is_final {
                builder = builder.final_state(name(i));
            }
        }
        for &(src, sym, dst) in &self.edges {
            builder = builder.transition(
                name(src % self.num_states),
                symbol(sym % self.num_symbols),
                name(dst % self.num_states),
            );
        }
        builder.build()
    }
}

fn random_nfa() -> impl Strategy<Value = RandomNfa> {
    (1usize..14, 1usize..4).prop_flat_map(|(num_states, num_symbols)| {
        (
            prop::collection::vec(any::<bool>(), num_states),
            prop::collection::vec((0..num_states, 0..num_symbols, 0..num_states), 0..30),
        )
            .prop_map(move |(finals, edges)| RandomNfa {
                num_states,
                num_symbols,
                finals,
                edges,
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn pipeline_preserves_language(random in random_nfa()) {
        let nfa = random.build();
        prop_assert!(nfa.validate());

        let pipeline = determinize_and_minimize(&nfa).unwrap();
        for word in words(nfa.alphabet(), 5) {
            let expected = nfa.accepts(&word);
            prop_assert_eq!(pipeline.dfa.accepts(&word), expected, "dfa on {:?}", word);
            prop_assert_eq!(pipeline.minimized.accepts(&word), expected, "min on {:?}", word);
        }
    }

    #[test]
    fn construction_is_deterministic_and_reachable(random in random_nfa()) {
        let nfa = random.build();
        let pipeline = determinize_and_minimize(&nfa).unwrap();

        prop_assert!(pipeline.dfa.validate());
        prop_assert!(pipeline.dfa.is_deterministic());
        prop_assert!(pipeline.minimized.validate());
        prop_assert!(pipeline.minimized.is_deterministic());
        prop_assert!(all_reachable(&pipeline.dfa));
        prop_assert!(all_reachable(&pipeline.minimized));
    }

    #[test]
    fn minimization_never_expands_and_is_idempotent(random in random_nfa()) {
        let nfa = random.build();
        let pipeline = determinize_and_minimize(&nfa).unwrap();
        prop_assert!(pipeline.minimized.states().len() <= pipeline.dfa.states().len());

        let again = minimize(&pipeline.minimized).unwrap();
        prop_assert_eq!(again.states().len(), pipeline.minimized.states().len());
        prop_assert_eq!(again.transition_count(), pipeline.minimized.transition_count());
    }

    #[test]
    fn runs_are_reproducible(random in random_nfa()) {
        let nfa = random.build();
        let first = determinize_and_minimize(&nfa).unwrap();
        let second = determinize_and_minimize(&nfa).unwrap();
        prop_assert_eq!(first.dfa, second.dfa);
        prop_assert_eq!(first.minimized, second.minimized);
    }
}
