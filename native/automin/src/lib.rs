//! NFA to DFA conversion and DFA minimization.
//!
//! The pipeline reads a nondeterministic automaton, determinizes it with the
//! powerset construction and minimizes the result by partition refinement:
//!
//! ```
//! use automin::{Automaton, determinize_and_minimize};
//!
//! let nfa = Automaton::builder()
//!     .states(["A", "B", "C"])
//!     .alphabet(["a", "b"])
//!     .start("A")
//!     .final_state("C")
//!     .transition("A", "a", "A")
//!     .transition("A", "a", "B")
//!     .transition("B", "b", "C")
//!     .build();
//!
//! let pipeline = determinize_and_minimize(&nfa).unwrap();
//! assert_eq!(pipeline.dfa.states(), ["{A}", "{A,B}", "{C}"]);
//! assert_eq!(pipeline.minimized.states().len(), 3);
//! ```

pub mod automaton;
pub mod error;
#[cfg(feature = "python")]
pub mod python;
pub mod text;

pub use automaton::{Automaton, AutomatonBuilder, minimize, subset_construction};
pub use error::{Error, Result, ValidityError};

/// The output of every stage of the pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub dfa: Automaton,
    pub minimized: Automaton,
}

/// Determinize `nfa`, then minimize the result.
///
/// Both stages run behind the validity gate; the first failure aborts the
/// pipeline and nothing partial is returned.
pub fn determinize_and_minimize(nfa: &Automaton) -> Result<Pipeline> {
    let dfa = subset_construction(nfa)?;
    let minimized = minimize(&dfa)?;
    Ok(Pipeline { dfa, minimized })
}
