//! Symbol types for automata transitions.

/// A symbol identifier: the position of a symbol in its automaton's alphabet.
pub type SymbolId = u32;

/// The reserved token the text format uses for an empty transition.
///
/// It is carried through both algorithms as an ordinary alphabet symbol;
/// no epsilon closure is computed for it.
pub const EMPTY_TOKEN: &str = "emp";

/// Check if a label is the reserved empty-transition token.
#[inline]
pub fn is_empty_token(label: &str) -> bool {
    label == EMPTY_TOKEN
}

/// Check if a label may appear as a state or symbol token in the text format.
pub fn is_valid_token(label: &str) -> bool {
    is_empty_token(label)
        || (!label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric()))
}
