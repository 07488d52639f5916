//! DFA minimization by iterative (Moore-style) partition refinement.
//!
//! Each round recomputes every state's signature against the previous
//! round's block assignment and regroups states by signature. The partition
//! only ever gets finer, so the loop stops at the first round that splits no
//! block, after at most one round per state.

use crate::automaton::dfa::Dfa;
use crate::automaton::label::encode_set;
use crate::automaton::model::Automaton;
use crate::automaton::state::StateId;
use crate::automaton::symbol::SymbolId;
use crate::error::Result;
use indexmap::IndexMap;
use std::hash::Hash;
use tracing::{debug, trace};

/// Block index within one partition.
pub type BlockId = usize;

/// A stable partition of the reachable states of a DFA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Blocks in first-seen order; members ascending
    pub blocks: Vec<Vec<StateId>>,
    /// Number of refinement rounds run, including the final stable one
    pub rounds: usize,
}

/// Minimize a DFA, merging behaviourally indistinguishable states.
///
/// Unreachable states are dropped. Every minimized state is labelled with
/// the set of original states it stands for.
pub fn minimize(dfa: &Automaton) -> Result<Automaton> {
    dfa.check_deterministic()?;
    let indexed = Dfa::from_automaton(dfa)?;
    let partition = refine(&indexed);

    debug!(
        dfa_states = indexed.num_states(),
        blocks = partition.blocks.len(),
        rounds = partition.rounds,
        "partition refinement finished"
    );

    let labels: Vec<String> = partition
        .blocks
        .iter()
        .map(|block| encode_set(block.iter().map(|&s| dfa.states()[s as usize].as_str())))
        .collect();

    quotient(&indexed, &partition).to_automaton(&labels, dfa.alphabet())
}

/// Group `states` by `key`, numbering groups in first-seen order.
fn group_by<K: Hash + Eq>(
    states: &[StateId],
    mut key: impl FnMut(StateId) -> K,
) -> IndexMap<K, Vec<StateId>> {
    let mut groups: IndexMap<K, Vec<StateId>> = IndexMap::new();
    for &state in states {
        groups.entry(key(state)).or_default().push(state);
    }
    groups
}

/// Compute the coarsest stable partition of the states reachable in `dfa`.
pub fn refine(dfa: &Dfa) -> Partition {
    let mut states = dfa.find_reachable_states();
    states.sort_unstable();

    // block_of[state] is only meaningful for reachable states
    let mut block_of: Vec<BlockId> = vec![0; dfa.num_states()];
    let mut blocks: Vec<Vec<StateId>> = group_by(&states, |s| dfa.is_final(s))
        .into_values()
        .collect();
    assign(&mut block_of, &blocks);

    let mut rounds = 0;
    loop {
        rounds += 1;
        let previous = &block_of;
        let signature = |state: StateId| -> (BlockId, Vec<Option<BlockId>>) {
            let targets = (0..dfa.num_symbols() as SymbolId)
                .map(|sym| dfa.transition(state, sym).map(|t| previous[t as usize]))
                .collect();
            (previous[state as usize], targets)
        };
        let refined: Vec<Vec<StateId>> = group_by(&states, signature).into_values().collect();
        trace!(round = rounds, blocks = refined.len(), "refinement round");

        if refined.len() == blocks.len() {
            break;
        }

        let mut next_block_of = vec![0; dfa.num_states()];
        assign(&mut next_block_of, &refined);
        block_of = next_block_of;
        blocks = refined;
    }

    Partition { blocks, rounds }
}

fn assign(block_of: &mut [BlockId], blocks: &[Vec<StateId>]) {
    for (id, block) in blocks.iter().enumerate() {
        for &state in block {
            block_of[state as usize] = id;
        }
    }
}

/// Build the DFA whose states are the blocks of `partition`.
fn quotient(dfa: &Dfa, partition: &Partition) -> Dfa {
    let mut block_of: Vec<Option<BlockId>> = vec![None; dfa.num_states()];
    for (id, block) in partition.blocks.iter().enumerate() {
        for &state in block {
            block_of[state as usize] = Some(id);
        }
    }

    let mut minimized = Dfa::new(dfa.num_symbols());
    for _ in &partition.blocks {
        minimized.add_state();
    }
    if let Some(start) = block_of[dfa.start_state() as usize] {
        minimized.set_start_state(start as StateId);
    }

    for (id, block) in partition.blocks.iter().enumerate() {
        // Blocks are homogeneous, so any member speaks for the whole block.
        let Some(&representative) = block.first() else {
            continue;
        };
        if dfa.is_final(representative) {
            minimized.add_final_state(id as StateId);
        }
        for symbol in 0..dfa.num_symbols() as SymbolId {
            let target = dfa
                .transition(representative, symbol)
                .and_then(|dest| block_of[dest as usize]);
            if let Some(target) = target {
                minimized.add_transition(id as StateId, symbol, target as StateId);
            }
        }
    }

    minimized
}
