//! Freeze-time validation errors.

use crate::core::{LetterId, StateId};
use thiserror::Error;

/// A single violated automaton invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("start state not specified. Call .set_start_state(state) before .freeze()")]
    MissingStartState,

    #[error("start state {start} is out of range (automaton has {num_states} states)")]
    StartStateOutOfRange { start: StateId, num_states: u64 },

    #[error("termination not specified. Call .set_termination(spec) before .freeze()")]
    MissingTermination,

    #[error("termination lists state {state}, automaton has {num_states} states")]
    TerminationOutOfRange { state: StateId, num_states: u64 },

    #[error("states must be all named or all unnamed ({named} named, {unnamed} unnamed)")]
    MixedStateNaming { named: u64, unnamed: u64 },

    #[error("name table has {names} entries for {num_states} states")]
    NameTableMismatch { names: u64, num_states: u64 },

    #[error("transition table has {functions} entries for {num_states} states")]
    TransitionTableMismatch { functions: u64, num_states: u64 },

    #[error("transition source state {state} does not exist (automaton has {num_states} states)")]
    UnknownSourceState { state: StateId, num_states: u64 },

    #[error("state {state} has a transition on letter {letter}, which is outside the alphabet")]
    LetterOutsideAlphabet { state: StateId, letter: LetterId },

    #[error("state {state} has a transition on letter {letter}, which does not fit in {width} byte(s)")]
    UnencodableLetter {
        state: StateId,
        letter: LetterId,
        width: usize,
    },

    #[error("transition {state} --{letter}--> {to} targets a state that does not exist (automaton has {num_states} states)")]
    UnknownDestination {
        state: StateId,
        letter: LetterId,
        to: StateId,
        num_states: u64,
    },

    #[error("state {state} falls back to missing state {target} (automaton has {num_states} states)")]
    UnknownGotoTarget {
        state: StateId,
        target: StateId,
        num_states: u64,
    },

    #[error("state {state} has conflicting transitions on letter {letter}: {first} and {second}")]
    ConflictingTransition {
        state: StateId,
        letter: LetterId,
        first: StateId,
        second: StateId,
    },
}

/// Every invariant violation found while freezing an automaton.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("automaton failed validation with {} violation(s): {}", .violations.len(), join(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn contains(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().any(predicate)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
