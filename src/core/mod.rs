//! Core automaton components.
//!
//! This module contains the pure data model of a DFA:
//! - Alphabets that encode and decode letters
//! - The state space and optional state names
//! - Termination (accept/reject) classification
//! - Transition functions with fallback policies
//!
//! Nothing in this module performs I/O or holds mutable shared state.

mod alphabet;
mod error;
mod state;
mod termination;
mod transition;

pub use alphabet::{Alphabet, AlphabetKind, AlphabetSpec, BoundedKind, Letter, LetterId};
pub use error::{AlphabetError, LetterRef, StateError, UnknownTag};
pub use state::{StateId, StateNames, StateNaming, StateSpace};
pub use termination::{Classification, Polarity, TerminationSpec};
pub use transition::{PolicyKind, Resolution, TransitionFunction, TransitionTable, UnknownPolicy};
