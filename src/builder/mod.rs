//! Builder API for assembling automata.
//!
//! An automaton is built incrementally (letters, states, start state,
//! transitions, termination, fallback policies) and then frozen. Freezing
//! validates every invariant and reports all violations together.

pub mod error;
pub mod machine;
pub(crate) mod validate;

pub use error::{ValidationError, Violation};
pub use machine::AutomatonBuilder;
