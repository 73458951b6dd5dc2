//! Frozen automata and execution.
//!
//! An [`Automaton`] is produced by freezing an
//! [`AutomatonBuilder`](crate::builder::AutomatonBuilder) or by decoding the
//! binary format. It is immutable: runs borrow it, never mutate it, and
//! any number of threads may run it at once.
//!
//! Every run is bounded by its input: each letter triggers exactly one
//! resolution, and `Goto` fallbacks never chain without consuming input.

mod machine;
mod trace;

pub use machine::{Automaton, RunError};
pub use trace::RunTrace;
