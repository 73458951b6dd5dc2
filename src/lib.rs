//! dfa-interchange: deterministic finite automata with pluggable alphabets
//! and an exact binary interchange format.
//!
//! An automaton is assembled with a builder, validated once when frozen,
//! and is immutable afterwards. Invalid automata are unrepresentable: every
//! start state, termination entry and transition target names a real
//! state, and every transition letter belongs to the alphabet.
//!
//! # Core Concepts
//!
//! - **Alphabet**: Bounded numeric domains (ASCII, UTF-8/16/32, UInt8..64)
//!   or custom tables of fixed- or variable-width letter encodings
//! - **Termination**: An accept list or a reject list deciding each state
//! - **Fallback**: What a state does with a letter it has no transition for
//! - **Codec**: Lossless binary encoding, hardened against untrusted input
//!
//! # Example
//!
//! ```rust
//! use dfa_interchange::builder::AutomatonBuilder;
//! use dfa_interchange::codec;
//! use dfa_interchange::core::{Alphabet, BoundedKind, Classification, TerminationSpec};
//!
//! let mut builder = AutomatonBuilder::new(Alphabet::full(BoundedKind::UInt8));
//! let start = builder.add_state();
//! let accept = builder.add_state();
//! builder
//!     .set_start_state(start)
//!     .add_transition(start, 65, accept)
//!     .set_termination(TerminationSpec::accepting([accept]));
//! let automaton = builder.freeze().unwrap();
//!
//! assert_eq!(automaton.run([[65u8]]).unwrap(), Classification::Accept);
//! assert_eq!(automaton.run([[66u8]]).unwrap(), Classification::Reject);
//!
//! let bytes = codec::encode(&automaton);
//! let decoded = codec::decode(&bytes).unwrap();
//! assert_eq!(decoded, automaton);
//! ```

pub mod automaton;
pub mod builder;
pub mod codec;
pub mod core;

// Re-export commonly used types
pub use automaton::{Automaton, RunError, RunTrace};
pub use builder::{AutomatonBuilder, ValidationError, Violation};
pub use codec::{CodecError, DecodeLimits};
pub use core::{Alphabet, AlphabetError, BoundedKind, Classification, TerminationSpec, UnknownPolicy};
