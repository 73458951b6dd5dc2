//! Encoding automata to the binary format.

use super::varint;
use crate::automaton::Automaton;
use crate::core::{AlphabetSpec, StateNaming, UnknownPolicy};

/// Encode an automaton.
///
/// # Binary Layout
/// | Section | Encoding |
/// |---------|----------|
/// | Alphabet tag | 1 byte |
/// | Alphabet params | bounded: varint min, varint max; fixed: varint width, varint count, raw letters; variable: varint count, length-prefixed letters |
/// | Naming tag | 1 byte |
/// | numStates, startState | varints |
/// | Name table | named only: per state, varint count of length-prefixed names |
/// | Termination | tag byte, varint count, state-id varints |
/// | Transitions | per state: varint count, `(letter, target)` varint pairs, fallback tag (+ varint target for Goto) |
pub(super) fn encode(automaton: &Automaton) -> Vec<u8> {
    let mut out = Vec::new();

    let alphabet = automaton.alphabet();
    out.push(alphabet.kind().tag());
    match alphabet.spec() {
        AlphabetSpec::Bounded { min, max, .. } => {
            varint::encode(*min, &mut out);
            varint::encode(*max, &mut out);
        }
        AlphabetSpec::CustomFixed { width, table } => {
            varint::encode(*width as u64, &mut out);
            varint::encode(table.len() as u64, &mut out);
            for letter in table {
                out.extend_from_slice(letter);
            }
        }
        AlphabetSpec::CustomVariable { table } => {
            varint::encode(table.len() as u64, &mut out);
            for letter in table {
                put_bytes(letter, &mut out);
            }
        }
    }

    let states = automaton.states();
    out.push(states.naming().tag());
    varint::encode(states.len(), &mut out);
    varint::encode(states.start(), &mut out);
    if let Some(names) = states.name_table() {
        debug_assert_eq!(states.naming(), StateNaming::Named);
        for state_names in names {
            varint::encode(state_names.len() as u64, &mut out);
            for name in state_names {
                put_bytes(name, &mut out);
            }
        }
    }

    let termination = automaton.termination();
    out.push(termination.polarity().tag());
    varint::encode(termination.listed().len() as u64, &mut out);
    for &state in termination.listed() {
        varint::encode(state, &mut out);
    }

    for (_, function) in automaton.transitions().iter() {
        varint::encode(function.explicit().len() as u64, &mut out);
        for (&letter, &to) in function.explicit() {
            varint::encode(letter, &mut out);
            varint::encode(to, &mut out);
        }
        let fallback = function.fallback();
        out.push(fallback.tag());
        if let UnknownPolicy::Goto { target } = fallback {
            varint::encode(target, &mut out);
        }
    }

    tracing::trace!(bytes = out.len(), states = states.len(), "encoded automaton");
    out
}

fn put_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    varint::encode(bytes.len() as u64, out);
    out.extend_from_slice(bytes);
}
