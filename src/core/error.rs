//! Error types shared by the core automaton components.

use std::fmt;
use thiserror::Error;

/// A tag byte that does not name any member of a closed enumeration.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unrecognized {kind} tag 0x{tag:02x}")]
pub struct UnknownTag {
    /// Which enumeration was being decoded ("alphabet", "state naming", ...)
    pub kind: &'static str,
    pub tag: u8,
}

/// Identifies a letter that could not be found, either by id or by bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterRef {
    Id(u64),
    Raw(Vec<u8>),
}

impl fmt::Display for LetterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Raw(raw) => write!(f, "bytes {raw:02x?}"),
        }
    }
}

/// Errors raised while constructing an alphabet or encoding/decoding letters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("letter {id} is outside the alphabet range [{min}, {max}]")]
    OutOfRange { id: u64, min: u64, max: u64 },

    #[error("letter {id} does not fit in {width} byte(s)")]
    Overflow { id: u64, width: usize },

    #[error("unknown letter ({0})")]
    UnknownLetter(LetterRef),

    #[error("malformed letter encoding: {0}")]
    MalformedEncoding(String),

    #[error("bounded alphabet has min {min} greater than max {max}")]
    InvertedRange { min: u64, max: u64 },

    #[error("fixed-width alphabet must have a non-zero letter width")]
    ZeroWidth,

    #[error("letter {index} is {found} byte(s) wide, alphabet width is {expected}")]
    WidthMismatch {
        index: u64,
        expected: usize,
        found: usize,
    },

    #[error("variable-width letter {index} has an empty encoding")]
    EmptyLetter { index: u64 },

    #[error("letters {first} and {second} share the same encoding")]
    DuplicateLetter { first: u64, second: u64 },

    #[error("letter {prefix} is a prefix of letter {letter}, encodings are not self-delimiting")]
    PrefixConflict { prefix: u64, letter: u64 },
}

/// A state id outside `[0, num_states)`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("state {state} does not exist (automaton has {num_states} states)")]
    InvalidState { state: u64, num_states: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_formats_as_hex() {
        let err = UnknownTag {
            kind: "alphabet",
            tag: 0x0b,
        };
        assert_eq!(err.to_string(), "unrecognized alphabet tag 0x0b");
    }

    #[test]
    fn letter_ref_display_distinguishes_ids_and_bytes() {
        assert_eq!(LetterRef::Id(7).to_string(), "id 7");
        assert_eq!(LetterRef::Raw(vec![0xab, 0x01]).to_string(), "bytes [ab, 01]");
    }
}
