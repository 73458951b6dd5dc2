//! Error types for binary and JSON encoding/decoding.

use crate::builder::ValidationError;
use crate::core::{AlphabetError, LetterId, StateId, UnknownTag};
use std::io;
use thiserror::Error;

/// Why a byte sequence is not a valid automaton.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorruptReason {
    #[error("unexpected end of input: need {needed} byte(s), have {available}")]
    UnexpectedEnd { needed: u64, available: usize },

    #[error("varint does not fit in 64 bits")]
    VarintOverflow,

    #[error("varint is not in minimal form")]
    OverlongVarint,

    #[error(transparent)]
    UnknownTag(#[from] UnknownTag),

    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(#[from] AlphabetError),

    #[error("start state {start} is out of range (automaton has {num_states} states)")]
    StartOutOfRange { start: StateId, num_states: u64 },

    #[error("state {state} is out of range (automaton has {num_states} states)")]
    StateOutOfRange { state: StateId, num_states: u64 },

    #[error("letter {letter} is outside the alphabet")]
    LetterOutsideAlphabet { letter: LetterId },

    #[error("state {state} is listed twice in the termination list")]
    DuplicateTermination { state: StateId },

    #[error("termination list has {count} entries for {num_states} states")]
    TerminationListTooLong { count: u64, num_states: u64 },

    #[error("letter {letter} has two transitions from the same state")]
    DuplicateTransition { letter: LetterId },

    #[error("{count} trailing byte(s) after the automaton")]
    TrailingBytes { count: usize },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors that can occur while encoding or decoding automata.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("corrupt automaton at byte {offset}: {reason}")]
    CorruptFormat { offset: usize, reason: CorruptReason },

    #[error("{what} of {value} at byte {offset} exceeds the decode limit of {limit}")]
    LimitExceeded {
        offset: usize,
        what: &'static str,
        value: u64,
        limit: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Byte offset of a binary decode failure.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::CorruptFormat { offset, .. } | Self::LimitExceeded { offset, .. } => {
                Some(*offset)
            }
            Self::Io(_) | Self::Json(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&CorruptReason> {
        match self {
            Self::CorruptFormat { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
