//! Decoding automata from the binary format.
//!
//! Every cross-reference is checked at the byte where it is read, so a
//! failure names the offending offset. Declared counts are checked against
//! [`DecodeLimits`] and the remaining input before anything is allocated.

use super::error::{CodecError, CorruptReason};
use super::limits::DecodeLimits;
use super::varint::{self, VarintError};
use crate::automaton::Automaton;
use crate::core::{
    Alphabet, AlphabetError, AlphabetKind, AlphabetSpec, PolicyKind, Polarity, StateId,
    StateNames, StateNaming, StateSpace, TerminationSpec, TransitionFunction, UnknownPolicy,
};
use std::collections::{BTreeMap, BTreeSet};

pub(super) fn decode(bytes: &[u8], limits: &DecodeLimits) -> Result<Automaton, CodecError> {
    let mut reader = Reader::new(bytes, limits);

    let alphabet = reader.alphabet()?;
    tracing::trace!(offset = reader.offset, kind = ?alphabet.kind(), "decoded alphabet");

    let (states, num_states) = reader.state_space()?;
    tracing::trace!(offset = reader.offset, states = num_states, "decoded state space");

    let termination = reader.termination(num_states)?;

    let functions = (0..num_states)
        .map(|_| reader.transition_function(&alphabet, num_states))
        .collect::<Result<Vec<_>, _>>()?;

    if reader.remaining() > 0 {
        return Err(reader.corrupt(
            reader.offset,
            CorruptReason::TrailingBytes {
                count: reader.remaining(),
            },
        ));
    }

    Automaton::assemble(alphabet, states, termination, functions)
        .map_err(|error| reader.corrupt(bytes.len(), CorruptReason::Invalid(error)))
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
    limits: &'a DecodeLimits,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8], limits: &'a DecodeLimits) -> Self {
        Self {
            bytes,
            offset: 0,
            limits,
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn corrupt(&self, offset: usize, reason: CorruptReason) -> CodecError {
        tracing::debug!(offset, %reason, "rejected corrupt automaton encoding");
        CodecError::CorruptFormat { offset, reason }
    }

    fn byte(&mut self) -> Result<u8, CodecError> {
        let byte = *self.bytes.get(self.offset).ok_or_else(|| {
            self.corrupt(
                self.offset,
                CorruptReason::UnexpectedEnd {
                    needed: 1,
                    available: 0,
                },
            )
        })?;
        self.offset += 1;
        Ok(byte)
    }

    fn take(&mut self, len: u64) -> Result<&'a [u8], CodecError> {
        let available = self.remaining();
        let len = usize::try_from(len)
            .ok()
            .filter(|len| *len <= available)
            .ok_or_else(|| {
                self.corrupt(
                    self.offset,
                    CorruptReason::UnexpectedEnd {
                        needed: len,
                        available,
                    },
                )
            })?;
        let bytes = self.bytes;
        let slice = &bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn varint(&mut self) -> Result<u64, CodecError> {
        match varint::decode(&self.bytes[self.offset..]) {
            Ok((value, used)) => {
                self.offset += used;
                Ok(value)
            }
            Err(error) => {
                let reason = match error {
                    VarintError::Truncated => CorruptReason::UnexpectedEnd {
                        needed: 1,
                        available: 0,
                    },
                    VarintError::Overflow => CorruptReason::VarintOverflow,
                    VarintError::Overlong => CorruptReason::OverlongVarint,
                };
                Err(self.corrupt(self.offset, reason))
            }
        }
    }

    /// Read a count and check it against `limit`.
    fn count(&mut self, what: &'static str, limit: u64) -> Result<u64, CodecError> {
        let offset = self.offset;
        let value = self.varint()?;
        if value > limit {
            tracing::debug!(offset, what, value, limit, "decode limit exceeded");
            return Err(CodecError::LimitExceeded {
                offset,
                what,
                value,
                limit,
            });
        }
        Ok(value)
    }

    /// Capacity to reserve for `count` items of at least `min_size` bytes each.
    fn capacity(&self, count: u64, min_size: usize) -> usize {
        let fits = self.remaining() / min_size.max(1);
        usize::try_from(count).map_or(fits, |count| count.min(fits))
    }

    fn state_id(&mut self, num_states: u64) -> Result<StateId, CodecError> {
        let offset = self.offset;
        let state = self.varint()?;
        if state >= num_states {
            return Err(self.corrupt(offset, CorruptReason::StateOutOfRange { state, num_states }));
        }
        Ok(state)
    }

    fn length_prefixed(&mut self, what: &'static str, limit: u64) -> Result<Vec<u8>, CodecError> {
        let len = self.count(what, limit)?;
        self.take(len).map(<[u8]>::to_vec)
    }

    fn alphabet(&mut self) -> Result<Alphabet, CodecError> {
        let section = self.offset;
        let kind = AlphabetKind::from_tag(self.byte()?)
            .map_err(|tag| self.corrupt(section, tag.into()))?;

        let spec = match kind.bounded() {
            Some(bounded) => {
                let min = self.varint()?;
                let max = self.varint()?;
                AlphabetSpec::Bounded {
                    kind: bounded,
                    min,
                    max,
                }
            }
            None if kind == AlphabetKind::Fixed => {
                let width_offset = self.offset;
                let width = self.count("letter width", self.limits.max_letter_width)?;
                if width == 0 {
                    return Err(self.corrupt(width_offset, AlphabetError::ZeroWidth.into()));
                }
                let count = self.count("alphabet size", self.limits.max_alphabet_entries)?;
                let width_bytes = usize::try_from(width).unwrap_or(usize::MAX);
                let mut table = Vec::with_capacity(self.capacity(count, width_bytes));
                for _ in 0..count {
                    table.push(self.take(width)?.to_vec());
                }
                AlphabetSpec::CustomFixed {
                    width: width_bytes,
                    table,
                }
            }
            None => {
                let count = self.count("alphabet size", self.limits.max_alphabet_entries)?;
                let mut table = Vec::with_capacity(self.capacity(count, 2));
                for _ in 0..count {
                    table.push(self.length_prefixed("letter width", self.limits.max_letter_width)?);
                }
                AlphabetSpec::CustomVariable { table }
            }
        };

        Alphabet::new(spec).map_err(|error| self.corrupt(section, error.into()))
    }

    fn state_space(&mut self) -> Result<(StateSpace, u64), CodecError> {
        let tag_offset = self.offset;
        let naming = StateNaming::from_tag(self.byte()?)
            .map_err(|tag| self.corrupt(tag_offset, tag.into()))?;

        let num_states = self.count("state count", self.limits.max_states)?;
        let start_offset = self.offset;
        let start = self.varint()?;
        if start >= num_states {
            return Err(self.corrupt(
                start_offset,
                CorruptReason::StartOutOfRange { start, num_states },
            ));
        }

        let names = match naming {
            StateNaming::Unnamed => None,
            StateNaming::Named => {
                let mut table: Vec<StateNames> = Vec::with_capacity(self.capacity(num_states, 1));
                for _ in 0..num_states {
                    let count = self.count("names per state", self.limits.max_names_per_state)?;
                    let mut names = Vec::with_capacity(self.capacity(count, 1));
                    for _ in 0..count {
                        names.push(self.length_prefixed("name length", self.limits.max_name_len)?);
                    }
                    table.push(names);
                }
                Some(table)
            }
        };

        Ok((StateSpace::new(num_states, start, names), num_states))
    }

    fn termination(&mut self, num_states: u64) -> Result<TerminationSpec, CodecError> {
        let tag_offset = self.offset;
        let polarity = Polarity::from_tag(self.byte()?)
            .map_err(|tag| self.corrupt(tag_offset, tag.into()))?;

        let count_offset = self.offset;
        let count = self.varint()?;
        if count > num_states {
            return Err(self.corrupt(
                count_offset,
                CorruptReason::TerminationListTooLong { count, num_states },
            ));
        }

        let mut listed = BTreeSet::new();
        for _ in 0..count {
            let offset = self.offset;
            let state = self.state_id(num_states)?;
            if !listed.insert(state) {
                return Err(self.corrupt(offset, CorruptReason::DuplicateTermination { state }));
            }
        }

        Ok(TerminationSpec::new(polarity, listed))
    }

    fn transition_function(
        &mut self,
        alphabet: &Alphabet,
        num_states: u64,
    ) -> Result<TransitionFunction, CodecError> {
        let count = self.count("transition count", self.limits.max_transitions_per_state)?;

        let mut explicit = BTreeMap::new();
        for _ in 0..count {
            let offset = self.offset;
            let letter = self.varint()?;
            if !alphabet.contains(letter) {
                return Err(self.corrupt(offset, CorruptReason::LetterOutsideAlphabet { letter }));
            }
            let to = self.state_id(num_states)?;
            if explicit.insert(letter, to).is_some() {
                return Err(self.corrupt(offset, CorruptReason::DuplicateTransition { letter }));
            }
        }

        let tag_offset = self.offset;
        let policy = PolicyKind::from_tag(self.byte()?)
            .map_err(|tag| self.corrupt(tag_offset, tag.into()))?;
        let fallback = match policy {
            PolicyKind::Reject => UnknownPolicy::Reject,
            PolicyKind::Accept => UnknownPolicy::Accept,
            PolicyKind::Goto => UnknownPolicy::Goto {
                target: self.state_id(num_states)?,
            },
        };

        Ok(TransitionFunction::new(explicit, fallback))
    }
}
