//! Alphabets: how letter ids map to and from their byte representations.
//!
//! Three families are supported:
//! - **Bounded** numeric domains (ASCII, UTF code units, unsigned integers),
//!   encoded big-endian at the width of the kind
//! - **Custom fixed** tables where every letter has the same byte width
//! - **Custom variable** tables of self-delimiting (prefix-free) encodings
//!
//! For bounded alphabets a letter's id *is* its numeric value. For custom
//! tables the id is the letter's index in the table.

use super::error::{AlphabetError, LetterRef, UnknownTag};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a letter within its alphabet.
pub type LetterId = u64;

/// Alphabet identifiers, in the order of their binary tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlphabetKind {
    Ascii,
    Utf8,
    Utf16,
    Utf32,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Fixed,
    Variable,
}

impl AlphabetKind {
    pub const ALL: [AlphabetKind; 10] = [
        Self::Ascii,
        Self::Utf8,
        Self::Utf16,
        Self::Utf32,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Fixed,
        Self::Variable,
    ];

    /// The tag byte identifying this kind in the binary format.
    pub fn tag(self) -> u8 {
        match self {
            Self::Ascii => 0x01,
            Self::Utf8 => 0x02,
            Self::Utf16 => 0x03,
            Self::Utf32 => 0x04,
            Self::UInt8 => 0x05,
            Self::UInt16 => 0x06,
            Self::UInt32 => 0x07,
            Self::UInt64 => 0x08,
            Self::Fixed => 0x09,
            Self::Variable => 0x0A,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, UnknownTag> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or(UnknownTag {
                kind: "alphabet",
                tag,
            })
    }

    /// The bounded kind this identifier names, if it is a numeric domain.
    pub fn bounded(self) -> Option<BoundedKind> {
        match self {
            Self::Ascii => Some(BoundedKind::Ascii),
            Self::Utf8 => Some(BoundedKind::Utf8),
            Self::Utf16 => Some(BoundedKind::Utf16),
            Self::Utf32 => Some(BoundedKind::Utf32),
            Self::UInt8 => Some(BoundedKind::UInt8),
            Self::UInt16 => Some(BoundedKind::UInt16),
            Self::UInt32 => Some(BoundedKind::UInt32),
            Self::UInt64 => Some(BoundedKind::UInt64),
            Self::Fixed | Self::Variable => None,
        }
    }
}

/// Numeric alphabet domains. Each has a fixed big-endian byte width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundedKind {
    Ascii,
    Utf8,
    Utf16,
    Utf32,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl BoundedKind {
    /// Bytes per encoded letter.
    pub fn width(self) -> usize {
        match self {
            Self::Ascii | Self::Utf8 | Self::UInt8 => 1,
            Self::Utf16 | Self::UInt16 => 2,
            Self::Utf32 | Self::UInt32 => 4,
            Self::UInt64 => 8,
        }
    }

    /// Largest value representable in `width()` bytes.
    pub fn capacity(self) -> u64 {
        match self.width() {
            8 => u64::MAX,
            width => (1u64 << (8 * width)) - 1,
        }
    }

    /// Inclusive natural domain of the kind.
    ///
    /// UTF-32 stops at the last Unicode scalar value; every other kind spans
    /// its full width (ASCII only the low 7 bits).
    pub fn natural_range(self) -> (u64, u64) {
        match self {
            Self::Ascii => (0, 0x7F),
            Self::Utf32 => (0, 0x10_FFFF),
            _ => (0, self.capacity()),
        }
    }

    pub fn kind(self) -> AlphabetKind {
        match self {
            Self::Ascii => AlphabetKind::Ascii,
            Self::Utf8 => AlphabetKind::Utf8,
            Self::Utf16 => AlphabetKind::Utf16,
            Self::Utf32 => AlphabetKind::Utf32,
            Self::UInt8 => AlphabetKind::UInt8,
            Self::UInt16 => AlphabetKind::UInt16,
            Self::UInt32 => AlphabetKind::UInt32,
            Self::UInt64 => AlphabetKind::UInt64,
        }
    }
}

/// Plain description of an alphabet, as stored and exchanged.
///
/// Use [`Alphabet`] to encode and decode; it validates the description and
/// indexes custom tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlphabetSpec {
    Bounded {
        kind: BoundedKind,
        min: u64,
        max: u64,
    },
    CustomFixed {
        width: usize,
        table: Vec<Vec<u8>>,
    },
    CustomVariable {
        table: Vec<Vec<u8>>,
    },
}

impl AlphabetSpec {
    pub fn kind(&self) -> AlphabetKind {
        match self {
            Self::Bounded { kind, .. } => kind.kind(),
            Self::CustomFixed { .. } => AlphabetKind::Fixed,
            Self::CustomVariable { .. } => AlphabetKind::Variable,
        }
    }
}

/// A letter: its id and its unique byte encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Letter {
    pub id: LetterId,
    pub raw: Vec<u8>,
}

/// A validated alphabet able to encode and decode letters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "AlphabetSpec", into = "AlphabetSpec")]
pub struct Alphabet {
    spec: AlphabetSpec,
    index: HashMap<Vec<u8>, LetterId>,
    max_width: usize,
}

impl Alphabet {
    /// Validate a spec: `min <= max` for bounded domains, and unique
    /// entries of the right shape for custom tables.
    pub fn new(spec: AlphabetSpec) -> Result<Self, AlphabetError> {
        let mut index = HashMap::new();
        let mut max_width = 0;

        match &spec {
            AlphabetSpec::Bounded { kind, min, max } => {
                if min > max {
                    return Err(AlphabetError::InvertedRange {
                        min: *min,
                        max: *max,
                    });
                }
                max_width = kind.width();
            }
            AlphabetSpec::CustomFixed { width, table } => {
                if *width == 0 {
                    return Err(AlphabetError::ZeroWidth);
                }
                for (id, raw) in (0..).zip(table) {
                    if raw.len() != *width {
                        return Err(AlphabetError::WidthMismatch {
                            index: id,
                            expected: *width,
                            found: raw.len(),
                        });
                    }
                    if let Some(first) = index.insert(raw.clone(), id) {
                        return Err(AlphabetError::DuplicateLetter { first, second: id });
                    }
                }
                max_width = *width;
            }
            AlphabetSpec::CustomVariable { table } => {
                for (id, raw) in (0..).zip(table) {
                    if raw.is_empty() {
                        return Err(AlphabetError::EmptyLetter { index: id });
                    }
                    if let Some(first) = index.insert(raw.clone(), id) {
                        return Err(AlphabetError::DuplicateLetter { first, second: id });
                    }
                    max_width = max_width.max(raw.len());
                }
                check_prefix_free(table)?;
            }
        }

        Ok(Self {
            spec,
            index,
            max_width,
        })
    }

    /// A bounded alphabet over `[min, max]`.
    ///
    /// `max` may exceed what the kind's width can hold. Ids past
    /// [`BoundedKind::capacity`] are in the domain but fail to encode with
    /// `Overflow`, and freezing rejects transitions on them.
    pub fn bounded(kind: BoundedKind, min: u64, max: u64) -> Result<Self, AlphabetError> {
        Self::new(AlphabetSpec::Bounded { kind, min, max })
    }

    /// A bounded alphabet spanning the kind's natural domain.
    pub fn full(kind: BoundedKind) -> Self {
        let (min, max) = kind.natural_range();
        Self {
            spec: AlphabetSpec::Bounded { kind, min, max },
            index: HashMap::new(),
            max_width: kind.width(),
        }
    }

    /// An empty fixed-width table; letters are added through the builder.
    pub fn fixed(width: usize) -> Result<Self, AlphabetError> {
        Self::new(AlphabetSpec::CustomFixed {
            width,
            table: Vec::new(),
        })
    }

    /// An empty variable-width table; letters are added through the builder.
    pub fn variable() -> Self {
        Self {
            spec: AlphabetSpec::CustomVariable { table: Vec::new() },
            index: HashMap::new(),
            max_width: 0,
        }
    }

    pub fn spec(&self) -> &AlphabetSpec {
        &self.spec
    }

    pub fn kind(&self) -> AlphabetKind {
        self.spec.kind()
    }

    /// Whether `id` lies within the alphabet's domain.
    pub fn contains(&self, id: LetterId) -> bool {
        match &self.spec {
            AlphabetSpec::Bounded { min, max, .. } => (*min..=*max).contains(&id),
            AlphabetSpec::CustomFixed { table, .. } | AlphabetSpec::CustomVariable { table } => {
                id < table.len() as u64
            }
        }
    }

    /// Whether `id` is in the domain and has a byte representation.
    pub fn is_encodable(&self, id: LetterId) -> bool {
        match &self.spec {
            AlphabetSpec::Bounded { kind, .. } => self.contains(id) && id <= kind.capacity(),
            _ => self.contains(id),
        }
    }

    /// Encode a letter id to its byte representation.
    pub fn encode(&self, id: LetterId) -> Result<Vec<u8>, AlphabetError> {
        match &self.spec {
            AlphabetSpec::Bounded { kind, min, max } => encode_bounded(*kind, *min, *max, id),
            AlphabetSpec::CustomFixed { table, .. } | AlphabetSpec::CustomVariable { table } => {
                usize::try_from(id)
                    .ok()
                    .and_then(|index| table.get(index))
                    .cloned()
                    .ok_or(AlphabetError::UnknownLetter(LetterRef::Id(id)))
            }
        }
    }

    /// Decode one complete letter encoding.
    pub fn decode(&self, raw: &[u8]) -> Result<LetterId, AlphabetError> {
        match &self.spec {
            AlphabetSpec::Bounded { kind, min, max } => decode_bounded(*kind, *min, *max, raw),
            AlphabetSpec::CustomFixed { width, .. } => {
                if raw.len() != *width {
                    return Err(AlphabetError::MalformedEncoding(format!(
                        "expected {width} byte(s), found {}",
                        raw.len()
                    )));
                }
                self.index
                    .get(raw)
                    .copied()
                    .ok_or_else(|| AlphabetError::UnknownLetter(LetterRef::Raw(raw.to_vec())))
            }
            AlphabetSpec::CustomVariable { .. } => {
                let (id, consumed) = self.decode_prefix(raw)?;
                if consumed != raw.len() {
                    return Err(AlphabetError::MalformedEncoding(format!(
                        "{} trailing byte(s) after letter {id}",
                        raw.len() - consumed
                    )));
                }
                Ok(id)
            }
        }
    }

    /// Decode the letter at the front of `bytes`, returning its id and the
    /// number of bytes it occupies. Always consumes at least one byte.
    pub fn decode_prefix(&self, bytes: &[u8]) -> Result<(LetterId, usize), AlphabetError> {
        if bytes.is_empty() {
            return Err(AlphabetError::MalformedEncoding("empty input".to_string()));
        }

        match &self.spec {
            AlphabetSpec::CustomVariable { .. } => (1..=self.max_width.min(bytes.len()))
                .find_map(|len| self.index.get(&bytes[..len]).map(|id| (*id, len)))
                .ok_or_else(|| {
                    AlphabetError::MalformedEncoding(format!(
                        "no letter matches a prefix of {} byte(s)",
                        bytes.len()
                    ))
                }),
            _ => {
                let width = self.max_width;
                if bytes.len() < width {
                    return Err(AlphabetError::MalformedEncoding(format!(
                        "truncated letter: expected {width} byte(s), found {}",
                        bytes.len()
                    )));
                }
                self.decode(&bytes[..width]).map(|id| (id, width))
            }
        }
    }

    /// The letter with the given id.
    pub fn letter(&self, id: LetterId) -> Result<Letter, AlphabetError> {
        self.encode(id).map(|raw| Letter { id, raw })
    }

    /// Register a letter by its encoding.
    ///
    /// Custom tables grow by one entry; bounded alphabets only validate the
    /// encoding against their domain.
    pub(crate) fn insert(&mut self, raw: Vec<u8>) -> Result<Letter, AlphabetError> {
        let id = self.index.len() as LetterId;

        let table = match &mut self.spec {
            AlphabetSpec::Bounded { kind, min, max } => {
                let id = decode_bounded(*kind, *min, *max, &raw)?;
                return Ok(Letter { id, raw });
            }
            AlphabetSpec::CustomFixed { width, table } => {
                if raw.len() != *width {
                    return Err(AlphabetError::WidthMismatch {
                        index: id,
                        expected: *width,
                        found: raw.len(),
                    });
                }
                table
            }
            AlphabetSpec::CustomVariable { table } => {
                if raw.is_empty() {
                    return Err(AlphabetError::EmptyLetter { index: id });
                }
                let clash = table.iter().position(|entry| {
                    entry != &raw && (entry.starts_with(&raw) || raw.starts_with(entry))
                });
                if let Some(other) = clash {
                    let other = other as LetterId;
                    return Err(if raw.len() < table[other as usize].len() {
                        AlphabetError::PrefixConflict {
                            prefix: id,
                            letter: other,
                        }
                    } else {
                        AlphabetError::PrefixConflict {
                            prefix: other,
                            letter: id,
                        }
                    });
                }
                table
            }
        };

        if let Some(&first) = self.index.get(&raw) {
            return Err(AlphabetError::DuplicateLetter { first, second: id });
        }

        table.push(raw.clone());
        self.index.insert(raw.clone(), id);
        self.max_width = self.max_width.max(raw.len());
        Ok(Letter { id, raw })
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl Eq for Alphabet {}

impl TryFrom<AlphabetSpec> for Alphabet {
    type Error = AlphabetError;

    fn try_from(spec: AlphabetSpec) -> Result<Self, Self::Error> {
        Self::new(spec)
    }
}

impl From<Alphabet> for AlphabetSpec {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.spec
    }
}

fn encode_bounded(
    kind: BoundedKind,
    min: u64,
    max: u64,
    id: LetterId,
) -> Result<Vec<u8>, AlphabetError> {
    if id < min || id > max {
        return Err(AlphabetError::OutOfRange { id, min, max });
    }
    let width = kind.width();
    if id > kind.capacity() {
        return Err(AlphabetError::Overflow { id, width });
    }
    Ok(id.to_be_bytes()[8 - width..].to_vec())
}

fn decode_bounded(
    kind: BoundedKind,
    min: u64,
    max: u64,
    raw: &[u8],
) -> Result<LetterId, AlphabetError> {
    let width = kind.width();
    if raw.len() != width {
        return Err(AlphabetError::MalformedEncoding(format!(
            "expected {width} byte(s), found {}",
            raw.len()
        )));
    }
    let id = raw
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
    if id < min || id > max {
        return Err(AlphabetError::OutOfRange { id, min, max });
    }
    Ok(id)
}

/// In lexicographic order, an entry that prefixes any other entry also
/// prefixes its immediate successor, so adjacent pairs suffice.
fn check_prefix_free(table: &[Vec<u8>]) -> Result<(), AlphabetError> {
    let mut sorted: Vec<(&[u8], LetterId)> = (0..)
        .zip(table)
        .map(|(id, raw)| (raw.as_slice(), id))
        .collect();
    sorted.sort_unstable();

    for pair in sorted.windows(2) {
        let (shorter, prefix) = pair[0];
        let (longer, letter) = pair[1];
        if longer.starts_with(shorter) {
            return Err(AlphabetError::PrefixConflict { prefix, letter });
        }
    }
    Ok(())
}
