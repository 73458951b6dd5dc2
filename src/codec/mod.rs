//! Binary and JSON interchange formats.
//!
//! The binary format is compact and exact: decoding the output of
//! [`encode`] yields an automaton equal to the one encoded. Decoding treats
//! its input as untrusted. Every tag, count and id is checked, sizes are
//! bounded by [`DecodeLimits`], and any failure reports the byte offset
//! where the input went wrong.

mod decode;
mod encode;
pub mod error;
pub mod json;
mod limits;
pub mod varint;

pub use error::{CodecError, CorruptReason};
pub use limits::DecodeLimits;

use crate::automaton::Automaton;
use std::io::{Read, Write};

/// Encode an automaton to its binary form.
pub fn encode(automaton: &Automaton) -> Vec<u8> {
    encode::encode(automaton)
}

/// Decode an automaton with the default [`DecodeLimits`].
///
/// The whole input must be consumed; trailing bytes are an error.
pub fn decode(bytes: &[u8]) -> Result<Automaton, CodecError> {
    decode_with(bytes, &DecodeLimits::default())
}

/// Decode an automaton, rejecting declared sizes above `limits`.
pub fn decode_with(bytes: &[u8], limits: &DecodeLimits) -> Result<Automaton, CodecError> {
    decode::decode(bytes, limits)
}

/// Write the binary form of `automaton` to `writer`.
pub fn write_to<W: Write>(automaton: &Automaton, mut writer: W) -> Result<(), CodecError> {
    writer.write_all(&encode(automaton))?;
    writer.flush()?;
    Ok(())
}

/// Read `reader` to the end and decode it.
pub fn read_from<R: Read>(mut reader: R, limits: &DecodeLimits) -> Result<Automaton, CodecError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_with(&bytes, limits)
}
