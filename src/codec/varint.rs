//! Unsigned LEB128 varints over `u64`, minimal form only.

/// Longest encoding of a `u64`.
pub const MAX_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// Input ended inside a varint
    Truncated,
    /// Value does not fit in 64 bits
    Overflow,
    /// Encoding carries redundant trailing zero groups
    Overlong,
}

pub fn encode(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Decode a varint from the front of `bytes`, returning the value and the
/// number of bytes read.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate().take(MAX_LEN) {
        // The tenth group holds only bit 63.
        if i == MAX_LEN - 1 && byte > 0x01 {
            return Err(VarintError::Overflow);
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            if byte == 0 && i > 0 {
                return Err(VarintError::Overlong);
            }
            return Ok((value, i + 1));
        }
    }
    Err(VarintError::Truncated)
}
