//! Packed 10-bit values
//!
//! Every numeric telemetry field is sent as two characters, each carrying 5
//! bits. The alphabet is `a`-`z` for 0-25 followed by `A`-`F` for 26-31. The
//! first character holds the high 5 bits.

/// Largest value a symbol can carry.
pub const MAX_VALUE: u16 = 0x3ff;

/// Error returned by [`try_decode_symbol`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedSymbol {
    #[error("character {byte:#04x} at position {position} is not in the symbol alphabet")]
    InvalidCharacter { position: usize, byte: u8 },
    #[error("symbol is {length} characters long, expected 2")]
    Truncated { length: usize },
}

#[inline]
fn component(byte: u8) -> Option<u16> {
    match byte {
        b'a'..=b'z' => Some(u16::from(byte - b'a')),
        b'A'..=b'F' => Some(u16::from(byte - b'A') + 26),
        _ => None,
    }
}

/// Decodes a 2-character symbol.
///
/// Characters outside of the alphabet, and characters missing from a short
/// pair, contribute 0. This never fails and always returns a value in
/// `0..=MAX_VALUE`.
pub fn decode_symbol(pair: &[u8]) -> u16 {
    let high = pair.first().copied().and_then(component).unwrap_or(0);
    let low = pair.get(1).copied().and_then(component).unwrap_or(0);
    (high << 5) + low
}

/// Like [`decode_symbol`], but rejects anything that isn't exactly two
/// characters from the alphabet.
pub fn try_decode_symbol(pair: &[u8]) -> Result<u16, MalformedSymbol> {
    if pair.len() != 2 {
        return Err(MalformedSymbol::Truncated { length: pair.len() });
    }

    let mut value = 0;
    for (position, byte) in pair.iter().copied().enumerate() {
        let bits = component(byte).ok_or(MalformedSymbol::InvalidCharacter { position, byte })?;
        value = (value << 5) + bits;
    }

    Ok(value)
}

/// Encodes a value into its 2-character symbol.
///
/// Only the lower 10 bits of `value` are used.
pub fn encode_symbol(value: u16) -> [u8; 2] {
    const ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyzABCDEF";
    let value = value & MAX_VALUE;
    [
        ALPHABET[usize::from(value >> 5)],
        ALPHABET[usize::from(value & 0x1f)],
    ]
}

/// Interprets a raw 10-bit value as a temperature in °C.
///
/// Only the lower 10 bits of `raw` are used. Values above 512 wrap around to
/// negative temperatures.
#[inline]
pub fn signed_temperature(raw: u16) -> i16 {
    // fits in i16 after masking
    let raw = (raw & MAX_VALUE) as i16;
    if raw > 512 { raw - 1024 } else { raw }
}
