// ============================================================================
// Bit Pattern Text
// Bit strings, byte dumps and the canonical "hex:" serialization
// ============================================================================

use super::errors::{FormatError, FormatResult};
use super::format::Format;
use arrayvec::ArrayVec;

const SERIALIZATION_PREFIX: &str = "hex:";

/// Little-endian bytes of a pattern, `format.byte_count()` of them.
pub fn le_bytes(pattern: u64, format: Format) -> ArrayVec<u8, 8> {
    pattern.to_le_bytes()[..format.byte_count()]
        .iter()
        .copied()
        .collect()
}

/// One '0'/'1' per bit, least significant bit first.
pub fn bit_string(pattern: u64, format: Format) -> String {
    (0..format.total_bits())
        .map(|idx| if (pattern >> idx) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Lowercase hex of the little-endian bytes, no separators.
pub fn byte_string(pattern: u64, format: Format) -> String {
    le_bytes(pattern, format)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// `0x3c 0x00 (little endian)`; single-byte formats get no suffix.
pub fn bytes_pretty(pattern: u64, format: Format) -> String {
    let bytes = le_bytes(pattern, format);
    let mut out = bytes
        .iter()
        .map(|byte| format!("0x{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    if bytes.len() != 1 {
        out.push_str(" (little endian)");
    }
    out
}

/// Canonical serialization: `"hex:"` followed by the little-endian byte string.
pub fn to_serialization(pattern: u64, format: Format) -> String {
    format!("{SERIALIZATION_PREFIX}{}", byte_string(pattern, format))
}

/// Strict inverse of [`to_serialization`].
///
/// Only lowercase hex digits are accepted, and exactly two per byte.
///
/// # Errors
/// Returns `MalformedSerialization` for anything else.
pub fn parse_serialized(text: &str, format: Format) -> FormatResult<u64> {
    let malformed = || FormatError::MalformedSerialization(text.to_string());

    let hex = text.strip_prefix(SERIALIZATION_PREFIX).ok_or_else(malformed)?;
    if hex.len() != 2 * format.byte_count() {
        return Err(malformed());
    }

    let mut bytes = [0u8; 8];
    for (slot, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
        let hi = hex_value(pair[0]).ok_or_else(malformed)?;
        let lo = hex_value(pair[1]).ok_or_else(malformed)?;
        *slot = hi << 4 | lo;
    }
    Ok(u64::from_le_bytes(bytes))
}

fn hex_value(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        _ => None,
    }
}

/// URL fragment that restores a pattern: `#binary16=hex:003c`.
pub fn permalink(type_name: &str, pattern: u64, format: Format) -> String {
    format!("#{type_name}={}", to_serialization(pattern, format))
}
