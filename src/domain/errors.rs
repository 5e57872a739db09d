// ============================================================================
// Format Errors
// Error types for format layouts, serialized patterns and code lookups
// ============================================================================

use std::fmt;

/// Errors raised when describing formats or decoding host input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// IEEE 754 field widths do not describe a usable layout
    InvalidLayout {
        total_bits: u32,
        exponent_bits: u32,
        mantissa_bits: u32,
    },
    /// Width is not a whole number of bytes in 8..=64
    UnsupportedWidth(u32),
    /// Serialized pattern is not `"hex:"` followed by the right number of hex digits
    MalformedSerialization(String),
    /// Integer code outside a closed enumeration
    UnknownCode { kind: &'static str, code: i32 },
    /// Editor configuration rejected by validation
    InvalidConfig(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidLayout {
                total_bits,
                exponent_bits,
                mantissa_bits,
            } => write!(
                f,
                "invalid layout: 1 sign + {exponent_bits} exponent + {mantissa_bits} mantissa bits does not make a usable {total_bits}-bit format"
            ),
            FormatError::UnsupportedWidth(bits) => {
                write!(f, "unsupported width: {bits} bits (expected 8, 16, .., 64)")
            },
            FormatError::MalformedSerialization(text) => {
                write!(f, "malformed serialization: {text:?}")
            },
            FormatError::UnknownCode { kind, code } => write!(f, "unknown {kind} code: {code}"),
            FormatError::InvalidConfig(reason) => write!(f, "invalid editor config: {reason}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Result type alias for format operations
pub type FormatResult<T> = Result<T, FormatError>;
