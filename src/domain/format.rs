// ============================================================================
// Formats
// Bit layouts of the supported encodings and their stable type codes
// ============================================================================

use super::errors::{FormatError, FormatResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported pattern width.
pub const MAX_BITS: u32 = 64;

/// Mask with the low `bits` bits set (all 64 bits for `bits >= 64`).
#[inline]
pub const fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

// ============================================================================
// Format
// ============================================================================

/// Layout of a fixed-width encoding.
///
/// Both families store the sign in the most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Format {
    /// `[sign:1][exponent:E][mantissa:M]`, bias `2^(E-1) - 1`
    Ieee754 {
        total_bits: u32,
        exponent_bits: u32,
        mantissa_bits: u32,
    },
    /// Type III unum with a two-bit exponent field
    Posit { total_bits: u32 },
}

impl Format {
    pub const BINARY16: Format = Format::Ieee754 {
        total_bits: 16,
        exponent_bits: 5,
        mantissa_bits: 10,
    };
    pub const BINARY32: Format = Format::Ieee754 {
        total_bits: 32,
        exponent_bits: 8,
        mantissa_bits: 23,
    };
    pub const BINARY64: Format = Format::Ieee754 {
        total_bits: 64,
        exponent_bits: 11,
        mantissa_bits: 52,
    };
    pub const BFLOAT16: Format = Format::Ieee754 {
        total_bits: 16,
        exponent_bits: 8,
        mantissa_bits: 7,
    };
    pub const MINIFLOAT: Format = Format::Ieee754 {
        total_bits: 8,
        exponent_bits: 4,
        mantissa_bits: 3,
    };
    pub const POSIT8: Format = Format::Posit { total_bits: 8 };
    pub const POSIT16: Format = Format::Posit { total_bits: 16 };
    pub const POSIT32: Format = Format::Posit { total_bits: 32 };
    pub const POSIT64: Format = Format::Posit { total_bits: 64 };

    /// Validated IEEE 754 layout.
    pub fn ieee754(total_bits: u32, exponent_bits: u32, mantissa_bits: u32) -> FormatResult<Self> {
        let format = Format::Ieee754 {
            total_bits,
            exponent_bits,
            mantissa_bits,
        };
        format.validate()?;
        Ok(format)
    }

    /// Validated posit layout.
    pub fn posit(total_bits: u32) -> FormatResult<Self> {
        let format = Format::Posit { total_bits };
        format.validate()?;
        Ok(format)
    }

    /// Check the layout invariants.
    ///
    /// - total width is a whole number of bytes in 8..=64
    /// - IEEE 754: `1 + E + M == total`, `E` in 2..=15, `M >= 2`
    pub fn validate(&self) -> FormatResult<()> {
        let total_bits = self.total_bits();
        if total_bits == 0 || total_bits > MAX_BITS || total_bits % 8 != 0 {
            return Err(FormatError::UnsupportedWidth(total_bits));
        }

        if let Format::Ieee754 {
            exponent_bits,
            mantissa_bits,
            ..
        } = *self
        {
            let sums = exponent_bits
                .checked_add(mantissa_bits)
                .and_then(|bits| bits.checked_add(1))
                == Some(total_bits);
            if !sums || !(2..=15).contains(&exponent_bits) || mantissa_bits < 2 {
                return Err(FormatError::InvalidLayout {
                    total_bits,
                    exponent_bits,
                    mantissa_bits,
                });
            }
        }

        Ok(())
    }

    /// Width of a pattern in bits.
    #[inline]
    pub fn total_bits(&self) -> u32 {
        match *self {
            Format::Ieee754 { total_bits, .. } | Format::Posit { total_bits } => total_bits,
        }
    }

    /// Width of a pattern in bytes.
    #[inline]
    pub fn byte_count(&self) -> usize {
        (self.total_bits() / 8) as usize
    }

    /// Mask covering every bit of a pattern.
    #[inline]
    pub fn mask(&self) -> u64 {
        low_mask(self.total_bits())
    }

    #[inline]
    pub fn is_ieee754(&self) -> bool {
        matches!(self, Format::Ieee754 { .. })
    }

    #[inline]
    pub fn is_posit(&self) -> bool {
        matches!(self, Format::Posit { .. })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Ieee754 {
                total_bits,
                exponent_bits,
                mantissa_bits,
            } => write!(f, "ieee754<{total_bits}: 1+{exponent_bits}+{mantissa_bits}>"),
            Format::Posit { total_bits } => write!(f, "posit<{total_bits}, es=2>"),
        }
    }
}

// ============================================================================
// Type Code
// ============================================================================

/// Stable integer identifiers of the built-in format instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum TypeCode {
    Binary16 = 1,
    Binary32 = 2,
    Binary64 = 3,
    Posit8 = 4,
    Posit16 = 5,
    Posit32 = 6,
    Posit64 = 7,
    BFloat16 = 8,
    Minifloat = 9,
}

impl TypeCode {
    /// Every built-in instance, in code order.
    pub const ALL: [TypeCode; 9] = [
        TypeCode::Binary16,
        TypeCode::Binary32,
        TypeCode::Binary64,
        TypeCode::Posit8,
        TypeCode::Posit16,
        TypeCode::Posit32,
        TypeCode::Posit64,
        TypeCode::BFloat16,
        TypeCode::Minifloat,
    ];

    /// Integer code.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a type by integer code.
    pub fn from_code(code: i32) -> FormatResult<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.code() == code)
            .ok_or(FormatError::UnknownCode { kind: "type", code })
    }

    /// Bit layout of this instance.
    pub fn format(self) -> Format {
        match self {
            TypeCode::Binary16 => Format::BINARY16,
            TypeCode::Binary32 => Format::BINARY32,
            TypeCode::Binary64 => Format::BINARY64,
            TypeCode::Posit8 => Format::POSIT8,
            TypeCode::Posit16 => Format::POSIT16,
            TypeCode::Posit32 => Format::POSIT32,
            TypeCode::Posit64 => Format::POSIT64,
            TypeCode::BFloat16 => Format::BFLOAT16,
            TypeCode::Minifloat => Format::MINIFLOAT,
        }
    }

    /// Short name, also used in permalinks.
    pub fn name(self) -> &'static str {
        match self {
            TypeCode::Binary16 => "binary16",
            TypeCode::Binary32 => "binary32",
            TypeCode::Binary64 => "binary64",
            TypeCode::Posit8 => "posit8",
            TypeCode::Posit16 => "posit16",
            TypeCode::Posit32 => "posit32",
            TypeCode::Posit64 => "posit64",
            TypeCode::BFloat16 => "bfloat16",
            TypeCode::Minifloat => "minifloat",
        }
    }

    /// Human-readable name.
    pub fn long_name(self) -> &'static str {
        match self {
            TypeCode::Binary16 => "IEEE 754 16-bit Float (binary16)",
            TypeCode::Binary32 => "IEEE 754 32-bit Float (binary32)",
            TypeCode::Binary64 => "IEEE 754 64-bit Float (binary64)",
            TypeCode::Posit8 => "8-bit Posit (Type III Unum) (posit8)",
            TypeCode::Posit16 => "16-bit Posit (Type III Unum) (posit16)",
            TypeCode::Posit32 => "32-bit Posit (Type III Unum) (posit32)",
            TypeCode::Posit64 => "64-bit Posit (Type III Unum) (posit64)",
            TypeCode::BFloat16 => "Brain floating-point",
            TypeCode::Minifloat => "Minifloat",
        }
    }

    /// Look up a type by short name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl TryFrom<i32> for TypeCode {
    type Error = FormatError;

    fn try_from(code: i32) -> FormatResult<Self> {
        Self::from_code(code)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats_are_valid() {
        for ty in TypeCode::ALL {
            assert!(ty.format().validate().is_ok(), "{ty} has a bad layout");
        }
    }

    #[test]
    fn test_widths() {
        assert_eq!(Format::BINARY64.total_bits(), 64);
        assert_eq!(Format::BINARY64.mask(), u64::MAX);
        assert_eq!(Format::MINIFLOAT.byte_count(), 1);
        assert_eq!(Format::POSIT16.mask(), 0xffff);
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(3), 0b111);
    }

    #[test]
    fn test_validation() {
        assert!(Format::ieee754(16, 5, 10).is_ok());
        assert_eq!(
            Format::ieee754(16, 5, 9),
            Err(FormatError::InvalidLayout {
                total_bits: 16,
                exponent_bits: 5,
                mantissa_bits: 9
            })
        );
        assert!(Format::ieee754(8, 6, 1).is_err());
        assert!(Format::ieee754(24, 16, 7).is_err());
        assert_eq!(Format::ieee754(12, 4, 7), Err(FormatError::UnsupportedWidth(12)));
        assert_eq!(Format::posit(72), Err(FormatError::UnsupportedWidth(72)));
        assert_eq!(Format::posit(0), Err(FormatError::UnsupportedWidth(0)));
        assert!(Format::posit(24).is_ok());
    }

    #[test]
    fn test_type_codes() {
        for (idx, ty) in TypeCode::ALL.into_iter().enumerate() {
            assert_eq!(ty.code(), idx as i32 + 1);
            assert_eq!(TypeCode::try_from(ty.code()), Ok(ty));
            assert_eq!(TypeCode::from_name(ty.name()), Some(ty));
        }
        assert_eq!(
            TypeCode::from_code(0),
            Err(FormatError::UnknownCode {
                kind: "type",
                code: 0
            })
        );
        assert!(TypeCode::from_code(10).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(TypeCode::Binary16.long_name(), "IEEE 754 16-bit Float (binary16)");
        assert_eq!(TypeCode::Posit8.long_name(), "8-bit Posit (Type III Unum) (posit8)");
        assert_eq!(TypeCode::BFloat16.name(), "bfloat16");
        assert_eq!(Format::POSIT8.to_string(), "posit<8, es=2>");
    }
}
