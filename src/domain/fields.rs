// ============================================================================
// Decoded Fields
// Structural fields of a bit pattern and its special-value class
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Special-value class of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Classification {
    /// All magnitude bits zero (IEEE 754 keeps the sign: -0 is Zero too)
    Zero,
    /// IEEE 754 exponent field zero, mantissa nonzero
    Subnormal,
    /// Any other finite value
    Normal,
    /// IEEE 754 exponent all ones, mantissa zero
    Infinite,
    /// IEEE 754 NaN with the top mantissa bit set
    QuietNaN,
    /// IEEE 754 NaN with the top mantissa bit clear
    SignalingNaN,
    /// Posit not-a-real, `1000..0`
    NaR,
}

impl Classification {
    /// Whether the pattern has an exact numeric value.
    #[inline]
    pub fn is_finite(self) -> bool {
        matches!(
            self,
            Classification::Zero | Classification::Subnormal | Classification::Normal
        )
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        matches!(self, Classification::QuietNaN | Classification::SignalingNaN)
    }
}

/// IEEE 754 fields, each right-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ieee754Fields {
    pub sign: bool,
    pub exponent: u64,
    pub mantissa: u64,
}

impl Ieee754Fields {
    pub fn new(sign: bool, exponent: u64, mantissa: u64) -> Self {
        Self {
            sign,
            exponent,
            mantissa,
        }
    }
}

/// Posit fields read straight from the raw bits (no two's-complement step).
///
/// The field widths follow from the regime; `encode` recomputes them and
/// ignores `mantissa_bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositFields {
    pub sign: bool,
    /// Run-length regime: `k` ones give `k - 1`, `k` zeros give `-k`
    pub regime: i32,
    /// Two-bit exponent; bits cut off by the end of the pattern read as zero
    pub exponent: u32,
    pub mantissa: u64,
    pub mantissa_bits: u32,
}

/// Bit widths of the variable posit fields for one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositWidths {
    /// Regime run plus its terminator, when the terminator fits
    pub regime_bits: u32,
    pub exponent_bits: u32,
    pub mantissa_bits: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_predicates() {
        assert!(Classification::Zero.is_finite());
        assert!(Classification::Subnormal.is_finite());
        assert!(!Classification::Infinite.is_finite());
        assert!(!Classification::NaR.is_finite());
        assert!(Classification::QuietNaN.is_nan());
        assert!(!Classification::NaR.is_nan());
    }
}
