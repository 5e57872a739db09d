// ============================================================================
// IEEE 754 Codec
// Sign / biased exponent / mantissa layouts of any width up to 64 bits
// ============================================================================

use super::flip_bit;
use crate::domain::{low_mask, Classification, Format, FormatError, FormatResult, Ieee754Fields};
use crate::interfaces::{BitRole, EditOp, FormatCodec};
use crate::numeric::ExactNumber;

/// Codec for `[sign:1][exponent:E][mantissa:M]` with bias `2^(E-1) - 1`.
///
/// Navigation follows sign-magnitude order: `next` moves towards +inf,
/// `prev` towards -inf. Field steppers touch exactly one field and wrap
/// within it.
///
/// # Example
/// ```
/// use floatinfo::codec::Ieee754Codec;
/// use floatinfo::interfaces::FormatCodec;
/// use floatinfo::numeric::Radix;
///
/// let half = Ieee754Codec::binary16();
/// assert_eq!(half.render_exact(0x3c00, Radix::Decimal), "1.0000000000");
/// assert_eq!(half.render_exact(half.max_finite(), Radix::Decimal), "65504");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ieee754Codec {
    exponent_bits: u32,
    mantissa_bits: u32,
}

impl Ieee754Codec {
    /// Codec for a validated layout.
    pub fn new(total_bits: u32, exponent_bits: u32, mantissa_bits: u32) -> FormatResult<Self> {
        Format::ieee754(total_bits, exponent_bits, mantissa_bits)?;
        Ok(Self {
            exponent_bits,
            mantissa_bits,
        })
    }

    /// Codec for an IEEE 754 [`Format`].
    pub fn from_format(format: Format) -> FormatResult<Self> {
        match format {
            Format::Ieee754 {
                total_bits,
                exponent_bits,
                mantissa_bits,
            } => Self::new(total_bits, exponent_bits, mantissa_bits),
            Format::Posit { total_bits } => Err(FormatError::InvalidLayout {
                total_bits,
                exponent_bits: 0,
                mantissa_bits: 0,
            }),
        }
    }

    /// Codec for a layout already known to be valid.
    pub(crate) const fn from_parts(exponent_bits: u32, mantissa_bits: u32) -> Self {
        Self {
            exponent_bits,
            mantissa_bits,
        }
    }

    pub const fn binary16() -> Self {
        Self {
            exponent_bits: 5,
            mantissa_bits: 10,
        }
    }

    pub const fn binary32() -> Self {
        Self {
            exponent_bits: 8,
            mantissa_bits: 23,
        }
    }

    pub const fn binary64() -> Self {
        Self {
            exponent_bits: 11,
            mantissa_bits: 52,
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    #[inline]
    pub fn total_bits(&self) -> u32 {
        1 + self.exponent_bits + self.mantissa_bits
    }

    #[inline]
    pub fn exponent_bits(&self) -> u32 {
        self.exponent_bits
    }

    #[inline]
    pub fn mantissa_bits(&self) -> u32 {
        self.mantissa_bits
    }

    /// `2^(E-1) - 1`
    #[inline]
    pub fn exponent_bias(&self) -> i32 {
        (1i32 << (self.exponent_bits - 1)) - 1
    }

    #[inline]
    fn exponent_mask(&self) -> u64 {
        low_mask(self.exponent_bits)
    }

    #[inline]
    fn mantissa_mask(&self) -> u64 {
        low_mask(self.mantissa_bits)
    }

    #[inline]
    fn sign_shift(&self) -> u32 {
        self.exponent_bits + self.mantissa_bits
    }

    // ========================================================================
    // Decode / Encode
    // ========================================================================

    pub fn decode(&self, pattern: u64) -> Ieee754Fields {
        Ieee754Fields {
            sign: (pattern >> self.sign_shift()) & 1 == 1,
            exponent: (pattern >> self.mantissa_bits) & self.exponent_mask(),
            mantissa: pattern & self.mantissa_mask(),
        }
    }

    /// Pack fields; out-of-range field values are masked.
    pub fn encode(&self, fields: &Ieee754Fields) -> u64 {
        (u64::from(fields.sign) << self.sign_shift())
            | ((fields.exponent & self.exponent_mask()) << self.mantissa_bits)
            | (fields.mantissa & self.mantissa_mask())
    }

    fn construct(&self, sign: bool, exponent: u64, mantissa: u64) -> u64 {
        self.encode(&Ieee754Fields::new(sign, exponent, mantissa))
    }

    /// Exponent field all ones.
    #[inline]
    pub fn is_nan_or_inf(&self, pattern: u64) -> bool {
        self.decode(pattern).exponent == self.exponent_mask()
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    pub fn zero(&self) -> u64 {
        0
    }

    pub fn one(&self) -> u64 {
        self.construct(false, self.exponent_bias() as u64, 0)
    }

    /// Gap between one and the next value, `2^-M`. Subnormal when the
    /// mantissa is at least as wide as the bias: `2^(bias-1) * 2^(1-bias-M)`.
    pub fn epsilon(&self) -> u64 {
        let bias = self.exponent_bias();
        let exponent = bias - self.mantissa_bits as i32;
        if exponent >= 1 {
            self.construct(false, exponent as u64, 0)
        } else {
            self.construct(false, 0, 1 << (bias - 1))
        }
    }

    pub fn min_normal(&self) -> u64 {
        self.construct(false, 1, 0)
    }

    pub fn max_finite(&self) -> u64 {
        self.construct(false, self.exponent_mask() - 1, self.mantissa_mask())
    }

    pub fn min_subnormal(&self) -> u64 {
        self.construct(false, 0, 1)
    }

    pub fn positive_infinity(&self) -> u64 {
        self.construct(false, self.exponent_mask(), 0)
    }

    pub fn negative_infinity(&self) -> u64 {
        self.construct(true, self.exponent_mask(), 0)
    }

    pub fn quiet_nan(&self) -> u64 {
        self.construct(false, self.exponent_mask(), 1 << (self.mantissa_bits - 1))
    }

    pub fn signaling_nan(&self) -> u64 {
        self.construct(false, self.exponent_mask(), 1 << (self.mantissa_bits - 2))
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Flip the sign of finite values; infinities and NaNs are returned as is.
    pub fn negate(&self, pattern: u64) -> u64 {
        if self.is_nan_or_inf(pattern) {
            return pattern & self.format().mask();
        }
        pattern ^ (1 << self.sign_shift())
    }

    /// Next value towards +inf.
    pub fn next(&self, pattern: u64) -> u64 {
        let Ieee754Fields {
            sign,
            mut exponent,
            mut mantissa,
        } = self.decode(pattern);

        if !sign {
            if self.is_nan_or_inf(pattern) {
                return pattern & self.format().mask();
            }
            // Mantissa overflow carries into the exponent; MaxFinite becomes +inf.
            if mantissa == self.mantissa_mask() {
                mantissa = 0;
                exponent += 1;
            } else {
                mantissa += 1;
            }
            return self.construct(sign, exponent, mantissa);
        }

        if self.is_nan_or_inf(pattern) {
            return if mantissa == 0 {
                self.construct(true, self.exponent_mask() - 1, self.mantissa_mask())
            } else {
                pattern & self.format().mask()
            };
        }

        if exponent == 0 && mantissa == 0 {
            return self.zero();
        }

        if mantissa == 0 {
            mantissa = self.mantissa_mask();
            exponent -= 1;
        } else {
            mantissa -= 1;
        }
        self.construct(sign, exponent, mantissa)
    }

    /// Next value towards -inf: `next` mirrored through the sign bit.
    pub fn prev(&self, pattern: u64) -> u64 {
        let sign_bit = 1 << self.sign_shift();
        self.next(pattern ^ sign_bit) ^ sign_bit
    }

    pub fn increment_mantissa(&self, pattern: u64) -> u64 {
        let fields = self.decode(pattern);
        self.construct(fields.sign, fields.exponent, fields.mantissa.wrapping_add(1))
    }

    pub fn decrement_mantissa(&self, pattern: u64) -> u64 {
        let fields = self.decode(pattern);
        self.construct(fields.sign, fields.exponent, fields.mantissa.wrapping_sub(1))
    }

    pub fn increment_exponent(&self, pattern: u64) -> u64 {
        let fields = self.decode(pattern);
        self.construct(fields.sign, fields.exponent.wrapping_add(1), fields.mantissa)
    }

    pub fn decrement_exponent(&self, pattern: u64) -> u64 {
        let fields = self.decode(pattern);
        self.construct(fields.sign, fields.exponent.wrapping_sub(1), fields.mantissa)
    }
}

impl FormatCodec for Ieee754Codec {
    fn format(&self) -> Format {
        Format::Ieee754 {
            total_bits: self.total_bits(),
            exponent_bits: self.exponent_bits,
            mantissa_bits: self.mantissa_bits,
        }
    }

    fn classify(&self, pattern: u64) -> Classification {
        let Ieee754Fields {
            exponent, mantissa, ..
        } = self.decode(pattern);

        if exponent == self.exponent_mask() {
            if mantissa == 0 {
                Classification::Infinite
            } else if (mantissa >> (self.mantissa_bits - 1)) & 1 == 1 {
                Classification::QuietNaN
            } else {
                Classification::SignalingNaN
            }
        } else if exponent == 0 {
            if mantissa == 0 {
                Classification::Zero
            } else {
                Classification::Subnormal
            }
        } else {
            Classification::Normal
        }
    }

    /// `(-1)^s * 2^(exponent - bias - M + subnormal) * (mantissa + implicit)`
    fn value(&self, pattern: u64) -> Option<ExactNumber> {
        if self.is_nan_or_inf(pattern) {
            return None;
        }

        let Ieee754Fields {
            sign,
            exponent,
            mantissa,
        } = self.decode(pattern);
        let is_subnormal = exponent == 0;

        let scale = exponent as i32 - self.exponent_bias() - self.mantissa_bits as i32
            + i32::from(is_subnormal);
        let integer = if is_subnormal {
            mantissa
        } else {
            mantissa | (1 << self.mantissa_bits)
        };

        let value = &ExactNumber::pow2(scale) * &ExactNumber::from(integer);
        Some(value.with_sign(sign))
    }

    fn fraction_digits(&self, pattern: u64) -> usize {
        let exponent = self.decode(pattern).exponent as i64;
        let digits = i64::from(self.exponent_bias()) + i64::from(self.mantissa_bits)
            - exponent
            - i64::from(exponent == 0);
        digits.max(0) as usize
    }

    fn bit_role(&self, _pattern: u64, index: u32) -> BitRole {
        if index < self.mantissa_bits {
            BitRole::Mantissa
        } else if index < self.sign_shift() {
            BitRole::Exponent
        } else if index < self.total_bits() {
            BitRole::Sign
        } else {
            BitRole::OutOfBounds
        }
    }

    fn apply(&self, op: EditOp, pattern: u64) -> Option<u64> {
        let pattern = pattern & self.format().mask();
        Some(match op {
            EditOp::SetZero => self.zero(),
            EditOp::SetOne => self.one(),
            EditOp::SetInfinity => self.positive_infinity(),
            EditOp::SetQuietNaN => self.quiet_nan(),
            EditOp::SetSignalingNaN => self.signaling_nan(),
            EditOp::SetMin => self.min_normal(),
            EditOp::SetMax => self.max_finite(),
            EditOp::SetEpsilon => self.epsilon(),
            EditOp::SetMinSubnormal => self.min_subnormal(),
            EditOp::Negate => self.negate(pattern),
            EditOp::Prev => self.prev(pattern),
            EditOp::Next => self.next(pattern),
            EditOp::IncrementMantissa => self.increment_mantissa(pattern),
            EditOp::DecrementMantissa => self.decrement_mantissa(pattern),
            EditOp::IncrementExponent => self.increment_exponent(pattern),
            EditOp::DecrementExponent => self.decrement_exponent(pattern),
            EditOp::FlipBit(index) => return flip_bit(self.format(), pattern, index),
            EditOp::SetNaR
            | EditOp::IncrementRegime
            | EditOp::DecrementRegime
            | EditOp::LoadSerialized => return None,
        })
    }
}
