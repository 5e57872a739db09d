// ============================================================================
// Posit Codec
// Type III unums with a run-length regime and a two-bit exponent
// ============================================================================

use super::flip_bit;
use crate::domain::{
    low_mask, Classification, Format, FormatError, FormatResult, PositFields, PositWidths,
};
use crate::interfaces::{BitRole, EditOp, FormatCodec};
use crate::numeric::{ExactNumber, ONE, TWO};

/// Width of the exponent field when it is not cut short.
const EXPONENT_BITS: u32 = 2;

/// Largest value of the exponent field.
const EXPONENT_TOP: u32 = 3;

/// Codec for `n`-bit posits with es = 2.
///
/// After the sign bit comes the regime, a run of equal bits closed by the
/// opposite bit (or by the end of the pattern), then up to two exponent bits
/// and whatever remains as mantissa. Fields are read from the raw bits; the
/// sign is folded in only when computing the value.
///
/// Posit order equals two's-complement integer order, so `next`/`prev` are
/// plain increments that wrap through NaR.
///
/// # Example
/// ```
/// use floatinfo::codec::PositCodec;
/// use floatinfo::interfaces::FormatCodec;
///
/// let p8 = PositCodec::new(8).unwrap();
/// assert_eq!(p8.one(), 0x40);
/// assert_eq!(p8.value(0x40).unwrap().to_string(), "1");
/// assert_eq!(p8.value(0xc0).unwrap().to_string(), "-1");
/// assert!(p8.value(p8.nar()).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositCodec {
    total_bits: u32,
}

impl PositCodec {
    /// Codec for a validated width.
    pub fn new(total_bits: u32) -> FormatResult<Self> {
        Format::posit(total_bits)?;
        Ok(Self { total_bits })
    }

    /// Codec for a width already known to be valid.
    pub(crate) const fn from_width(total_bits: u32) -> Self {
        Self { total_bits }
    }

    /// Codec for a posit [`Format`].
    pub fn from_format(format: Format) -> FormatResult<Self> {
        match format {
            Format::Posit { total_bits } => Self::new(total_bits),
            Format::Ieee754 {
                total_bits,
                exponent_bits,
                mantissa_bits,
            } => Err(FormatError::InvalidLayout {
                total_bits,
                exponent_bits,
                mantissa_bits,
            }),
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    #[inline]
    pub fn total_bits(&self) -> u32 {
        self.total_bits
    }

    #[inline]
    fn mask(&self) -> u64 {
        low_mask(self.total_bits)
    }

    /// Bits after the sign.
    #[inline]
    fn body_bits(&self) -> u32 {
        self.total_bits - 1
    }

    /// Regime of `000..0` (zero) and `100..0` (NaR).
    #[inline]
    pub fn min_regime(&self) -> i32 {
        -(self.body_bits() as i32)
    }

    /// Regime of `011..1` (max finite).
    #[inline]
    pub fn max_regime(&self) -> i32 {
        self.total_bits as i32 - 2
    }

    /// Length of the regime run and whether it consists of ones.
    fn regime_run(&self, pattern: u64) -> (u32, bool) {
        // Left-align the body so the run starts at bit 63.
        let body = pattern << (64 - self.body_bits());
        let ones = (body >> 63) & 1 == 1;
        let run = if ones {
            body.leading_ones()
        } else {
            body.leading_zeros()
        };
        (run.min(self.body_bits()), ones)
    }

    /// Field widths of a pattern.
    pub fn widths(&self, pattern: u64) -> PositWidths {
        let (run, _) = self.regime_run(pattern);
        let regime_bits = if run < self.body_bits() { run + 1 } else { run };
        let remaining = self.body_bits() - regime_bits;
        PositWidths {
            regime_bits,
            exponent_bits: remaining.min(EXPONENT_BITS),
            mantissa_bits: remaining.saturating_sub(EXPONENT_BITS),
        }
    }

    // ========================================================================
    // Decode / Encode
    // ========================================================================

    pub fn decode(&self, pattern: u64) -> PositFields {
        let pattern = pattern & self.mask();
        let (run, ones) = self.regime_run(pattern);
        let widths = self.widths(pattern);

        let regime = if ones { run as i32 - 1 } else { -(run as i32) };

        // Exponent bits that fall off the end of the pattern read as zero.
        let exponent_shift = widths.mantissa_bits;
        let exponent_field = (pattern >> exponent_shift) & low_mask(widths.exponent_bits);
        let exponent = (exponent_field as u32) << (EXPONENT_BITS - widths.exponent_bits);

        PositFields {
            sign: (pattern >> self.body_bits()) & 1 == 1,
            regime,
            exponent,
            mantissa: pattern & low_mask(widths.mantissa_bits),
            mantissa_bits: widths.mantissa_bits,
        }
    }

    /// Pack fields. The regime is clamped to its range, exponent bits that do
    /// not fit are dropped from the low end, and the mantissa is masked to the
    /// width left over.
    pub fn encode(&self, fields: &PositFields) -> u64 {
        let regime = fields.regime.clamp(self.min_regime(), self.max_regime());
        let mut remaining = self.body_bits();
        let mut pattern = u64::from(fields.sign) << remaining;

        let (run, ones) = if regime >= 0 {
            ((regime + 1) as u32, true)
        } else {
            (regime.unsigned_abs(), false)
        };
        if ones {
            pattern |= low_mask(run) << (remaining - run);
        }
        remaining -= run;

        if remaining > 0 {
            if !ones {
                pattern |= 1 << (remaining - 1);
            }
            remaining -= 1;
        }

        let exponent_bits = remaining.min(EXPONENT_BITS);
        let exponent = u64::from(fields.exponent & EXPONENT_TOP) >> (EXPONENT_BITS - exponent_bits);
        remaining -= exponent_bits;
        pattern |= exponent << remaining;

        pattern | (fields.mantissa & low_mask(remaining))
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    pub fn zero(&self) -> u64 {
        0
    }

    pub fn one(&self) -> u64 {
        1 << (self.total_bits - 2)
    }

    pub fn min_positive(&self) -> u64 {
        1
    }

    pub fn max_finite(&self) -> u64 {
        self.mask() >> 1
    }

    pub fn nar(&self) -> u64 {
        1 << self.body_bits()
    }

    /// Gap between one and the next posit.
    pub fn epsilon(&self) -> u64 {
        5 << (self.total_bits - 3 - self.total_bits / 4)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn next(&self, pattern: u64) -> u64 {
        pattern.wrapping_add(1) & self.mask()
    }

    pub fn prev(&self, pattern: u64) -> u64 {
        pattern.wrapping_sub(1) & self.mask()
    }

    /// Two's complement of the whole pattern; zero and NaR map to themselves.
    pub fn negate(&self, pattern: u64) -> u64 {
        let pattern = pattern & self.mask();
        if pattern == self.zero() || pattern == self.nar() {
            return pattern;
        }
        pattern.wrapping_neg() & self.mask()
    }

    /// Move the regime by `delta`, keeping exponent and the leading mantissa
    /// bits. Identity at the regime limits.
    fn step_regime(&self, pattern: u64, delta: i32) -> u64 {
        let fields = self.decode(pattern);
        let regime = fields.regime + delta;
        if !(self.min_regime()..=self.max_regime()).contains(&regime) {
            return pattern & self.mask();
        }

        let target = self.encode(&PositFields {
            regime,
            mantissa: 0,
            ..fields
        });
        let new_bits = self.widths(target).mantissa_bits;
        let mantissa = if new_bits >= fields.mantissa_bits {
            fields.mantissa << (new_bits - fields.mantissa_bits)
        } else {
            fields.mantissa >> (fields.mantissa_bits - new_bits)
        };

        self.encode(&PositFields {
            regime,
            mantissa,
            mantissa_bits: new_bits,
            ..fields
        })
    }

    pub fn increment_regime(&self, pattern: u64) -> u64 {
        self.step_regime(pattern, 1)
    }

    pub fn decrement_regime(&self, pattern: u64) -> u64 {
        self.step_regime(pattern, -1)
    }

    /// Exponent field + 1; past the top the regime takes the carry and the
    /// lower fields restart at zero.
    pub fn increment_exponent(&self, pattern: u64) -> u64 {
        let pattern = pattern & self.mask();
        let widths = self.widths(pattern);
        if widths.exponent_bits == 0 {
            return pattern;
        }

        let fields = self.decode(pattern);
        let shift = EXPONENT_BITS - widths.exponent_bits;
        let field = fields.exponent >> shift;
        if u64::from(field) < low_mask(widths.exponent_bits) {
            return self.encode(&PositFields {
                exponent: (field + 1) << shift,
                ..fields
            });
        }

        if fields.regime == self.max_regime() {
            return pattern;
        }
        self.encode(&PositFields {
            regime: fields.regime + 1,
            exponent: 0,
            mantissa: 0,
            ..fields
        })
    }

    /// Exponent field - 1; below zero the regime lends and the exponent
    /// restarts at its top value with a zero mantissa.
    pub fn decrement_exponent(&self, pattern: u64) -> u64 {
        let pattern = pattern & self.mask();
        let widths = self.widths(pattern);
        if widths.exponent_bits == 0 {
            return pattern;
        }

        let fields = self.decode(pattern);
        let shift = EXPONENT_BITS - widths.exponent_bits;
        let field = fields.exponent >> shift;
        if field > 0 {
            return self.encode(&PositFields {
                exponent: (field - 1) << shift,
                ..fields
            });
        }

        if fields.regime == self.min_regime() {
            return pattern;
        }
        self.encode(&PositFields {
            regime: fields.regime - 1,
            exponent: EXPONENT_TOP,
            mantissa: 0,
            ..fields
        })
    }

    pub fn increment_mantissa(&self, pattern: u64) -> u64 {
        self.step_mantissa(pattern, u64::wrapping_add)
    }

    pub fn decrement_mantissa(&self, pattern: u64) -> u64 {
        self.step_mantissa(pattern, u64::wrapping_sub)
    }

    fn step_mantissa(&self, pattern: u64, step: fn(u64, u64) -> u64) -> u64 {
        let pattern = pattern & self.mask();
        let field = low_mask(self.widths(pattern).mantissa_bits);
        (pattern & !field) | (step(pattern, 1) & field)
    }

    /// `(1 - 2s)(4 * regime + exponent + s)`, the power of two in the value.
    fn scale(&self, fields: &PositFields) -> i32 {
        let sign = i32::from(fields.sign);
        (1 - 2 * sign) * (4 * fields.regime + fields.exponent as i32 + sign)
    }
}

impl FormatCodec for PositCodec {
    fn format(&self) -> Format {
        Format::Posit {
            total_bits: self.total_bits,
        }
    }

    fn classify(&self, pattern: u64) -> Classification {
        let pattern = pattern & self.mask();
        if pattern == self.zero() {
            Classification::Zero
        } else if pattern == self.nar() {
            Classification::NaR
        } else {
            Classification::Normal
        }
    }

    /// `(-1)^s * 2^scale * fraction`, where the fraction is `1 + m/2^mb` for
    /// positive patterns. Negative patterns store the two's complement, so
    /// their fraction is `1 + comp(m)/2^mb`, or `2` when `m` is zero.
    fn value(&self, pattern: u64) -> Option<ExactNumber> {
        match self.classify(pattern) {
            Classification::NaR => return None,
            Classification::Zero => return Some(ExactNumber::zero()),
            _ => {},
        }

        let fields = self.decode(pattern);
        let field = low_mask(fields.mantissa_bits);
        let fraction = match (fields.sign, fields.mantissa) {
            (true, 0) => TWO.clone(),
            (true, mantissa) => {
                let complement = mantissa.wrapping_neg() & field;
                &*ONE
                    + &(&ExactNumber::from(complement)
                        * &ExactNumber::pow2(-(fields.mantissa_bits as i32)))
            },
            (false, mantissa) => {
                &*ONE
                    + &(&ExactNumber::from(mantissa)
                        * &ExactNumber::pow2(-(fields.mantissa_bits as i32)))
            },
        };

        let value = &fraction * &ExactNumber::pow2(self.scale(&fields));
        Some(value.with_sign(fields.sign))
    }

    fn fraction_digits(&self, pattern: u64) -> usize {
        if self.classify(pattern) != Classification::Normal {
            return 0;
        }
        let fields = self.decode(pattern);
        (fields.mantissa_bits as i32 - self.scale(&fields)).max(0) as usize
    }

    fn bit_role(&self, pattern: u64, index: u32) -> BitRole {
        if index >= self.total_bits {
            return BitRole::OutOfBounds;
        }
        if index == self.body_bits() {
            return BitRole::Sign;
        }

        let widths = self.widths(pattern);
        let below_regime = self.body_bits() - widths.regime_bits;
        if index >= below_regime {
            BitRole::Regime
        } else if index >= below_regime.saturating_sub(EXPONENT_BITS) {
            BitRole::Exponent
        } else {
            BitRole::Mantissa
        }
    }

    fn apply(&self, op: EditOp, pattern: u64) -> Option<u64> {
        let pattern = pattern & self.mask();
        Some(match op {
            EditOp::SetZero => self.zero(),
            EditOp::SetOne => self.one(),
            EditOp::SetNaR => self.nar(),
            EditOp::SetMin => self.min_positive(),
            EditOp::SetMax => self.max_finite(),
            EditOp::SetEpsilon => self.epsilon(),
            EditOp::Negate => self.negate(pattern),
            EditOp::Prev => self.prev(pattern),
            EditOp::Next => self.next(pattern),
            EditOp::IncrementMantissa => self.increment_mantissa(pattern),
            EditOp::DecrementMantissa => self.decrement_mantissa(pattern),
            EditOp::IncrementExponent => self.increment_exponent(pattern),
            EditOp::DecrementExponent => self.decrement_exponent(pattern),
            EditOp::IncrementRegime => self.increment_regime(pattern),
            EditOp::DecrementRegime => self.decrement_regime(pattern),
            EditOp::FlipBit(index) => return flip_bit(self.format(), pattern, index),
            EditOp::SetInfinity
            | EditOp::SetQuietNaN
            | EditOp::SetSignalingNaN
            | EditOp::SetMinSubnormal
            | EditOp::LoadSerialized => return None,
        })
    }
}
