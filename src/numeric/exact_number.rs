// ============================================================================
// Exact Number
// Dual-base exact magnitude used to render bit patterns without rounding
// ============================================================================

use super::digits::{BinaryDigits, DecimalDigits};
use super::errors::{NumericError, NumericResult};
use std::fmt;
use std::ops::{Add, Mul};
use std::sync::LazyLock;

/// The value one, built once.
pub static ONE: LazyLock<ExactNumber> = LazyLock::new(|| ExactNumber::from(1u64));

/// The value two, built once.
pub static TWO: LazyLock<ExactNumber> = LazyLock::new(|| ExactNumber::from(2u64));

/// Output base of an exact rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Decimal,
}

/// Non-negative exact magnitude tracked in base 2 and base 10 at once.
///
/// Converting between the two bases would need division, which the digit
/// store does not have, so every operation is simply run on both
/// representations. The two sequences always denote the same magnitude.
///
/// `is_negative` is a display flag: it prefixes a '-' when rendering and is
/// ignored by arithmetic (results of `+` and `*` are never negative).
///
/// # Example
/// ```
/// use floatinfo::numeric::ExactNumber;
///
/// let eighth = ExactNumber::pow2(-3);
/// assert_eq!(eighth.render10(None), "0.125");
/// assert_eq!(eighth.render2(None), "0.001");
///
/// let x = &ExactNumber::from(3u64) * &eighth;
/// assert_eq!(x.to_string(), "0.375");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ExactNumber {
    binary: BinaryDigits,
    decimal: DecimalDigits,
    is_negative: bool,
}

impl ExactNumber {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Shared constant one.
    pub fn one() -> &'static Self {
        &ONE
    }

    /// Shared constant two.
    pub fn two() -> &'static Self {
        &TWO
    }

    /// `2^exponent`, computed independently in both bases.
    pub fn pow2(exponent: i32) -> Self {
        Self {
            binary: BinaryDigits::pow2(exponent),
            decimal: DecimalDigits::pow2(exponent),
            is_negative: false,
        }
    }

    /// Parse a base-2 literal such as `"101.011"`.
    ///
    /// The decimal mirror is assembled as the sum of `2^k` over the set bits.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the text is not a binary literal.
    pub fn from_binary_str(text: &str) -> NumericResult<Self> {
        let binary = BinaryDigits::parse(text)?;
        let mut decimal = DecimalDigits::zero();
        for exponent in binary.min_exponent()..=binary.max_exponent() {
            if binary.digit(exponent) == 1 {
                decimal = decimal.add(&DecimalDigits::pow2(exponent));
            }
        }
        Ok(Self {
            binary,
            decimal,
            is_negative: false,
        })
    }

    /// Set the display sign.
    pub fn with_sign(mut self, is_negative: bool) -> Self {
        self.is_negative = is_negative;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Display sign flag.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.is_negative
    }

    /// Whether the magnitude is zero (regardless of the display sign).
    pub fn is_zero(&self) -> bool {
        self.decimal.is_zero()
    }

    /// Base-2 digits.
    pub fn binary(&self) -> &BinaryDigits {
        &self.binary
    }

    /// Base-10 digits.
    pub fn decimal(&self) -> &DecimalDigits {
        &self.decimal
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Exact sum of magnitudes.
    pub fn add(&self, rhs: &Self) -> Self {
        Self {
            binary: self.binary.add(&rhs.binary),
            decimal: self.decimal.add(&rhs.decimal),
            is_negative: false,
        }
    }

    /// Exact product of magnitudes.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self {
            binary: self.binary.mul(&rhs.binary),
            decimal: self.decimal.mul(&rhs.decimal),
            is_negative: false,
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Signed base-10 rendering. See [`DecimalDigits::render`].
    pub fn render10(&self, fraction_digits: Option<usize>) -> String {
        self.signed(self.decimal.render(fraction_digits))
    }

    /// Signed base-2 rendering. See [`BinaryDigits::render`].
    pub fn render2(&self, fraction_digits: Option<usize>) -> String {
        self.signed(self.binary.render(fraction_digits))
    }

    /// Signed rendering in the given base.
    pub fn render(&self, radix: Radix, fraction_digits: Option<usize>) -> String {
        match radix {
            Radix::Binary => self.render2(fraction_digits),
            Radix::Decimal => self.render10(fraction_digits),
        }
    }

    fn signed(&self, magnitude: String) -> String {
        if self.is_negative {
            format!("-{magnitude}")
        } else {
            magnitude
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl From<u64> for ExactNumber {
    fn from(value: u64) -> Self {
        Self {
            binary: BinaryDigits::from_u64(value),
            decimal: DecimalDigits::from_u64(value),
            is_negative: false,
        }
    }
}

impl Add for &ExactNumber {
    type Output = ExactNumber;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        ExactNumber::add(self, rhs)
    }
}

impl Add for ExactNumber {
    type Output = ExactNumber;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        ExactNumber::add(&self, &rhs)
    }
}

impl Mul for &ExactNumber {
    type Output = ExactNumber;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        ExactNumber::mul(self, rhs)
    }
}

impl Mul for ExactNumber {
    type Output = ExactNumber;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        ExactNumber::mul(&self, &rhs)
    }
}

impl fmt::Debug for ExactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExactNumber({}, base2={})",
            self.render10(None),
            self.render2(None)
        )
    }
}

impl fmt::Display for ExactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render10(None))
    }
}

// ============================================================================
// Conversion to rust_decimal (for API boundaries)
// ============================================================================

impl ExactNumber {
    /// Convert to rust_decimal::Decimal.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the value needs more digits than Decimal holds
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        rust_decimal::Decimal::from_str_exact(&self.render10(None))
            .map_err(|_| NumericError::PrecisionLoss)
    }
}

// ============================================================================
// Tests
// ============================================================================
