// ============================================================================
// Digit Sequence
// Positional base-2 / base-10 digit store with an exponent offset
// ============================================================================

use super::errors::{NumericError, NumericResult};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// Digits kept inline before spilling to the heap. Covers every constant and
/// most binary16/binary32 values.
const INLINE_DIGITS: usize = 24;

type DigitStore = SmallVec<[u32; INLINE_DIGITS]>;

/// Non-negative fixed-point magnitude stored as digits of base `BASE`.
///
/// Digit `i` contributes `digits[i] * BASE^(min_exponent + i)`, least
/// significant first. While an operation accumulates, a digit may exceed
/// `BASE - 1`; `normalize` runs a single carry pass to restore canonical digits.
/// After every public operation the sequence has no most-significant zero digit
/// (an empty sequence is zero).
///
/// # Type Parameter
/// - `BASE`: either 2 or 10. Any other base fails to compile.
#[derive(Clone)]
pub struct DigitSequence<const BASE: u32> {
    digits: DigitStore,
    min_exponent: i32,
}

/// Base-2 digit sequence
pub type BinaryDigits = DigitSequence<2>;

/// Base-10 digit sequence
pub type DecimalDigits = DigitSequence<10>;

impl<const B: u32> DigitSequence<B> {
    const SUPPORTED_BASE: () = assert!(B == 2 || B == 10, "only bases 2 and 10 are supported");

    // ========================================================================
    // Construction
    // ========================================================================

    /// The empty sequence (value zero).
    pub fn zero() -> Self {
        let () = Self::SUPPORTED_BASE;
        Self {
            digits: SmallVec::new(),
            min_exponent: 0,
        }
    }

    /// A single digit at the given exponent.
    fn unit(digit: u32, exponent: i32) -> Self {
        let mut sequence = Self::allocate(exponent, 1);
        sequence.digits[0] = digit;
        sequence
    }

    /// Zero-filled store spanning `[min_exponent, min_exponent + len)`.
    fn allocate(min_exponent: i32, len: usize) -> Self {
        let () = Self::SUPPORTED_BASE;
        Self {
            digits: smallvec![0; len],
            min_exponent,
        }
    }

    /// The value one.
    pub fn one() -> Self {
        Self::unit(1, 0)
    }

    /// Build from an unsigned integer.
    pub fn from_u64(mut value: u64) -> Self {
        let mut sequence = Self::zero();
        while value != 0 {
            sequence.digits.push((value % B as u64) as u32);
            value /= B as u64;
        }
        sequence
    }

    /// Parse a literal made of base-`B` digits and at most one '.'.
    ///
    /// # Errors
    /// Returns `InvalidInput` on any other character or on a second '.'.
    ///
    /// # Examples
    /// - "144.1431" -> digits 1,3,4,1,1,4,4 starting at exponent -4
    /// - "101.001" in base 2 -> 5.125
    pub fn parse(text: &str) -> NumericResult<Self> {
        let mut dot = None;
        for (idx, ch) in text.char_indices() {
            match ch {
                '.' if dot.is_none() => dot = Some(idx),
                c if c.to_digit(B).is_some() => {},
                _ => return Err(NumericError::InvalidInput),
            }
        }

        let fraction_len = dot.map_or(0, |pos| text.len() - pos - 1);
        let min_exponent = -(fraction_len as i32);

        // Validated above: every remaining byte is an ASCII digit of this base.
        let mut digits: DigitStore = text
            .bytes()
            .rev()
            .filter(|b| *b != b'.')
            .map(|b| u32::from(b - b'0'))
            .collect();
        digits.shrink_to_fit();

        let mut sequence = Self {
            digits,
            min_exponent,
        };
        sequence.remove_leading_zeroes();
        Ok(sequence)
    }

    /// Lenient parse: logs malformed input and degrades to zero.
    pub fn parse_or_zero(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            tracing::warn!(base = B, literal = text, %err, "error parsing number");
            Self::zero()
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Exponent of the least significant stored digit.
    #[inline]
    pub fn min_exponent(&self) -> i32 {
        self.min_exponent
    }

    /// Exponent of the most significant stored digit (`min_exponent - 1` when empty).
    #[inline]
    pub fn max_exponent(&self) -> i32 {
        self.min_exponent + self.digits.len() as i32 - 1
    }

    /// Number of stored digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether any digit is stored at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Whether the magnitude is zero.
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|d| *d == 0)
    }

    /// Digit at `exponent`, zero outside the stored range.
    #[inline]
    pub fn digit(&self, exponent: i32) -> u32 {
        self.index_of(exponent).map_or(0, |idx| self.digits[idx])
    }

    fn index_of(&self, exponent: i32) -> Option<usize> {
        let idx = exponent.checked_sub(self.min_exponent)?;
        usize::try_from(idx).ok().filter(|idx| *idx < self.digits.len())
    }

    /// Exponent of the least significant nonzero digit.
    fn lowest_nonzero_exponent(&self) -> Option<i32> {
        self.digits
            .iter()
            .position(|d| *d != 0)
            .map(|idx| self.min_exponent + idx as i32)
    }

    /// Stored digits with zero padding removed on both ends, plus the exponent
    /// of the first remaining digit.
    fn significant(&self) -> (i32, &[u32]) {
        match self.digits.iter().position(|d| *d != 0) {
            None => (0, &[][..]),
            Some(start) => {
                let end = self
                    .digits
                    .iter()
                    .rposition(|d| *d != 0)
                    .map_or(start + 1, |idx| idx + 1);
                (self.min_exponent + start as i32, &self.digits[start..end])
            },
        }
    }

    // ========================================================================
    // Digit Store Maintenance
    // ========================================================================

    fn add_to_digit(&mut self, exponent: i32, value: u32) {
        match self.index_of(exponent) {
            Some(idx) => self.digits[idx] += value,
            None => {
                tracing::error!(
                    base = B,
                    exponent,
                    min_exponent = self.min_exponent,
                    len = self.digits.len(),
                    error = %NumericError::DigitOutOfRange,
                    "dropping digit write"
                );
                debug_assert!(
                    self.index_of(exponent).is_some(),
                    "digit exponent {exponent} outside allocated range"
                );
            },
        }
    }

    /// Single carry pass from the least significant digit upward.
    fn normalize(&mut self) {
        let mut carry = 0u32;
        for digit in self.digits.iter_mut() {
            let value = carry + *digit;
            carry = value / B;
            *digit = value % B;
        }
        while carry != 0 {
            self.digits.push(carry % B);
            carry /= B;
        }
    }

    fn remove_leading_zeroes(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Exact sum.
    pub fn add(&self, other: &Self) -> Self {
        let lo = self.min_exponent.min(other.min_exponent);
        let hi = self.max_exponent().max(other.max_exponent()) + 1;

        let mut result = Self::allocate(lo, (hi - lo + 1) as usize);
        for exponent in lo..=hi {
            result.add_to_digit(exponent, self.digit(exponent) + other.digit(exponent));
        }

        result.normalize();
        result.remove_leading_zeroes();
        result
    }

    /// Exact product (schoolbook convolution).
    pub fn mul(&self, other: &Self) -> Self {
        let mut result = Self::allocate(
            self.min_exponent + other.min_exponent,
            self.digits.len() + other.digits.len(),
        );

        for (i, &lhs) in self.digits.iter().enumerate() {
            if lhs == 0 {
                continue;
            }
            let lhs_exponent = self.min_exponent + i as i32;
            for (j, &rhs) in other.digits.iter().enumerate() {
                let rhs_exponent = other.min_exponent + j as i32;
                result.add_to_digit(lhs_exponent + rhs_exponent, lhs * rhs);
            }
        }

        result.normalize();
        result.remove_leading_zeroes();
        result
    }

    /// `2^exponent`, exact for negative exponents as well.
    ///
    /// Square-and-multiply over `|exponent|` with base two (`"2"` / `"10"`) or
    /// one half (`"0.5"` / `"0.1"`).
    pub fn pow2(exponent: i32) -> Self {
        let mut base = match (exponent < 0, B) {
            (false, 10) => Self::unit(2, 0),
            (false, _) => Self::unit(1, 1),
            (true, 10) => Self::unit(5, -1),
            (true, _) => Self::unit(1, -1),
        };

        let mut result = Self::one();
        let mut remaining = exponent.unsigned_abs();
        while remaining != 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining != 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the magnitude as digits of this base.
    ///
    /// Without `fraction_digits` the output runs from the most significant digit
    /// (or the units digit) down to the last nonzero fractional digit. With it,
    /// exactly that many digits follow the point, zero padded or cut at the exact
    /// digit.
    pub fn render(&self, fraction_digits: Option<usize>) -> String {
        let top = self.max_exponent().max(0);
        let bottom = match fraction_digits {
            Some(count) => -(count as i32),
            None => self.lowest_nonzero_exponent().map_or(0, |e| e.min(0)),
        };

        let mut out = String::with_capacity((top - bottom + 2) as usize);
        for exponent in (bottom..=top).rev() {
            out.push(char::from(b'0' + self.digit(exponent) as u8));
            if exponent == 0 && bottom < 0 {
                out.push('.');
            }
        }
        out
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<const B: u32> Default for DigitSequence<B> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const B: u32> PartialEq for DigitSequence<B> {
    /// Equal by value: zero padding at either end is not significant.
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl<const B: u32> Eq for DigitSequence<B> {}

impl<const B: u32> fmt::Debug for DigitSequence<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DigitSequence<{}>({}, min_exponent={}, len={})",
            B,
            self.render(None),
            self.min_exponent,
            self.digits.len()
        )
    }
}

impl<const B: u32> fmt::Display for DigitSequence<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type D10 = DecimalDigits;
    type D2 = BinaryDigits;

    const A: &str = "8094000771816950400149620195067932501401605744596371765723909060332939034523122198329375846139854323214793571617729921814045958609043811659877675975987108146371827389586515803354695786046642407688168818728896851610471357719917773827422626439471345328308554801542413154576618484677856740751938367615603";
    const B: &str = "10053057957491457118839699346741438756738045719001664951203992156293562211262736196072612002745359462122975448868414870014191451899596961181985079952895159626307008241269918316911384307256236430186397515815468925092485168527873579672318128387241818636387142543692330992668510389641122723354553097318898";
    const SUM: &str = "18147058729308407518989319541809371258139651463598036716927901216626501245785858394401987848885213785337769020486144791828237410508640772841862755928882267772678835630856434120266080093302878837874566334544365776702956526247791353499740754826713163964695697345234744147245128874318979464106491464934501";
    const PRODUCT: &str = "81369458867056388866901934520381444450629826768232073221651092640098489107163381248917379304458926780689047756979682514316609661113609420046632334393434365895797382063664703923874375591424753771003800508211716093209781555311822227369248588154584233940023334651862948264456804918823671481668553226534584785242895523377614023132583278539557933533222895049049889880899928348422176104260072311741631252677178358038373341385588660277857400367476114660281516305123546078476952596992372200762104218876036562260905052805734044631100874939607090469329033491948282258704139439851194056182428550517190728371565494";

    fn d10(text: &str) -> D10 {
        D10::parse(text).unwrap()
    }

    #[test]
    fn test_parse_layout() {
        let x = d10("1441431");
        assert_eq!(x.min_exponent(), 0);
        assert_eq!(x.len(), 7);
        assert_eq!(x.digit(0), 1);
        assert_eq!(x.digit(6), 1);
        assert_eq!(x.digit(7), 0);

        let y = d10("144.1431");
        assert_eq!(y.min_exponent(), -4);
        assert_eq!(y.max_exponent(), 2);
        assert_eq!(y.digit(-1), 1);
        assert_eq!(y.digit(-4), 1);
        assert_eq!(y.render(None), "144.1431");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(D10::parse("12a4"), Err(NumericError::InvalidInput));
        assert_eq!(D10::parse("1.2.3"), Err(NumericError::InvalidInput));
        assert_eq!(D10::parse("-5"), Err(NumericError::InvalidInput));
        assert_eq!(D2::parse("102"), Err(NumericError::InvalidInput));

        let degraded = D10::parse_or_zero("1.2.3");
        assert!(degraded.is_zero());
        assert_eq!(degraded.render(None), "0");
    }

    #[test]
    fn test_parse_strips_leading_zeroes() {
        let x = d10("000123");
        assert_eq!(x.len(), 3);
        assert_eq!(x.render(None), "123");
        assert_eq!(d10("0.50").render(None), "0.5");
    }

    #[test]
    fn test_add_small() {
        assert_eq!(d10("9").add(&d10("9")).render(None), "18");
        assert_eq!(
            d10("111229.733").add(&d10("229.833444")).render(None),
            "111459.566444"
        );
        assert_eq!(d10("101.001").add(&d10("1001.001")).render(None), "1102.002");
        assert_eq!(
            d10("0.00000035762786865234375").add(&d10("1")).render(None),
            "1.00000035762786865234375"
        );
    }

    #[test]
    fn test_add_large_literal() {
        assert_eq!(d10(A).add(&d10(B)).render(None), SUM);
    }

    #[test]
    fn test_mul_small() {
        assert_eq!(
            d10("3.1415").mul(&d10("11000001.0000002")).render(None),
            "34556503.1415006283"
        );
        assert_eq!(d10("111111111").mul(&d10("111111111")).render(None), "12345678987654321");
        assert_eq!(
            d10("1111111111").mul(&d10("1111111111")).render(None),
            "1234567900987654321"
        );
    }

    #[test]
    fn test_mul_large_literal() {
        assert_eq!(d10(A).mul(&d10(B)).render(None), PRODUCT);
    }

    #[test]
    fn test_pow2_decimal() {
        assert_eq!(D10::pow2(151).render(None), "2854495385411919762116571938898990272765493248");
        assert_eq!(D10::pow2(-3).render(None), "0.125");
        assert_eq!(D10::pow2(-2).render(None), "0.25");
        assert_eq!(D10::pow2(-1).render(None), "0.5");
        assert_eq!(D10::pow2(0).render(None), "1");
        assert_eq!(D10::pow2(1).render(None), "2");
        assert_eq!(D10::pow2(2).render(None), "4");
    }

    #[test]
    fn test_pow2_binary() {
        assert_eq!(D2::pow2(5).render(None), "100000");
        assert_eq!(D2::pow2(-3).render(None), "0.001");
        assert_eq!(D2::pow2(0).render(None), "1");
    }

    #[test]
    fn test_from_u64() {
        assert_eq!(D10::from_u64(35).render(None), "35");
        assert_eq!(D2::from_u64(35).render(None), "100011");
        assert_eq!(D10::from_u64(u64::MAX).render(None), u64::MAX.to_string());
        assert!(D10::from_u64(0).is_empty());
    }

    #[test]
    fn test_render_fixed_fraction() {
        let eighth = D10::pow2(-3);
        assert_eq!(eighth.render(Some(5)), "0.12500");
        assert_eq!(eighth.render(Some(2)), "0.12");
        assert_eq!(eighth.render(Some(0)), "0");
        assert_eq!(D10::zero().render(Some(3)), "0.000");
        assert_eq!(d10("42").render(Some(1)), "42.0");
    }

    #[test]
    fn test_value_equality_ignores_padding() {
        let padded = D10::pow2(-52).mul(&D10::pow2(52));
        assert_eq!(padded, D10::one());
        assert_eq!(padded.render(None), "1");
        assert_ne!(D10::one(), d10("2"));
    }

    #[test]
    fn test_carry_beyond_allocated_digits() {
        // Unnormalized input digits still carry out cleanly.
        let mut x = D10::allocate(0, 1);
        x.digits[0] = 123;
        x.normalize();
        assert_eq!(x.render(None), "123");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "outside allocated range")]
    fn test_out_of_range_digit_write_is_a_defect() {
        let mut x = D10::allocate(0, 2);
        x.add_to_digit(5, 1);
    }

    fn decimal_literal() -> impl Strategy<Value = String> {
        "[0-9]{1,300}(\\.[0-9]{1,40})?"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_add_commutative(a in decimal_literal(), b in decimal_literal()) {
            let (a, b) = (d10(&a), d10(&b));
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn prop_add_associative(
            a in decimal_literal(),
            b in decimal_literal(),
            c in decimal_literal(),
        ) {
            let (a, b, c) = (d10(&a), d10(&b), d10(&c));
            prop_assert_eq!(a.add(&b).add(&c), a.add(&b.add(&c)));
        }

        #[test]
        fn prop_mul_distributes_over_add(
            a in decimal_literal(),
            b in decimal_literal(),
            c in decimal_literal(),
        ) {
            let (a, b, c) = (d10(&a), d10(&b), d10(&c));
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
        }

        #[test]
        fn prop_binary_add_matches_integer_add(a in any::<u32>(), b in any::<u32>()) {
            let sum = D2::from_u64(a as u64).add(&D2::from_u64(b as u64));
            prop_assert_eq!(sum.render(None), format!("{:b}", a as u64 + b as u64));
        }

        #[test]
        fn prop_pow2_exponent_law(a in -64i32..=64, b in -64i32..=64) {
            prop_assert_eq!(D10::pow2(a).mul(&D10::pow2(b)), D10::pow2(a + b));
            prop_assert_eq!(D2::pow2(a).mul(&D2::pow2(b)), D2::pow2(a + b));
        }
    }
}
