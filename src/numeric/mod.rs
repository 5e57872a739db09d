// ============================================================================
// Numeric Module
// Exact dual-base arithmetic for rendering bit patterns without rounding
// ============================================================================
//
// This module provides:
// - DigitSequence<B>: positional digit store in base 2 or base 10
// - ExactNumber: one magnitude mirrored in both bases, plus a display sign
// - NumericError: Error types for parsing and conversion
//
// Only addition, multiplication and powers of two are needed to evaluate
// every IEEE 754 and posit bit pattern, so there is no subtraction or division.

mod digits;
mod errors;
mod exact_number;

pub use digits::{BinaryDigits, DecimalDigits, DigitSequence};
pub use errors::{NumericError, NumericResult};
pub use exact_number::{ExactNumber, Radix, ONE, TWO};
