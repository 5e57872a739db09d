// ============================================================================
// Numeric Errors
// Error types for exact digit-sequence arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur while building or converting exact numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Literal contained a character outside the base's digits, or a second '.'
    InvalidInput,
    /// A digit store was addressed outside its allocated exponent range
    DigitOutOfRange,
    /// Conversion would lose significant digits
    PrecisionLoss,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidInput => write!(f, "invalid input: could not parse digits"),
            NumericError::DigitOutOfRange => {
                write!(f, "digit store accessed outside its exponent range")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
