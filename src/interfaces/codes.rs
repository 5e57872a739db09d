// ============================================================================
// Code Tables
// Closed integer enumerations shared with the host UI
// ============================================================================
//
// The integer values are part of the external contract and never change.
// Indexed codes (bit roles, bit flips) cover bit indices 0..64.

use crate::domain::{FormatError, FormatResult, MAX_BITS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Bit Role
// ============================================================================

/// Which field a single bit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum BitRole {
    Mantissa = 1,
    Exponent = 2,
    Sign = 3,
    Regime = 4,
    OutOfBounds = 5,
}

impl BitRole {
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}

// ============================================================================
// Field
// ============================================================================

/// Readable text fields of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum Field {
    Sign = 1,
    Exponent = 2,
    Mantissa = 3,
    MantissaBits = 4,
    Regime = 5,
    Normalized = 6,
    ExponentBias = 7,
    BitString = 9,
    BytesPretty = 10,
    Permalink = 11,
    TypeName = 12,
    TypeNameLong = 13,
    ExactBase10 = 14,
    ExactBase2 = 15,
    ByteString = 16,
    Serialization = 17,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Sign,
        Field::Exponent,
        Field::Mantissa,
        Field::MantissaBits,
        Field::Regime,
        Field::Normalized,
        Field::ExponentBias,
        Field::BitString,
        Field::BytesPretty,
        Field::Permalink,
        Field::TypeName,
        Field::TypeNameLong,
        Field::ExactBase10,
        Field::ExactBase2,
        Field::ByteString,
        Field::Serialization,
    ];

    /// Number of slots in a per-field table.
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Dense index into a per-field table.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or_default()
    }

    pub fn from_code(code: i32) -> FormatResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.code() == code)
            .ok_or(FormatError::UnknownCode { kind: "field", code })
    }
}

// ============================================================================
// Flag
// ============================================================================

/// Integer-valued queries. Answers are 1/0, a [`BitRole`] code, or -1 when
/// the query does not apply to the current pattern or format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Flag {
    IsNormal,
    IsSubnormal,
    IsFraction,
    IsInteger,
    IsIeee754,
    IsPosit,
    IsAny,
    /// Role of bit `i`, `i` counted from the least significant bit
    BitRole(u32),
}

impl Flag {
    const BIT_ROLE_BASE: i32 = 8;

    pub fn code(self) -> i32 {
        match self {
            Flag::IsNormal => 1,
            Flag::IsSubnormal => 2,
            Flag::IsFraction => 3,
            Flag::IsInteger => 4,
            Flag::IsIeee754 => 5,
            Flag::IsPosit => 6,
            Flag::IsAny => 7,
            Flag::BitRole(idx) => indexed_code(Self::BIT_ROLE_BASE, idx),
        }
    }

    pub fn from_code(code: i32) -> FormatResult<Self> {
        Ok(match code {
            1 => Flag::IsNormal,
            2 => Flag::IsSubnormal,
            3 => Flag::IsFraction,
            4 => Flag::IsInteger,
            5 => Flag::IsIeee754,
            6 => Flag::IsPosit,
            7 => Flag::IsAny,
            _ => match bit_index(code, Self::BIT_ROLE_BASE) {
                Some(idx) => Flag::BitRole(idx),
                None => return Err(FormatError::UnknownCode { kind: "flag", code }),
            },
        })
    }
}

// ============================================================================
// Edit Operation
// ============================================================================

/// Mutations an editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EditOp {
    SetZero,
    SetOne,
    SetNaR,
    SetInfinity,
    SetQuietNaN,
    SetSignalingNaN,
    /// Smallest positive normal (IEEE 754) or smallest positive (posit)
    SetMin,
    SetMax,
    SetEpsilon,
    SetMinSubnormal,
    Negate,
    Prev,
    Next,
    IncrementMantissa,
    DecrementMantissa,
    IncrementExponent,
    DecrementExponent,
    IncrementRegime,
    DecrementRegime,
    /// Replace the pattern from a `"hex:"` payload
    LoadSerialized,
    /// Toggle bit `i`, `i` counted from the least significant bit
    FlipBit(u32),
}

impl EditOp {
    const FLIP_BIT_BASE: i32 = 21;

    const FIXED: [EditOp; 20] = [
        EditOp::SetZero,
        EditOp::SetOne,
        EditOp::SetNaR,
        EditOp::SetInfinity,
        EditOp::SetQuietNaN,
        EditOp::SetSignalingNaN,
        EditOp::SetMin,
        EditOp::SetMax,
        EditOp::SetEpsilon,
        EditOp::SetMinSubnormal,
        EditOp::Negate,
        EditOp::Prev,
        EditOp::Next,
        EditOp::IncrementMantissa,
        EditOp::DecrementMantissa,
        EditOp::IncrementExponent,
        EditOp::DecrementExponent,
        EditOp::IncrementRegime,
        EditOp::DecrementRegime,
        EditOp::LoadSerialized,
    ];

    pub fn code(self) -> i32 {
        match self {
            EditOp::FlipBit(idx) => indexed_code(Self::FLIP_BIT_BASE, idx),
            fixed => Self::FIXED
                .iter()
                .position(|op| *op == fixed)
                .map_or(0, |idx| idx as i32 + 1),
        }
    }

    pub fn from_code(code: i32) -> FormatResult<Self> {
        if (1..Self::FLIP_BIT_BASE).contains(&code) {
            return Ok(Self::FIXED[(code - 1) as usize]);
        }
        bit_index(code, Self::FLIP_BIT_BASE)
            .map(EditOp::FlipBit)
            .ok_or(FormatError::UnknownCode { kind: "edit", code })
    }
}

/// `base + index`, saturating at `i32::MAX` so that indices past the last
/// representable code still map to a code `from_code` rejects.
fn indexed_code(base: i32, index: u32) -> i32 {
    i32::try_from(index)
        .ok()
        .and_then(|idx| base.checked_add(idx))
        .unwrap_or(i32::MAX)
}

/// `code - base` when it is a valid bit index.
fn bit_index(code: i32, base: i32) -> Option<u32> {
    code.checked_sub(base)
        .and_then(|idx| u32::try_from(idx).ok())
        .filter(|idx| *idx < MAX_BITS)
}
