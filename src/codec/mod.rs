// ============================================================================
// Codec Module
// Bit-field codecs for the two encoding families
// ============================================================================
//
// - Ieee754Codec: sign / biased exponent / mantissa
// - PositCodec: sign / regime / exponent / mantissa (es = 2)
// - Codec: closed enum over both, dispatched by match

mod ieee754;
mod posit;

pub use ieee754::Ieee754Codec;
pub use posit::PositCodec;

use crate::domain::{Classification, Format, FormatResult, TypeCode};
use crate::interfaces::{BitRole, EditOp, FormatCodec};
use crate::numeric::{ExactNumber, Radix};

/// Toggle bit `index`, or `None` when it lies outside the format.
pub(crate) fn flip_bit(format: Format, pattern: u64, index: u32) -> Option<u64> {
    (index < format.total_bits()).then(|| pattern ^ (1 << index))
}

/// Either codec, chosen from a [`Format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Ieee754(Ieee754Codec),
    Posit(PositCodec),
}

impl Codec {
    /// Build the codec for a layout after validating it.
    pub fn for_format(format: Format) -> FormatResult<Self> {
        Ok(match format {
            Format::Ieee754 { .. } => Codec::Ieee754(Ieee754Codec::from_format(format)?),
            Format::Posit { .. } => Codec::Posit(PositCodec::from_format(format)?),
        })
    }

    /// The codec as a trait object.
    #[inline]
    pub fn as_dyn(&self) -> &dyn FormatCodec {
        match self {
            Codec::Ieee754(codec) => codec,
            Codec::Posit(codec) => codec,
        }
    }
}

impl From<TypeCode> for Codec {
    /// Built-in layouts are valid by construction.
    fn from(type_code: TypeCode) -> Self {
        match type_code.format() {
            Format::Ieee754 {
                exponent_bits,
                mantissa_bits,
                ..
            } => Codec::Ieee754(Ieee754Codec::from_parts(exponent_bits, mantissa_bits)),
            Format::Posit { total_bits } => Codec::Posit(PositCodec::from_width(total_bits)),
        }
    }
}

impl FormatCodec for Codec {
    fn format(&self) -> Format {
        self.as_dyn().format()
    }

    fn classify(&self, pattern: u64) -> Classification {
        self.as_dyn().classify(pattern)
    }

    fn value(&self, pattern: u64) -> Option<ExactNumber> {
        self.as_dyn().value(pattern)
    }

    fn fraction_digits(&self, pattern: u64) -> usize {
        self.as_dyn().fraction_digits(pattern)
    }

    fn bit_role(&self, pattern: u64, index: u32) -> BitRole {
        self.as_dyn().bit_role(pattern, index)
    }

    fn apply(&self, op: EditOp, pattern: u64) -> Option<u64> {
        self.as_dyn().apply(op, pattern)
    }

    fn render_exact(&self, pattern: u64, radix: Radix) -> String {
        self.as_dyn().render_exact(pattern, radix)
    }
}
