// ============================================================================
// Format Codec Interface
// Defines the contract shared by the IEEE 754 and posit codecs
// ============================================================================

use super::codes::{BitRole, EditOp};
use crate::domain::{Classification, Format};
use crate::numeric::{ExactNumber, Radix};

/// Pure functions over raw bit patterns of one format.
///
/// Patterns are right-aligned in a `u64`; bits above the format width are
/// ignored on input and always zero on output.
/// Implementations: Ieee754Codec, PositCodec.
pub trait FormatCodec: Send + Sync {
    /// Layout this codec works on
    fn format(&self) -> Format;

    /// Special-value class of a pattern
    fn classify(&self, pattern: u64) -> Classification;

    /// Exact signed value, `None` for NaN, infinities and NaR
    fn value(&self, pattern: u64) -> Option<ExactNumber>;

    /// Digits after the point needed to show the exact value of this
    /// pattern's binade. The count is the same in base 2 and base 10.
    fn fraction_digits(&self, pattern: u64) -> usize;

    /// Field that bit `index` belongs to
    fn bit_role(&self, pattern: u64, index: u32) -> BitRole;

    /// Apply a pattern-only edit.
    ///
    /// # Returns
    /// The new pattern, or `None` when the operation does not exist for this
    /// format (and for `LoadSerialized`, which needs a payload).
    fn apply(&self, op: EditOp, pattern: u64) -> Option<u64>;

    /// Sign bit
    fn sign(&self, pattern: u64) -> bool {
        (pattern >> (self.format().total_bits() - 1)) & 1 == 1
    }

    /// Exact text of a pattern: specials by name, finite values padded to
    /// [`fraction_digits`](Self::fraction_digits).
    fn render_exact(&self, pattern: u64, radix: Radix) -> String {
        match self.classify(pattern) {
            Classification::Infinite if self.sign(pattern) => "-inf".to_string(),
            Classification::Infinite => "inf".to_string(),
            Classification::QuietNaN => "Quiet NaN".to_string(),
            Classification::SignalingNaN => "Signaling NaN".to_string(),
            Classification::NaR => "NaR".to_string(),
            Classification::Zero | Classification::Subnormal | Classification::Normal => self
                .value(pattern)
                .unwrap_or_default()
                .render(radix, Some(self.fraction_digits(pattern))),
        }
    }
}
