// ============================================================================
// Value Editor
// One bit pattern, its edit operations and a version-stamped display cache
// ============================================================================

use crate::codec::Codec;
use crate::domain::bits;
use crate::domain::{Classification, EditorConfig, Format, FormatResult, TypeCode, UnknownCodePolicy};
use crate::interfaces::{BitRole, EditEvent, EditHandler, EditOp, Field, Flag, FormatCodec};
use crate::numeric::{ExactNumber, Radix};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text shown for fields that do not exist in the editor's format.
pub const NOT_APPLICABLE: &str = "N/A";

// ============================================================================
// Display Cache
// ============================================================================

/// Decoded value and every field's text, stamped with the version they were
/// computed for.
#[derive(Debug, Clone)]
struct DisplayCache {
    version: u64,
    value: Option<ExactNumber>,
    fields: Vec<String>,
}

// ============================================================================
// Value Editor
// ============================================================================

/// Holds one bit pattern of one format and applies edit operations to it.
///
/// Every mutation bumps `version` and recomputes the decoded value and all
/// display strings before returning, so a reader never sees text from an
/// older pattern.
///
/// # Example
/// ```
/// use floatinfo::prelude::*;
/// use std::sync::Arc;
///
/// let mut editor = ValueEditor::for_type(TypeCode::Binary16, Arc::new(NoOpEditHandler));
/// editor.mutate(EditOp::SetOne, None);
/// assert_eq!(editor.read_field(Field::ByteString), "003c");
/// assert_eq!(editor.read_field(Field::ExactBase10), "1.0000000000");
///
/// editor.mutate(EditOp::Next, None);
/// assert_eq!(editor.read_field(Field::ExactBase10), "1.0009765625");
/// ```
pub struct ValueEditor {
    /// Short type name (e.g. "binary16")
    name: String,

    /// Human-readable type name
    long_name: String,

    /// Codec for the editor's format
    codec: Codec,

    /// Current bit pattern
    pattern: u64,

    /// Monotonic edit counter, starts at 1
    version: u64,

    /// Handling of unknown or inapplicable codes
    policy: UnknownCodePolicy,

    /// Derived state for the current version
    cache: DisplayCache,

    /// Observer for applied edits
    event_handler: Arc<dyn EditHandler>,
}

impl ValueEditor {
    /// Create an editor from a validated configuration.
    pub fn new(config: EditorConfig, event_handler: Arc<dyn EditHandler>) -> FormatResult<Self> {
        config.validate()?;
        let codec = Codec::for_format(config.format)?;
        Ok(Self::from_parts(config, codec, event_handler))
    }

    /// Editor for a built-in format, starting at the all-zero pattern.
    pub fn for_type(type_code: TypeCode, event_handler: Arc<dyn EditHandler>) -> Self {
        Self::from_parts(
            EditorConfig::for_type(type_code),
            Codec::from(type_code),
            event_handler,
        )
    }

    fn from_parts(config: EditorConfig, codec: Codec, event_handler: Arc<dyn EditHandler>) -> Self {
        let mut editor = Self {
            name: config.name,
            long_name: config.long_name,
            codec,
            pattern: config.initial_pattern & config.format.mask(),
            version: 1,
            policy: config.unknown_code_policy,
            cache: DisplayCache {
                version: 0,
                value: None,
                fields: Vec::new(),
            },
            event_handler,
        };
        editor.recompute();
        editor
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn format(&self) -> Format {
        self.codec.format()
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Current bit pattern.
    #[inline]
    pub fn pattern(&self) -> u64 {
        self.pattern
    }

    /// Edit counter; changes on every mutation (see [`UnknownCodePolicy`]).
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn unknown_code_policy(&self) -> UnknownCodePolicy {
        self.policy
    }

    /// Exact value of the current pattern; `None` for NaN, infinities and NaR.
    pub fn value(&self) -> Option<&ExactNumber> {
        self.cache.value.as_ref()
    }

    pub fn classification(&self) -> Classification {
        self.codec.classify(self.pattern)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Cached text of a field.
    pub fn read_field(&self, field: Field) -> &str {
        debug_assert_eq!(self.cache.version, self.version, "display cache is stale");
        self.cache
            .fields
            .get(field.index())
            .map_or(NOT_APPLICABLE, String::as_str)
    }

    /// Integer query: 1/0, a bit-role code, or -1 when it does not apply.
    pub fn read_flag(&self, flag: Flag) -> i32 {
        let classification = self.classification();
        let is_ieee754 = self.format().is_ieee754();

        match flag {
            Flag::IsIeee754 => i32::from(is_ieee754),
            Flag::IsPosit => i32::from(!is_ieee754),
            Flag::IsAny => 1,
            Flag::IsNormal if is_ieee754 => i32::from(classification == Classification::Normal),
            Flag::IsSubnormal if is_ieee754 => i32::from(matches!(
                classification,
                Classification::Zero | Classification::Subnormal
            )),
            Flag::IsNormal | Flag::IsSubnormal => -1,
            Flag::IsFraction | Flag::IsInteger if !classification.is_finite() => -1,
            Flag::IsFraction => i32::from(self.codec.fraction_digits(self.pattern) > 0),
            Flag::IsInteger => i32::from(self.codec.fraction_digits(self.pattern) == 0),
            Flag::BitRole(index) => self.codec.bit_role(self.pattern, index).code(),
        }
    }

    /// Role of every bit, least significant first.
    pub fn bit_roles(&self) -> Vec<BitRole> {
        (0..self.format().total_bits())
            .map(|index| self.codec.bit_role(self.pattern, index))
            .collect()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Apply an edit.
    ///
    /// `payload` is only read by `LoadSerialized`; a missing or malformed
    /// payload loads the all-zero pattern.
    ///
    /// # Returns
    /// `true` when the operation exists for this format.
    pub fn mutate(&mut self, op: EditOp, payload: Option<&str>) -> bool {
        if op == EditOp::LoadSerialized {
            self.load_serialized(payload.unwrap_or_default());
            return true;
        }

        match self.codec.apply(op, self.pattern) {
            Some(pattern) => {
                let before = self.pattern;
                self.pattern = pattern;
                self.bump();
                self.event_handler.on_event(EditEvent::Applied {
                    type_name: self.name.clone(),
                    op,
                    before,
                    after: pattern,
                    version: self.version,
                });
                true
            },
            None => {
                self.unapplied(op.code());
                false
            },
        }
    }

    /// Apply an edit by integer code. Unknown codes follow the editor's
    /// [`UnknownCodePolicy`].
    pub fn mutate_code(&mut self, code: i32, payload: Option<&str>) -> bool {
        match EditOp::from_code(code) {
            Ok(op) => self.mutate(op, payload),
            Err(err) => {
                tracing::debug!(editor = %self.name, %err, "ignoring edit");
                self.unapplied(code);
                false
            },
        }
    }

    /// Replace the pattern from its `"hex:"` serialization.
    fn load_serialized(&mut self, payload: &str) {
        let before = self.pattern;
        match bits::parse_serialized(payload, self.format()) {
            Ok(pattern) => {
                self.pattern = pattern;
                self.bump();
                self.event_handler.on_event(EditEvent::Applied {
                    type_name: self.name.clone(),
                    op: EditOp::LoadSerialized,
                    before,
                    after: pattern,
                    version: self.version,
                });
            },
            Err(err) => {
                tracing::warn!(editor = %self.name, %err, "loading zero pattern");
                self.pattern = 0;
                self.bump();
                self.event_handler.on_event(EditEvent::PayloadRejected {
                    type_name: self.name.clone(),
                    payload: payload.to_string(),
                    reason: err.to_string(),
                    version: self.version,
                });
            },
        }
    }

    fn unapplied(&mut self, code: i32) {
        let version_bumped = self.policy == UnknownCodePolicy::BumpVersion;
        if version_bumped {
            self.bump();
        }
        self.event_handler.on_event(EditEvent::Unapplied {
            type_name: self.name.clone(),
            code,
            version_bumped,
            version: self.version,
        });
    }

    fn bump(&mut self) {
        self.version += 1;
        self.recompute();
    }

    // ========================================================================
    // Cache
    // ========================================================================

    fn recompute(&mut self) {
        let value = self.codec.value(self.pattern);
        let fields = Field::ALL
            .iter()
            .map(|field| self.render_field(*field, value.as_ref()))
            .collect();
        self.cache = DisplayCache {
            version: self.version,
            value,
            fields,
        };
    }

    /// Exact text from the decoded value; specials have no value and render
    /// by name.
    fn render_exact(&self, value: Option<&ExactNumber>, radix: Radix) -> String {
        match value {
            Some(value) => value.render(radix, Some(self.codec.fraction_digits(self.pattern))),
            None => self.codec.render_exact(self.pattern, radix),
        }
    }

    fn render_field(&self, field: Field, value: Option<&ExactNumber>) -> String {
        let format = self.format();
        let pattern = self.pattern;

        match (&self.codec, field) {
            (_, Field::Sign) => u8::from(self.codec.sign(pattern)).to_string(),
            (Codec::Ieee754(ieee), Field::Exponent) => ieee.decode(pattern).exponent.to_string(),
            (Codec::Posit(posit), Field::Exponent) => posit.decode(pattern).exponent.to_string(),
            (Codec::Ieee754(ieee), Field::Mantissa) => ieee.decode(pattern).mantissa.to_string(),
            (Codec::Posit(posit), Field::Mantissa) => posit.decode(pattern).mantissa.to_string(),
            (Codec::Ieee754(ieee), Field::MantissaBits) => ieee.mantissa_bits().to_string(),
            (Codec::Posit(posit), Field::MantissaBits) => {
                posit.widths(pattern).mantissa_bits.to_string()
            },
            (Codec::Posit(posit), Field::Regime) => posit.decode(pattern).regime.to_string(),
            (Codec::Ieee754(ieee), Field::Normalized) => {
                if ieee.is_nan_or_inf(pattern) {
                    NOT_APPLICABLE.to_string()
                } else {
                    u8::from(ieee.decode(pattern).exponent != 0).to_string()
                }
            },
            (Codec::Ieee754(ieee), Field::ExponentBias) => ieee.exponent_bias().to_string(),
            (Codec::Ieee754(_), Field::Regime)
            | (Codec::Posit(_), Field::Normalized | Field::ExponentBias) => {
                NOT_APPLICABLE.to_string()
            },
            (_, Field::BitString) => bits::bit_string(pattern, format),
            (_, Field::BytesPretty) => bits::bytes_pretty(pattern, format),
            (_, Field::ByteString) => bits::byte_string(pattern, format),
            (_, Field::Serialization) => bits::to_serialization(pattern, format),
            (_, Field::Permalink) => bits::permalink(&self.name, pattern, format),
            (_, Field::TypeName) => self.name.clone(),
            (_, Field::TypeNameLong) => self.long_name.clone(),
            (_, Field::ExactBase10) => self.render_exact(value, Radix::Decimal),
            (_, Field::ExactBase2) => self.render_exact(value, Radix::Binary),
        }
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Every readable field and flag of the current version.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            type_name: self.name.clone(),
            version: self.version,
            pattern: self.pattern,
            classification: self.classification(),
            fields: Field::ALL
                .iter()
                .map(|field| (*field, self.read_field(*field).to_string()))
                .collect(),
            flags: FLAG_QUERIES
                .iter()
                .map(|flag| (*flag, self.read_flag(*flag)))
                .collect(),
            bit_roles: self.bit_roles(),
        }
    }
}

impl std::fmt::Debug for ValueEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueEditor")
            .field("name", &self.name)
            .field("pattern", &format_args!("{:#x}", self.pattern))
            .field("version", &self.version)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Flags that do not take a bit index.
const FLAG_QUERIES: [Flag; 7] = [
    Flag::IsNormal,
    Flag::IsSubnormal,
    Flag::IsFraction,
    Flag::IsInteger,
    Flag::IsIeee754,
    Flag::IsPosit,
    Flag::IsAny,
];

// ============================================================================
// Editor Snapshot
// ============================================================================

/// Plain copy of an editor's readable state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditorSnapshot {
    pub type_name: String,
    pub version: u64,
    pub pattern: u64,
    pub classification: Classification,
    pub fields: Vec<(Field, String)>,
    pub flags: Vec<(Flag, i32)>,
    pub bit_roles: Vec<BitRole>,
}

impl EditorSnapshot {
    /// Text of one field.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, text)| text.as_str())
    }

    /// Serialize to JSON for host integration.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NoOpEditHandler;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<EditEvent>>);

    impl EditHandler for Recording {
        fn on_event(&self, event: EditEvent) {
            self.0.lock().push(event);
        }
    }

    fn editor(type_code: TypeCode) -> ValueEditor {
        ValueEditor::for_type(type_code, Arc::new(NoOpEditHandler))
    }

    #[test]
    fn test_initial_state() {
        let e = editor(TypeCode::Binary32);
        assert_eq!(e.pattern(), 0);
        assert_eq!(e.version(), 1);
        assert_eq!(e.read_field(Field::TypeName), "binary32");
        assert_eq!(e.read_field(Field::TypeNameLong), "IEEE 754 32-bit Float (binary32)");
        assert_eq!(e.read_field(Field::Serialization), "hex:00000000");
        assert_eq!(e.value().map(|v| v.to_string()), Some("0".to_string()));
    }

    #[test]
    fn test_every_mutation_bumps_version() {
        let mut e = editor(TypeCode::Binary16);
        let ops = [
            EditOp::SetOne,
            EditOp::Next,
            EditOp::Prev,
            EditOp::Negate,
            EditOp::IncrementExponent,
            EditOp::DecrementMantissa,
            EditOp::FlipBit(3),
            EditOp::SetZero,
        ];
        for (idx, op) in ops.into_iter().enumerate() {
            assert!(e.mutate(op, None));
            assert_eq!(e.version(), idx as u64 + 2);
        }
    }

    #[test]
    fn test_ieee754_fields() {
        let mut e = editor(TypeCode::Binary16);
        e.mutate(EditOp::SetOne, None);
        e.mutate(EditOp::Negate, None);

        assert_eq!(e.pattern(), 0xbc00);
        assert_eq!(e.read_field(Field::Sign), "1");
        assert_eq!(e.read_field(Field::Exponent), "15");
        assert_eq!(e.read_field(Field::Mantissa), "0");
        assert_eq!(e.read_field(Field::MantissaBits), "10");
        assert_eq!(e.read_field(Field::ExponentBias), "15");
        assert_eq!(e.read_field(Field::Normalized), "1");
        assert_eq!(e.read_field(Field::Regime), NOT_APPLICABLE);
        assert_eq!(e.read_field(Field::BitString), "0000000000111101");
        assert_eq!(e.read_field(Field::BytesPretty), "0x00 0xbc (little endian)");
        assert_eq!(e.read_field(Field::Permalink), "#binary16=hex:00bc");
        assert_eq!(e.read_field(Field::ExactBase10), "-1.0000000000");
        assert_eq!(e.read_field(Field::ExactBase2), "-1.0000000000");
    }

    #[test]
    fn test_ieee754_specials() {
        let mut e = editor(TypeCode::Binary64);
        e.mutate(EditOp::SetInfinity, None);
        assert_eq!(e.read_field(Field::ExactBase10), "inf");
        assert_eq!(e.read_field(Field::Normalized), NOT_APPLICABLE);
        assert!(e.value().is_none());

        // negate leaves infinities alone; flipping the sign bit does not
        let pattern = e.pattern();
        e.mutate(EditOp::Negate, None);
        assert_eq!(e.pattern(), pattern);
        assert_eq!(e.read_field(Field::ExactBase10), "inf");

        e.mutate(EditOp::FlipBit(63), None);
        assert_eq!(e.read_field(Field::ExactBase2), "-inf");

        e.mutate(EditOp::SetQuietNaN, None);
        assert_eq!(e.read_field(Field::ExactBase10), "Quiet NaN");
        e.mutate(EditOp::SetSignalingNaN, None);
        assert_eq!(e.read_field(Field::ExactBase10), "Signaling NaN");
    }

    #[test]
    fn test_posit_fields() {
        let mut e = editor(TypeCode::Posit8);
        assert!(e.mutate(EditOp::LoadSerialized, Some("hex:75")));
        assert_eq!(e.pattern(), 0x75);
        assert_eq!(e.read_field(Field::Regime), "2");
        assert_eq!(e.read_field(Field::Exponent), "2");
        assert_eq!(e.read_field(Field::Mantissa), "1");
        assert_eq!(e.read_field(Field::MantissaBits), "1");
        assert_eq!(e.read_field(Field::ExponentBias), NOT_APPLICABLE);
        assert_eq!(e.read_field(Field::ExactBase10), "1536");
        assert_eq!(e.read_field(Field::BytesPretty), "0x75");

        e.mutate(EditOp::SetNaR, None);
        assert_eq!(e.read_field(Field::ExactBase10), "NaR");
        assert_eq!(e.read_field(Field::Sign), "1");
    }

    #[test]
    fn test_cached_exact_text_matches_codec() {
        for type_code in [TypeCode::Minifloat, TypeCode::Posit8] {
            let mut e = editor(type_code);
            let codec = Codec::from(type_code);
            for pattern in 0..=0xffu64 {
                e.mutate(EditOp::LoadSerialized, Some(&format!("hex:{pattern:02x}")));
                assert_eq!(e.pattern(), pattern);
                for radix in [Radix::Decimal, Radix::Binary] {
                    let field = match radix {
                        Radix::Decimal => Field::ExactBase10,
                        Radix::Binary => Field::ExactBase2,
                    };
                    assert_eq!(
                        e.read_field(field),
                        codec.render_exact(pattern, radix),
                        "{type_code} {pattern:#x}"
                    );
                }
            }
        }

        let mut e = editor(TypeCode::Binary64);
        e.mutate(EditOp::SetMinSubnormal, None);
        assert_eq!(
            e.read_field(Field::ExactBase10),
            e.value().unwrap().render10(Some(1074))
        );
        assert_eq!(e.read_field(Field::ExactBase2), format!("0.{}1", "0".repeat(1073)));
    }

    #[test]
    fn test_flags_ieee754() {
        let mut e = editor(TypeCode::Binary16);
        assert_eq!(e.read_flag(Flag::IsIeee754), 1);
        assert_eq!(e.read_flag(Flag::IsPosit), 0);
        assert_eq!(e.read_flag(Flag::IsAny), 1);
        // zero counts as subnormal
        assert_eq!(e.read_flag(Flag::IsSubnormal), 1);
        assert_eq!(e.read_flag(Flag::IsNormal), 0);

        e.mutate(EditOp::SetMax, None);
        assert_eq!(e.read_flag(Flag::IsNormal), 1);
        assert_eq!(e.read_flag(Flag::IsInteger), 1);
        assert_eq!(e.read_flag(Flag::IsFraction), 0);

        e.mutate(EditOp::SetOne, None);
        assert_eq!(e.read_flag(Flag::IsFraction), 1);

        e.mutate(EditOp::SetInfinity, None);
        assert_eq!(e.read_flag(Flag::IsNormal), 0);
        assert_eq!(e.read_flag(Flag::IsFraction), -1);
        assert_eq!(e.read_flag(Flag::IsInteger), -1);

        assert_eq!(e.read_flag(Flag::BitRole(0)), BitRole::Mantissa.code());
        assert_eq!(e.read_flag(Flag::BitRole(10)), BitRole::Exponent.code());
        assert_eq!(e.read_flag(Flag::BitRole(15)), BitRole::Sign.code());
        assert_eq!(e.read_flag(Flag::BitRole(16)), BitRole::OutOfBounds.code());
    }

    #[test]
    fn test_flags_posit() {
        let mut e = editor(TypeCode::Posit16);
        assert_eq!(e.read_flag(Flag::IsPosit), 1);
        assert_eq!(e.read_flag(Flag::IsNormal), -1);
        assert_eq!(e.read_flag(Flag::IsSubnormal), -1);
        assert_eq!(e.read_flag(Flag::IsInteger), 1);

        e.mutate(EditOp::SetMax, None);
        assert_eq!(e.read_flag(Flag::BitRole(0)), BitRole::Regime.code());
        assert_eq!(e.read_flag(Flag::IsInteger), 1);

        e.mutate(EditOp::SetEpsilon, None);
        assert_eq!(e.read_flag(Flag::IsFraction), 1);

        e.mutate(EditOp::SetNaR, None);
        assert_eq!(e.read_flag(Flag::IsFraction), -1);
    }

    #[test]
    fn test_unknown_code_bumps_version_by_default() {
        let mut e = editor(TypeCode::Binary16);
        e.mutate(EditOp::SetOne, None);
        let version = e.version();

        assert!(!e.mutate_code(0, None));
        assert!(!e.mutate_code(9999, None));
        assert_eq!(e.pattern(), 0x3c00);
        assert_eq!(e.version(), version + 2);
        assert_eq!(e.read_field(Field::ByteString), "003c");
    }

    #[test]
    fn test_ignore_policy_is_strict_noop() {
        let config = EditorConfig::binary16().with_unknown_code_policy(UnknownCodePolicy::Ignore);
        let mut e = ValueEditor::new(config, Arc::new(NoOpEditHandler)).unwrap();
        let version = e.version();

        assert!(!e.mutate_code(-1, None));
        assert!(!e.mutate(EditOp::SetNaR, None));
        assert!(!e.mutate(EditOp::FlipBit(40), None));
        assert_eq!(e.version(), version);
        assert_eq!(e.pattern(), 0);
    }

    #[test]
    fn test_inapplicable_ops() {
        let mut ieee = editor(TypeCode::Minifloat);
        assert!(!ieee.mutate(EditOp::IncrementRegime, None));
        assert!(!ieee.mutate(EditOp::FlipBit(8), None));
        assert!(ieee.mutate(EditOp::FlipBit(7), None));
        assert_eq!(ieee.pattern(), 0x80);

        let mut posit = editor(TypeCode::Posit32);
        assert!(!posit.mutate(EditOp::SetInfinity, None));
        assert!(!posit.mutate(EditOp::SetMinSubnormal, None));
        assert_eq!(posit.pattern(), 0);
    }

    #[test]
    fn test_load_serialized() {
        let mut e = editor(TypeCode::Binary32);
        assert!(e.mutate_code(EditOp::LoadSerialized.code(), Some("hex:0000803f")));
        assert_eq!(e.pattern(), 1.0f32.to_bits() as u64);
        assert_eq!(e.read_field(Field::Serialization), "hex:0000803f");

        // malformed payloads degrade to zero
        let version = e.version();
        assert!(e.mutate(EditOp::LoadSerialized, Some("hex:0000803")));
        assert_eq!(e.pattern(), 0);
        assert_eq!(e.version(), version + 1);

        e.mutate(EditOp::SetOne, None);
        assert!(e.mutate(EditOp::LoadSerialized, None));
        assert_eq!(e.pattern(), 0);
    }

    #[test]
    fn test_serialization_round_trip_through_editor() {
        let mut source = editor(TypeCode::Binary64);
        source.mutate(EditOp::SetEpsilon, None);
        let serialized = source.read_field(Field::Serialization).to_string();

        let mut target = editor(TypeCode::Binary64);
        target.mutate(EditOp::LoadSerialized, Some(&serialized));
        assert_eq!(target.pattern(), f64::EPSILON.to_bits());
        assert_eq!(
            target.read_field(Field::ExactBase10),
            source.read_field(Field::ExactBase10)
        );
    }

    #[test]
    fn test_events_are_reported() {
        let handler = Arc::new(Recording::default());
        let mut e = ValueEditor::for_type(TypeCode::Posit8, handler.clone());

        e.mutate(EditOp::SetOne, None);
        e.mutate_code(4, None);
        e.mutate(EditOp::LoadSerialized, Some("bogus"));

        let events = handler.0.lock();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            EditEvent::Applied {
                type_name: "posit8".to_string(),
                op: EditOp::SetOne,
                before: 0,
                after: 0x40,
                version: 2,
            }
        );
        assert!(matches!(
            events[1],
            EditEvent::Unapplied {
                code: 4,
                version_bumped: true,
                version: 3,
                ..
            }
        ));
        assert!(matches!(events[2], EditEvent::PayloadRejected { version: 4, .. }));
    }

    #[test]
    fn test_next_walks_to_infinity_and_stops() {
        let mut e = editor(TypeCode::Binary64);
        e.mutate(EditOp::SetMax, None);
        e.mutate(EditOp::Next, None);
        assert_eq!(e.read_field(Field::ExactBase10), "inf");
        let pattern = e.pattern();
        e.mutate(EditOp::Next, None);
        assert_eq!(e.pattern(), pattern);
    }

    #[test]
    fn test_snapshot() {
        let mut e = editor(TypeCode::Posit8);
        e.mutate(EditOp::SetOne, None);
        let snapshot = e.snapshot();

        assert_eq!(snapshot.type_name, "posit8");
        assert_eq!(snapshot.version, 2);
        assert_eq!(snapshot.pattern, 0x40);
        assert_eq!(snapshot.classification, Classification::Normal);
        assert_eq!(snapshot.field(Field::ExactBase10), Some("1.000"));
        assert_eq!(snapshot.fields.len(), Field::COUNT);
        assert!(snapshot.flags.contains(&(Flag::IsPosit, 1)));
        assert_eq!(snapshot.bit_roles.len(), 8);
        assert_eq!(snapshot.bit_roles[7], BitRole::Sign);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_json() {
        let e = editor(TypeCode::Minifloat);
        let json = e.snapshot().to_json().unwrap();
        assert!(json.contains("\"type_name\":\"minifloat\""));
        let back: EditorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e.snapshot());
    }
}
