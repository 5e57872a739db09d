// ============================================================================
// Floatinfo Library
// Exact decoding and interactive editing of IEEE 754 and posit bit patterns
// ============================================================================

//! # Floatinfo
//!
//! Inspect and edit the bit patterns of binary floating-point formats and see
//! the exact value each pattern encodes, without any rounding.
//!
//! ## Features
//!
//! - **Exact arithmetic** on digit sequences kept in base 2 and base 10
//! - **IEEE 754** layouts of any width up to 64 bits (binary16/32/64, bfloat16,
//!   minifloat built in)
//! - **Posits** (es = 2) at 8, 16, 32 and 64 bits
//! - **Value editors** with field steppers, bit flips and `"hex:"` serialization
//! - **Integer-code facade** over nine process-wide editors for host UIs
//!
//! ## Example
//!
//! ```rust
//! use floatinfo::prelude::*;
//! use std::sync::Arc;
//!
//! let mut editor = ValueEditor::for_type(TypeCode::Binary32, Arc::new(NoOpEditHandler));
//!
//! editor.mutate(EditOp::SetOne, None);
//! editor.mutate(EditOp::Next, None);
//!
//! assert_eq!(editor.read_field(Field::Mantissa), "1");
//! assert_eq!(editor.read_field(Field::ExactBase10), "1.00000011920928955078125");
//! assert_eq!(editor.read_field(Field::Serialization), "hex:0100803f");
//!
//! // posits have no infinity
//! let mut posit = ValueEditor::for_type(TypeCode::Posit8, Arc::new(NoOpEditHandler));
//! assert!(!posit.mutate(EditOp::SetInfinity, None));
//! ```

pub mod codec;
pub mod domain;
pub mod editor;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::codec::{Codec, Ieee754Codec, PositCodec};
    pub use crate::domain::{
        Classification, EditorConfig, Format, FormatError, FormatResult, TypeCode,
        UnknownCodePolicy,
    };
    pub use crate::editor::{
        create_from_config, get_editor_by_type_code, EditorBuilder, EditorHandle, EditorSnapshot,
        ValueEditor,
    };
    pub use crate::interfaces::{
        BitRole, EditEvent, EditHandler, EditOp, Field, Flag, FormatCodec, LoggingEditHandler,
        NoOpEditHandler,
    };
    pub use crate::numeric::{ExactNumber, NumericError, Radix};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    fn editor(type_code: TypeCode) -> ValueEditor {
        ValueEditor::for_type(type_code, Arc::new(NoOpEditHandler))
    }

    #[test]
    fn test_binary64_one_and_its_successor() {
        let mut e = editor(TypeCode::Binary64);
        e.mutate(EditOp::SetOne, None);
        assert_eq!(e.pattern(), 1.0f64.to_bits());
        assert_eq!(e.value().unwrap().to_string(), "1");

        let before = e.snapshot();
        e.mutate(EditOp::Next, None);
        assert_eq!(e.pattern(), before.pattern + 1);
        assert_eq!(e.read_field(Field::Exponent), before.field(Field::Exponent).unwrap());
        assert_eq!(e.read_field(Field::Sign), "0");
        assert_eq!(e.read_field(Field::Mantissa), "1");
    }

    #[test]
    fn test_binary64_decodes_like_hardware() {
        let mut e = editor(TypeCode::Binary64);
        for value in [0.1f64, -2.5, 1e300, f64::MIN_POSITIVE, 5e-324] {
            let payload = format!(
                "hex:{}",
                value
                    .to_bits()
                    .to_le_bytes()
                    .iter()
                    .map(|b| format!("{b:02x}"))
                    .collect::<String>()
            );
            e.mutate(EditOp::LoadSerialized, Some(&payload));
            let exact: f64 = e.value().unwrap().render10(None).parse().unwrap();
            assert_eq!(exact, value, "{payload}");
        }
    }

    #[test]
    fn test_posit8_walk_covers_every_pattern() {
        let mut e = editor(TypeCode::Posit8);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..256 {
            seen.insert(e.pattern());
            e.mutate(EditOp::Next, None);
        }
        assert_eq!(seen.len(), 256);
        assert_eq!(e.pattern(), 0);
        assert_eq!(e.version(), 257);
    }

    #[test]
    fn test_permalink_restores_editor() {
        let mut source = editor(TypeCode::BFloat16);
        source.mutate(EditOp::SetMin, None);
        source.mutate(EditOp::Negate, None);

        let link = source.read_field(Field::Permalink).to_string();
        let (name, serialized) = link.trim_start_matches('#').split_once('=').unwrap();
        let type_code = TypeCode::from_name(name).unwrap();

        let mut target = editor(type_code);
        target.mutate(EditOp::LoadSerialized, Some(serialized));
        assert_eq!(target.pattern(), source.pattern());
        assert_eq!(target.read_field(Field::ExactBase2), source.read_field(Field::ExactBase2));
    }

    #[test]
    fn test_builder_editor_matches_builtin() {
        let custom = EditorBuilder::new("half")
            .ieee754(16, 5, 10)
            .with_initial_pattern(0x3555)
            .build(Arc::new(NoOpEditHandler))
            .unwrap();
        let mut builtin = editor(TypeCode::Binary16);
        builtin.mutate(EditOp::LoadSerialized, Some("hex:5535"));

        assert_eq!(custom.read_field(Field::ExactBase10), builtin.read_field(Field::ExactBase10));
        assert_eq!(custom.read_field(Field::ExactBase10), "0.333251953125");
    }
}
