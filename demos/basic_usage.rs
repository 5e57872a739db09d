// ============================================================================
// Basic Usage Example
// ============================================================================

use floatinfo::prelude::*;
use std::sync::Arc;

fn print_editor(editor: &ValueEditor) {
    println!("  pattern:   {}", editor.read_field(Field::BytesPretty));
    println!("  bits:      {}", editor.read_field(Field::BitString));
    println!(
        "  fields:    sign={} exponent={} mantissa={} regime={}",
        editor.read_field(Field::Sign),
        editor.read_field(Field::Exponent),
        editor.read_field(Field::Mantissa),
        editor.read_field(Field::Regime),
    );
    println!("  base 10:   {}", editor.read_field(Field::ExactBase10));
    println!("  base 2:    {}", editor.read_field(Field::ExactBase2));
    println!("  permalink: {}", editor.read_field(Field::Permalink));
}

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Floatinfo Example ===\n");

    // IEEE 754 half precision
    let mut half = ValueEditor::for_type(TypeCode::Binary16, Arc::new(LoggingEditHandler));
    half.mutate(EditOp::SetOne, None);
    println!("binary16 one:");
    print_editor(&half);

    half.mutate(EditOp::Next, None);
    println!("\nbinary16 next after one:");
    print_editor(&half);

    half.mutate(EditOp::SetMinSubnormal, None);
    println!("\nbinary16 smallest subnormal:");
    print_editor(&half);

    // Posit with a long regime
    let mut posit = ValueEditor::for_type(TypeCode::Posit16, Arc::new(LoggingEditHandler));
    posit.mutate(EditOp::SetOne, None);
    for _ in 0..3 {
        posit.mutate(EditOp::IncrementRegime, None);
    }
    println!("\nposit16 one, regime stepped three times:");
    print_editor(&posit);

    // Custom layout through the builder
    match EditorBuilder::new("fp24")
        .ieee754(24, 7, 16)
        .with_long_name("24-bit float (1+7+16)")
        .build(Arc::new(LoggingEditHandler))
    {
        Ok(mut fp24) => {
            fp24.mutate(EditOp::SetMax, None);
            println!("\n{} max:", fp24.long_name());
            print_editor(&fp24);
        },
        Err(err) => println!("\nfp24 rejected: {err}"),
    }

    // Integer-code facade, as a host UI would drive it
    println!("\n=== Facade ===");
    if let Some(handle) = get_editor_by_type_code(TypeCode::Binary32.code()) {
        handle.mutate(EditOp::LoadSerialized.code(), Some("hex:db0f4940"));
        for field in [Field::TypeNameLong, Field::ExactBase10, Field::Serialization] {
            if let Ok(text) = handle.read_field(field.code()) {
                println!("  {field:?}: {text}");
            }
        }
        println!("  is normal: {}", handle.read_flag(Flag::IsNormal.code()));
    }
}
