// ============================================================================
// Exact Arithmetic and Editor Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Powers of Two - Building 2^k in both bases
// 2. Exact Rendering - Full-precision text for wide formats
// 3. Editor Stepping - Mutation plus display-cache recompute
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use floatinfo::prelude::*;
use std::hint::black_box;
use std::sync::Arc;

// ============================================================================
// Powers of Two
// ============================================================================

fn benchmark_pow2(c: &mut Criterion) {
    let mut group = c.benchmark_group("pow2");

    for exponent in [-1074, -126, 0, 127, 1023] {
        group.bench_with_input(BenchmarkId::from_parameter(exponent), &exponent, |b, k| {
            b.iter(|| black_box(ExactNumber::pow2(*k)));
        });
    }

    group.finish();
}

// ============================================================================
// Exact Rendering
// ============================================================================

fn benchmark_exact_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_rendering");

    let binary64 = Ieee754Codec::binary64();
    let cases = [
        ("one", 1.0f64.to_bits()),
        ("tenth", 0.1f64.to_bits()),
        ("max", f64::MAX.to_bits()),
        ("min_subnormal", 1),
    ];

    for (label, pattern) in cases {
        group.bench_with_input(BenchmarkId::new("binary64_base10", label), &pattern, |b, p| {
            b.iter(|| black_box(binary64.render_exact(*p, Radix::Decimal)));
        });
        group.bench_with_input(BenchmarkId::new("binary64_base2", label), &pattern, |b, p| {
            b.iter(|| black_box(binary64.render_exact(*p, Radix::Binary)));
        });
    }

    let posit64 = PositCodec::new(64).unwrap();
    group.bench_function("posit64_max", |b| {
        b.iter(|| black_box(posit64.render_exact(posit64.max_finite(), Radix::Decimal)));
    });

    group.finish();
}

// ============================================================================
// Editor Stepping
// ============================================================================

fn benchmark_editor_stepping(c: &mut Criterion) {
    let mut group = c.benchmark_group("editor_stepping");

    for type_code in [TypeCode::Binary16, TypeCode::Binary64, TypeCode::Posit32] {
        let mut editor = ValueEditor::for_type(type_code, Arc::new(NoOpEditHandler));
        editor.mutate(EditOp::SetOne, None);

        group.bench_function(BenchmarkId::new("next", type_code.name()), |b| {
            b.iter(|| black_box(editor.mutate(EditOp::Next, None)));
        });
    }

    let mut posit = ValueEditor::for_type(TypeCode::Posit16, Arc::new(NoOpEditHandler));
    group.bench_function("posit16_regime_round_trip", |b| {
        b.iter(|| {
            posit.mutate(EditOp::IncrementRegime, None);
            black_box(posit.mutate(EditOp::DecrementRegime, None))
        });
    });

    let facade = get_editor_by_type_code(TypeCode::Binary32.code()).unwrap();
    group.bench_function("facade_read_field", |b| {
        b.iter(|| black_box(facade.read_field(Field::ExactBase10.code())));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_pow2,
    benchmark_exact_rendering,
    benchmark_editor_stepping,
);
criterion_main!(benches);
