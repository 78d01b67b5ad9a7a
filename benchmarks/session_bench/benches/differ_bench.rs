//! Benchmarks for the structural IR differ over synthetic modules of
//! increasing size, exercising the three nested alignment passes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use aion_differ::diff_modules;
use aion_ir::parse_module;

fn synthetic_module(function_count: usize, block_count: usize, instrs_per_block: usize) -> String {
    let mut src = String::new();
    for f in 0..function_count {
        src.push_str(&format!("define i32 @f{f}(i32) {{\n"));
        for b in 0..block_count {
            src.push_str(&format!("bb{b}:\n"));
            for i in 0..instrs_per_block {
                src.push_str(&format!("    %{i} = add i32 %0, {i}\n"));
            }
        }
        src.push_str("}\n\n");
    }
    src
}

fn bench_self_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("differ_self_diff");

    for size in [("small", 4, 2, 5), ("medium", 16, 4, 10), ("large", 64, 8, 20)] {
        let (name, functions, blocks, instrs) = size;
        let src = synthetic_module(functions, blocks, instrs);
        let module = parse_module(&src).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &module, |b, module| {
            b.iter(|| diff_modules(black_box(module), black_box(module)));
        });
    }

    group.finish();
}

fn bench_divergent_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("differ_divergent_diff");

    let before = parse_module(&synthetic_module(16, 4, 10)).unwrap();
    let mut after = parse_module(&synthetic_module(16, 4, 12)).unwrap();
    after.functions.truncate(12);

    group.bench_function("before_after", |b| {
        b.iter(|| diff_modules(black_box(&before), black_box(&after)));
    });

    group.finish();
}

criterion_group!(benches, bench_self_diff, bench_divergent_diff);
criterion_main!(benches);
