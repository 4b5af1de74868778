// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for natural model-name comparison and sorting.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cupskit_sort::{compare_model_strings, sort_models};

// ---------------------------------------------------------------------------
// Helper: a driver list shaped like what a print server reports
// ---------------------------------------------------------------------------

fn driver_list(n: usize) -> Vec<String> {
    let vendors = ["Brother HL-", "Canon PIXMA MG", "Epson Stylus C", "HP LaserJet ", "Xerox Phaser "];
    (0..n)
        .map(|i| {
            let vendor = vendors[i % vendors.len()];
            // Scatter model numbers so the input is far from sorted.
            let number = (i * 7919) % 10_000;
            format!("{vendor}{number}dn Foomatic/Postscript (recommended)")
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark a single comparison that has to walk several runs.
fn bench_compare(c: &mut Criterion) {
    let a = "HP LaserJet 4050tn Foomatic/hpijs 3.0.2";
    let b = "HP LaserJet 4050tn Foomatic/hpijs 3.0.10";

    c.bench_function("compare_model_strings (shared prefix)", |bench| {
        bench.iter(|| compare_model_strings(black_box(a), black_box(b)));
    });

    // A digit run far wider than any machine integer.
    let wide_a = format!("Model {}", "9".repeat(256));
    let wide_b = format!("Model 1{}", "0".repeat(256));

    c.bench_function("compare_model_strings (256-digit run)", |bench| {
        bench.iter(|| compare_model_strings(black_box(&wide_a), black_box(&wide_b)));
    });
}

/// Benchmark sorting a realistic driver list.
fn bench_sort(c: &mut Criterion) {
    let drivers = driver_list(2_000);

    c.bench_function("sort_models (2000 drivers)", |bench| {
        bench.iter(|| {
            let mut list = drivers.clone();
            sort_models(black_box(&mut list));
            black_box(list);
        });
    });
}

criterion_group!(benches, bench_compare, bench_sort);
criterion_main!(benches);
