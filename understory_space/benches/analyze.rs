// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for punching and full analysis passes.
//!
//! Run with: cargo bench -p understory_space

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kurbo::{Insets, Rect, RoundedRectRadii};
use understory_space::{ElementFootprint, RectOps, SpaceAnalyzer};

const CANVAS: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

/// A grid of rounded cards, `n` per row, with gutters between them.
fn card_grid(n: usize) -> Vec<ElementFootprint> {
    let cell_w = CANVAS.width() / n as f64;
    let cell_h = CANVAS.height() / n as f64;
    (0..n * n)
        .map(|i| {
            let (col, row) = ((i % n) as f64, (i / n) as f64);
            ElementFootprint::from_element(
                Rect::new(
                    col * cell_w,
                    row * cell_h,
                    (col + 1.0) * cell_w,
                    (row + 1.0) * cell_h,
                ),
                Insets::uniform(8.0),
                RoundedRectRadii::from_single_radius(6.0),
                format!("card {i}"),
            )
        })
        .collect()
}

fn bench_punch(c: &mut Criterion) {
    let mut group = c.benchmark_group("space/punch");

    let cases = [
        ("disjoint", Rect::new(2000.0, 0.0, 2100.0, 100.0)),
        ("corner", Rect::new(-50.0, -50.0, 200.0, 200.0)),
        ("internal", Rect::new(400.0, 300.0, 800.0, 600.0)),
    ];
    for (name, remove) in cases {
        group.bench_function(name, |b| {
            b.iter(|| black_box(black_box(CANVAS).punch(black_box(remove))));
        });
    }

    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("space/reduce");
    let analyzer = SpaceAnalyzer::new();

    for n in [1, 2, 4, 6] {
        let footprints = card_grid(n);
        group.bench_with_input(
            BenchmarkId::new("card_grid", format!("{n}x{n}")),
            &footprints,
            |b, footprints| {
                b.iter(|| black_box(analyzer.reduce(CANVAS, black_box(footprints))));
            },
        );
    }

    let sidebar = [
        ElementFootprint::from_rect(Rect::new(0.0, 0.0, 320.0, 1080.0), "sidebar"),
        ElementFootprint::from_rect(Rect::new(320.0, 0.0, 1920.0, 48.0), "toolbar"),
    ];
    group.bench_function("sidebar_toolbar", |b| {
        b.iter(|| black_box(analyzer.reduce(CANVAS, black_box(&sidebar))));
    });

    group.finish();
}

criterion_group!(benches, bench_punch, bench_reduce);
criterion_main!(benches);
