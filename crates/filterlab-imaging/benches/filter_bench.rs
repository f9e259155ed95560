// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the spatial filters in the filterlab-imaging crate.
// The mode filter is the only hand-rolled neighbourhood operator, so it is
// measured across the full kernel range; the others run once at 3x3.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use image::{GrayImage, Luma};

use filterlab_core::{FilterMethod, KernelSize};
use filterlab_imaging::apply_method;

/// 128x128 test card: diagonal gradient with a bright square in the middle.
fn test_card() -> GrayImage {
    let mut img = GrayImage::from_fn(128, 128, |x, y| Luma([((x + y) % 256) as u8]));
    for y in 48..80 {
        for x in 48..80 {
            img.put_pixel(x, y, Luma([240u8]));
        }
    }
    img
}

fn bench_mode_filter(c: &mut Criterion) {
    let image = test_card();
    let mut group = c.benchmark_group("mode_filter (128x128)");
    for k in [3u32, 7, 15] {
        let size = KernelSize::new(k).expect("valid kernel size");
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| apply_method(black_box(&image), FilterMethod::Mode, size));
        });
    }
    group.finish();
}

fn bench_all_methods(c: &mut Criterion) {
    let image = test_card();
    let size = KernelSize::default();
    for method in FilterMethod::ALL {
        c.bench_function(&format!("{} (128x128, 3x3)", method.label()), |b| {
            b.iter(|| apply_method(black_box(&image), method, size));
        });
    }
}

criterion_group!(benches, bench_mode_filter, bench_all_methods);
criterion_main!(benches);
