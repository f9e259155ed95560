// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for a full session: noise, every filter, report render.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{GrayImage, Luma};
use rand::SeedableRng;
use rand::rngs::StdRng;

use filterlab_core::{FilterMethod, FilterRequest, KernelSize, NoiseMode};
use filterlab_session::{Session, SessionSettings};

fn loaded_session() -> Session<StdRng> {
    let mut session = Session::with_rng(SessionSettings::default(), StdRng::seed_from_u64(7));
    session.load_image(
        "bench",
        GrayImage::from_fn(256, 256, |x, y| Luma([((x ^ y) % 256) as u8])),
    );
    session
}

fn bench_pipeline(c: &mut Criterion) {
    c.bench_function("session: noise + all filters (256x256)", |b| {
        b.iter(|| {
            let mut session = loaded_session();
            session.inject_noise(NoiseMode::SaltAndPepper).expect("noise");
            for method in FilterMethod::ALL {
                let request = FilterRequest::new(method, KernelSize::default());
                session.apply_filter(black_box(request)).expect("filter");
            }
            session
        });
    });
}

fn bench_report(c: &mut Criterion) {
    let mut session = loaded_session();
    for method in FilterMethod::ALL {
        session
            .apply_filter(FilterRequest::new(method, KernelSize::default()))
            .expect("filter");
    }
    c.bench_function("session: render report (6 pages)", |b| {
        b.iter(|| session.render_report().expect("render"));
    });
}

criterion_group!(benches, bench_pipeline, bench_report);
criterion_main!(benches);
