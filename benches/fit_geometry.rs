// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the hot geometry and classification paths.
//!
//! Measures the performance of:
//! - Best-fit dimension calculation (runs on every resize event)
//! - Link-pattern classification (runs once per item at open)

use criterion::{criterion_group, criterion_main, Criterion};
use lightbox_lens::geometry::{fit, Size};
use lightbox_lens::item::links::classify_link;
use std::hint::black_box;

/// Benchmark the best-fit calculator.
///
/// `fit` is called for every item on every container resize, so it has to
/// stay trivially cheap.
fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_geometry");

    let natural = Size::new(4032.0, 3024.0);
    let container = Size::new(1280.0, 720.0);

    group.bench_function("fit", |b| {
        b.iter(|| {
            black_box(fit(
                black_box(Some(natural)),
                black_box(container),
                1.0,
                16.0,
            ));
        });
    });

    group.finish();
}

/// Benchmark link classification across the supported pattern set.
fn bench_classify_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_geometry");

    let links = [
        "photo.jpg",
        "clip.mp4",
        "song.mp3",
        "https://youtu.be/dQw4w9WgXcQ?t=1m30s",
        "https://vimeo.com/123456789",
        "https://soundcloud.com/artist/track",
        "https://drive.google.com/file/d/FILE_ID/view",
        "https://www.dropbox.com/s/abc/photo.png?dl=0",
        "https://example.com/unmatched",
    ];

    group.bench_function("classify_link_all_patterns", |b| {
        b.iter(|| {
            for link in &links {
                black_box(classify_link(black_box(link)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_fit, bench_classify_link);
criterion_main!(benches);
