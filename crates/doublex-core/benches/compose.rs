//! Benchmarks for the double exposure kernels.
//!
//! Run with: cargo bench -p doublex-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use doublex_core::pipeline::exposure::{resize_target, Exposure};
use image::{DynamicImage, Rgb, RgbImage};

fn sample(width: u32, height: u32, seed: u8) -> Exposure {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x as u8).wrapping_add(seed),
            (y as u8).wrapping_mul(seed),
            ((x ^ y) as u8).wrapping_add(seed),
        ])
    });
    Exposure::from_image(DynamicImage::ImageRgb8(img), false)
}

fn benchmark_brightness(c: &mut Criterion) {
    let exposure = sample(1920, 1080, 3);

    c.bench_function("scale_brightness_1080p", |b| {
        b.iter(|| {
            let mut e = exposure.clone();
            e.scale_brightness(black_box(0.5));
            e
        })
    });
}

fn benchmark_blend(c: &mut Criterion) {
    let a = sample(1920, 1080, 5);
    let b = sample(1920, 1080, 9);

    c.bench_function("saturating_add_1080p", |bench| {
        bench.iter(|| black_box(&a).add(black_box(&b)))
    });
}

fn benchmark_downsample(c: &mut Criterion) {
    let a = sample(1920, 1080, 7);
    let target = resize_target(a.dimensions(), (1600, 1200), 5);

    c.bench_function("downsample_1080p_to_target", |b| {
        b.iter(|| a.clone().downsample(black_box(target)))
    });
}

criterion_group!(
    benches,
    benchmark_brightness,
    benchmark_blend,
    benchmark_downsample
);
criterion_main!(benches);
