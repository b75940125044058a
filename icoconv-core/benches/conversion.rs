// ABOUTME: Benchmark for the image to icon conversion pipeline
// ABOUTME: Measures end-to-end conversion across icon sizes and the glow pass on its own

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use icoconv_core::glow::apply_glow;
use icoconv_core::{ConversionOptions, IconConverter, TargetEdge};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn logo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - width as f32 / 2.0;
        let dy = y as f32 - height as f32 / 2.0;
        if dx * dx + dy * dy < (width.min(height) as f32 / 3.0).powi(2) {
            Rgba([240, 80, 20, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn png_bytes(image: RgbaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

fn benchmark_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let source = png_bytes(logo(512, 512));
    let hardened = IconConverter::new();
    let plain = IconConverter::with_options(ConversionOptions::builder().glow(false).build());

    for edge in [16u32, 32, 48, 256].iter() {
        let target = TargetEdge::new(*edge).unwrap();

        group.bench_with_input(BenchmarkId::new("hardened", edge), edge, |b, _| {
            b.iter(|| hardened.convert(&source, target).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("no_glow", edge), edge, |b, _| {
            b.iter(|| plain.convert(&source, target).unwrap());
        });
    }

    group.finish();
}

fn benchmark_glow(c: &mut Criterion) {
    let mut group = c.benchmark_group("glow");

    for size in [64u32, 256, 512].iter() {
        let image = logo(*size, *size);
        group.bench_with_input(BenchmarkId::new("apply_glow", size), size, |b, _| {
            b.iter(|| apply_glow(image.clone()));
        });
    }

    group.finish();
}

fn benchmark_oversized_clamp(c: &mut Criterion) {
    let source = png_bytes(logo(3000, 3000));
    let converter = IconConverter::new();
    let target = TargetEdge::new(48).unwrap();

    c.bench_function("convert_oversized_3000px", |b| {
        b.iter(|| converter.convert(&source, target).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_convert,
    benchmark_glow,
    benchmark_oversized_clamp
);
criterion_main!(benches);
