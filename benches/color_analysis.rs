use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgb, RgbImage};
use oklch_scan::aggregation::{build_tone_map, to_points, voxelize};
use oklch_scan::color::max_gamut_chroma;
use oklch_scan::extraction::extract_from_rgb;
use oklch_scan::{ExtractionConfig, GamutMapper, ToneMapConfig, VoxelConfig};

fn gradient(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) / 7 % 256) as u8])
    })
}

fn benchmark_extraction(c: &mut Criterion) {
    let img = gradient(1600, 1200);
    let config = ExtractionConfig::default();

    c.bench_function("extract_1600x1200", |b| {
        b.iter(|| extract_from_rgb(black_box(&img), &config).unwrap())
    });
}

fn benchmark_aggregation(c: &mut Criterion) {
    let table = extract_from_rgb(&gradient(700, 700), &ExtractionConfig::default()).unwrap();
    let points = to_points(&table.records);
    let voxel_config = VoxelConfig::default();
    let tone_config = ToneMapConfig::default();
    let mapper = GamutMapper::new();

    c.bench_function("to_points", |b| b.iter(|| to_points(black_box(&table.records))));
    c.bench_function("voxelize_12", |b| {
        b.iter(|| voxelize(black_box(&points), &voxel_config).unwrap())
    });
    c.bench_function("tone_map_default", |b| {
        b.iter(|| build_tone_map(black_box(&points), &tone_config, &mapper).unwrap())
    });
}

fn benchmark_gamut(c: &mut Criterion) {
    c.bench_function("max_gamut_chroma", |b| {
        b.iter(|| max_gamut_chroma(black_box(0.5), black_box(0.0)))
    });
}

criterion_group!(benches, benchmark_extraction, benchmark_aggregation, benchmark_gamut);
criterion_main!(benches);
