//! Criterion benchmarks for teesheet critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Render: tee and weapon compositing
//! - Copy: cross-resolution part copy (resampling)
//! - Tint: HSL recoloring of body and feet

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::Rgba;
use teesheet::{Color, Gameskin, GameskinPart, PixelBuffer, Skin, SkinWeapon};

// =============================================================================
// Test Data Generators
// =============================================================================

fn make_sheet(columns: u32, rows: u32, unit: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(columns * unit, rows * unit);
    for y in 0..rows * unit {
        for x in 0..columns * unit {
            buffer.put_pixel(x, y, Rgba([(x % 256) as u8, (y % 256) as u8, 128, ((x + y) % 256) as u8]));
        }
    }
    buffer
}

fn make_skin(unit: u32) -> Skin {
    Skin::from_buffer(make_sheet(8, 4, unit)).expect("valid skin sheet")
}

fn make_gameskin(unit: u32) -> Gameskin {
    Gameskin::from_buffer(make_sheet(32, 16, unit)).expect("valid gameskin sheet")
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for unit in [32u32, 64, 128] {
        let mut skin = make_skin(unit);
        skin.set_orientation(30);
        group.bench_with_input(BenchmarkId::new("tee", unit), &skin, |b, skin| {
            b.iter(|| black_box(skin.render().expect("render")))
        });
    }

    let skin = make_skin(64);
    let gameskin = make_gameskin(64);
    let builder = SkinWeapon::new()
        .skin(&skin)
        .gameskin(&gameskin)
        .weapon(GameskinPart::Shotgun)
        .expect("weapon part");
    group.bench_function("weapon", |b| b.iter(|| black_box(builder.process().expect("process"))));

    group.finish();
}

fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy");
    let big = make_gameskin(128);
    let small = make_gameskin(32);

    group.bench_function("4x_to_1x", |b| {
        b.iter(|| {
            let mut target = small.clone();
            target.copy_parts(&big, GameskinPart::WEAPONS).expect("copy");
            black_box(target)
        })
    });
    group.bench_function("1x_to_4x", |b| {
        b.iter(|| {
            let mut target = big.clone();
            target.copy_parts(&small, GameskinPart::WEAPONS).expect("copy");
            black_box(target)
        })
    });

    group.finish();
}

fn bench_tint(c: &mut Criterion) {
    let mut group = c.benchmark_group("tint");

    for unit in [32u32, 128] {
        let skin = make_skin(unit);
        group.bench_with_input(BenchmarkId::new("color_tee", unit), &skin, |b, skin| {
            b.iter(|| {
                let mut skin = skin.clone();
                skin.color_tee(Color::rgb(200, 40, 40), Color::code(0x1b6f74)).expect("tint");
                black_box(skin)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_copy, bench_tint);
criterion_main!(benches);
