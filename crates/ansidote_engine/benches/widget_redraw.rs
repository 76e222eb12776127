//! Benchmarks for redrawing the picker widgets
//!
//! Every selection repaints the whole surface, so redraw cost is what the
//! user feels when clicking through the pickers.

use ansidote_engine::{BitFont, CharacterMap, Palette, PaletteData, Position};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

// ============================================================================
// Test data creation helpers
// ============================================================================

/// Raw 8x16 font with a checkerboard in every glyph
fn create_font() -> BitFont {
    let data: Vec<u8> = (0..256 * 16).map(|i| if i % 2 == 0 { 0xAA } else { 0x55 }).collect();
    BitFont::from_bytes("bench", &data).unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_character_map_redraw(c: &mut Criterion) {
    let font = create_font();
    let mut group = c.benchmark_group("character_map_redraw");

    for width in [320u32, 640, 1280] {
        let mut map = CharacterMap::new(width, 400, &font, Default::default());
        group.throughput(Throughput::Elements(map.glyphs().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                map.redraw();
                black_box(map.surface());
            });
        });
    }
    group.finish();
}

fn bench_character_map_select(c: &mut Criterion) {
    let font = create_font();
    let mut map = CharacterMap::new(640, 400, &font, Default::default());
    let columns = map.columns();
    let count = map.glyphs().len();

    c.bench_function("character_map_select", |b| {
        let mut i = 0;
        b.iter(|| {
            let pos = Position::from_linear_index(i % count, columns);
            black_box(map.select(pos.x, pos.y));
            i += 7;
        });
    });
}

fn bench_palette_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette_redraw");

    for (name, colors) in [("dos", PaletteData::dos_default()), ("cube", PaletteData::color_cube())] {
        let mut palette = Palette::new(300, 300, colors);
        group.throughput(Throughput::Elements(palette.colors().len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                palette.redraw();
                black_box(palette.surface());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_character_map_redraw, bench_character_map_select, bench_palette_redraw);
criterion_main!(benches);
