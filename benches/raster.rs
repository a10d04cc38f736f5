use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec4;
use rastile::prelude::*;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const TILE_SIZE: u32 = 64;

fn small_triangle(id: u32) -> RasterTriangle {
    RasterTriangle::setup_from_f32(id, (100.0, 100.0), (120.0, 100.0), (110.0, 120.0)).unwrap()
}

fn medium_triangle(id: u32) -> RasterTriangle {
    RasterTriangle::setup_from_f32(id, (100.0, 100.0), (300.0, 100.0), (200.0, 300.0)).unwrap()
}

fn large_triangle(id: u32) -> RasterTriangle {
    RasterTriangle::setup_from_f32(id, (50.0, 50.0), (750.0, 100.0), (400.0, 550.0)).unwrap()
}

fn benchmark_clipping(c: &mut Criterion) {
    let mut group = c.benchmark_group("clip_triangle");

    let inside = (
        Vec4::new(-0.5, -0.5, 0.0, 1.0),
        Vec4::new(0.5, -0.5, 0.0, 1.0),
        Vec4::new(0.0, 0.5, 0.0, 1.0),
    );
    let straddling = (
        Vec4::new(-0.5, -0.5, 0.0, 1.0),
        Vec4::new(2.0, 0.0, 0.0, 1.0),
        Vec4::new(0.0, 2.0, 0.0, 1.0),
    );

    for (name, (v0, v1, v2)) in [("inside", inside), ("straddling", straddling)] {
        let code = ClipCode::of(v0) | ClipCode::of(v1) | ClipCode::of(v2);
        group.bench_function(name, |b| {
            b.iter(|| {
                let poly = clip_triangle(black_box(v0), black_box(v1), black_box(v2), code);
                black_box(poly.points.len())
            })
        });
    }

    group.finish();
}

fn benchmark_binning(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_triangles");

    for (name, make) in [
        ("small", small_triangle as fn(u32) -> RasterTriangle),
        ("medium", medium_triangle),
        ("large", large_triangle),
    ] {
        let buffer: Vec<RasterTriangle> = (0..256).map(make).collect();
        let mut grid = TileGrid::new(WIDTH, HEIGHT, TILE_SIZE, 1).unwrap();

        group.bench_function(BenchmarkId::new("256", name), |b| {
            b.iter(|| {
                grid.reset();
                assign_triangles(0, black_box(&buffer), &mut grid);
            })
        });
    }

    group.finish();
}

fn benchmark_tile_rasterization(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_tile");

    for (name, make) in [
        ("small", small_triangle as fn(u32) -> RasterTriangle),
        ("medium", medium_triangle),
        ("large", large_triangle),
    ] {
        let buffer = vec![make(0)];
        let mut grid = TileGrid::new(WIDTH, HEIGHT, TILE_SIZE, 1).unwrap();
        assign_triangles(0, &buffer, &mut grid);

        // Rasterize the tile containing the first vertex
        let dim = grid.dim();
        let tile = (0..dim.x * dim.y)
            .map(|i| grid.tile(i % dim.x, i / dim.x))
            .find(|t| !t.assignments(0).is_empty())
            .unwrap();

        group.bench_function(name, |b| {
            b.iter(|| {
                let mut sink = PixelList::new();
                rasterize_tile(0, black_box(&buffer), tile, &mut sink);
                black_box(sink.pixels.len())
            })
        });
    }

    group.finish();
}

fn benchmark_frame(c: &mut Criterion) {
    let buffer: Vec<RasterTriangle> = (0..64).map(medium_triangle).collect();
    let mut grid = TileGrid::new(WIDTH, HEIGHT, TILE_SIZE, 1).unwrap();
    assign_triangles(0, &buffer, &mut grid);

    c.bench_function("rasterize_frame/64_medium", |b| {
        b.iter(|| {
            let coverage = rasterize_frame(black_box(&buffer), &grid);
            black_box(coverage.len())
        })
    });
}

criterion_group!(
    benches,
    benchmark_clipping,
    benchmark_binning,
    benchmark_tile_rasterization,
    benchmark_frame
);
criterion_main!(benches);
