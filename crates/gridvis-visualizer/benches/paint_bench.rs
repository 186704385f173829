//! Benchmarks for replaying a grid scene.
//!
//! Run with:
//! `cargo bench -p gridvis-visualizer --bench paint_bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridvis_core::{GridLine, GridRect, Size};
use gridvis_visualizer::{
    GridVisualization, HeadlessToolkit, RasterSurface, RecordingSurface, Visualization,
    Visualizer,
};
use std::hint::black_box;
use std::sync::Arc;

fn scene(shapes: usize) -> Arc<GridVisualization> {
    let toolkit = HeadlessToolkit::new().expect("headless toolkit");
    let grid = GridVisualization::new(&Visualizer::with_toolkit(toolkit));
    grid.show_axes(true).expect("axes");
    for i in 0..shapes {
        let x = (i % 40) as f64 - 20.0;
        let y = (i / 40) as f64 - 10.0;
        if i % 3 == 0 {
            grid.add_grid_line(GridLine::from_coords(x, y, x + 1.0, y + 1.0))
                .expect("line");
        } else {
            grid.add_grid_rectangle(GridRect::new(x, y, 0.8, 0.8))
                .expect("rect");
        }
    }
    grid
}

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/paint");
    for shapes in [10usize, 100, 1000] {
        let grid = scene(shapes);
        group.throughput(Throughput::Elements(shapes as u64));

        group.bench_with_input(BenchmarkId::new("recording", shapes), &grid, |b, grid| {
            b.iter(|| {
                let mut surface = RecordingSurface::new(Size::new(730, 470));
                grid.paint(&mut surface).expect("paint");
                black_box(surface.ops().len());
            });
        });

        let mut raster = RasterSurface::new(Size::new(730, 470)).expect("surface");
        group.bench_with_input(BenchmarkId::new("raster", shapes), &grid, |b, grid| {
            b.iter(|| {
                grid.paint(&mut raster).expect("paint");
                black_box(raster.pixel(365, 235));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_paint);
criterion_main!(benches);
