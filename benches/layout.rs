//! Benchmarks for matrix building and the per-event hot paths.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_precision_loss)]

use cellgrid::layout::{location_from_client, recalc_visible_range, CellMatrixBuilder, FavorScroll, StickyCounts};
use cellgrid::{Cell, CellMatrix, Column, Row, Viewport};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn declarations(rows: usize, cols: usize) -> (Vec<Row>, Vec<Column>) {
    let columns = (0..cols).map(|c| Column::new(format!("c{c}"))).collect();
    let rows = (0..rows)
        .map(|r| {
            let cells = (0..cols).map(|c| Cell::number((r * cols + c) as f64)).collect();
            Row::new(format!("r{r}"), cells)
        })
        .collect();
    (rows, columns)
}

fn sticky() -> StickyCounts {
    StickyCounts {
        top: 1,
        bottom: 1,
        left: 1,
        right: 0,
    }
}

fn build(rows: usize, cols: usize) -> CellMatrix {
    let (rows, columns) = declarations(rows, cols);
    CellMatrixBuilder::new(rows, columns)
        .sticky(sticky())
        .build()
        .expect("Failed to build matrix")
}

/// Building the matrix for growing row counts
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_matrix");
    for rows in [1_000, 10_000, 50_000] {
        let (decl_rows, decl_columns) = declarations(rows, 20);
        group.throughput(Throughput::Elements((rows * 20) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| {
                CellMatrixBuilder::new(black_box(decl_rows.clone()), black_box(decl_columns.clone()))
                    .sticky(sticky())
                    .build()
                    .expect("Failed to build matrix")
            })
        });
    }
    group.finish();
}

/// Recomputing the visible window deep into a large grid
fn bench_visible_range(c: &mut Criterion) {
    let matrix = build(50_000, 20);
    let mut viewport = Viewport::new(1280.0, 800.0);
    viewport.scroll_to(600.0, 400_000.0);

    c.bench_function("recalc_visible_range", |b| {
        b.iter(|| recalc_visible_range(black_box(&matrix), black_box(&viewport), false))
    });
}

/// Resolving a pointer position to a cell
fn bench_pointer(c: &mut Criterion) {
    let matrix = build(50_000, 20);
    let mut viewport = Viewport::new(1280.0, 800.0);
    viewport.scroll_to(600.0, 400_000.0);

    c.bench_function("location_from_client", |b| {
        b.iter(|| {
            location_from_client(
                black_box(&matrix),
                black_box(&viewport),
                black_box(640.0),
                black_box(420.0),
                FavorScroll::None,
            )
        })
    });
}

criterion_group!(benches, bench_build, bench_visible_range, bench_pointer);
criterion_main!(benches);
