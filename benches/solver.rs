//! Criterion benchmarks for the maze solver.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use unmaze::generate::carve;
use unmaze::grid::Grid;
use unmaze::solver::Solver;

fn solve(mut grid: Grid) -> u64 {
    let mut solver = Solver::new(&grid).unwrap();
    solver.run(&mut grid).unwrap();
    solver.steps()
}

/// Full solves of perfect mazes of increasing size.
fn bench_solve_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_size");

    for size in [15u32, 31, 63, 127].iter() {
        let grid = carve(*size, *size, 42, 0.0).unwrap();
        group.throughput(Throughput::Elements((*size as u64) * (*size as u64)));

        group.bench_with_input(BenchmarkId::new("perfect", size), &grid, |b, grid| {
            b.iter(|| black_box(solve(grid.clone())));
        });
    }

    group.finish();
}

/// Same size, more loops.
fn bench_solve_braid(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_braid");

    for braid in [0.0f32, 0.1, 0.3, 0.6].iter() {
        let grid = carve(63, 63, 7, *braid).unwrap();
        group.bench_with_input(BenchmarkId::new("63x63", braid), &grid, |b, grid| {
            b.iter(|| black_box(solve(grid.clone())));
        });
    }

    group.finish();
}

/// Share-code encode and decode.
fn bench_codec(c: &mut Criterion) {
    let grid = carve(127, 127, 3, 0.2).unwrap();
    let code = grid.serialize();

    c.bench_function("serialize_127", |b| b.iter(|| black_box(grid.serialize())));
    c.bench_function("deserialize_127", |b| {
        b.iter(|| black_box(Grid::from_code(&code).unwrap()))
    });
}

criterion_group!(benches, bench_solve_sizes, bench_solve_braid, bench_codec);
criterion_main!(benches);
