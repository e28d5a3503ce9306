use criterion::{Criterion, criterion_group, criterion_main};
use njtree::matrix::q_matrix;
use njtree::{DistanceMatrix, NeighborJoining};
use std::hint::black_box;

const REGRESSION_SIZES: &[usize] = &[10, 50, 100];
const REPORTING_SIZES: &[usize] = &[250];

/// Symmetric pseudo-random distances, reproducible across runs.
fn generated_matrix(n: usize) -> DistanceMatrix {
    let labels = (0..n).map(|i| format!("t{i}")).collect();
    DistanceMatrix::from_fn(labels, |i, j| {
        let (a, b) = (i.min(j) as u64, i.max(j) as u64);
        let hash = (a * 2_654_435_761 + b * 40_503).wrapping_mul(0x9E37_79B9) % 1000;
        1.0 + hash as f64 / 10.0
    })
    .unwrap()
}

fn join_all(matrix: &DistanceMatrix) {
    let outcome = NeighborJoining::new().run(matrix.clone()).unwrap();
    black_box(outcome.tree);
}

fn neighbor_joining(c: &mut Criterion) {
    for &n in REGRESSION_SIZES {
        let matrix = generated_matrix(n);
        c.bench_function(&format!("nj-n{n}"), |b| {
            b.iter(|| join_all(&matrix));
        });
    }

    let matrix = generated_matrix(100);
    c.bench_function("q-matrix-n100", |b| {
        b.iter(|| black_box(q_matrix(&matrix)));
    });
}

fn neighbor_joining_reporting(c: &mut Criterion) {
    for &n in REPORTING_SIZES {
        let matrix = generated_matrix(n);
        c.bench_function(&format!("nj-n{n}"), |b| {
            b.iter(|| join_all(&matrix));
        });
    }
}

criterion_group!(regression, neighbor_joining);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = neighbor_joining_reporting
}
criterion_main!(regression, reporting);
