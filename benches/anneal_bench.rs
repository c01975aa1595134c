//! Criterion benchmarks for the u-anneal solver.
//!
//! Uses synthetic problems (Sphere function, permutation sorting) to
//! measure loop overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_anneal::{AnnealingMethods, AnnealingSolver, CoolingSchedule, Proposal, SolverConfig};

// ===========================================================================
// Sphere function: minimize sum(x_i^2), one coordinate nudged per move
// ===========================================================================

struct Sphere;

impl AnnealingMethods for Sphere {
    type State = Vec<f64>;
    type Move = (usize, f64);

    fn choose_move<R: Rng + ?Sized>(
        &mut self,
        x: &Vec<f64>,
        _iteration: u64,
        rng: &mut R,
    ) -> Proposal<(usize, f64)> {
        let i = rng.random_range(0..x.len());
        let step = rng.random_range(-0.5..0.5);
        let moved = x[i] + step;
        Proposal::new((i, step), moved * moved - x[i] * x[i])
    }

    fn apply_move(&mut self, mut x: Vec<f64>, (i, step): (usize, f64)) -> Vec<f64> {
        x[i] += step;
        x
    }
}

// ===========================================================================
// Permutation sorting: cost is the number of misplaced elements
// ===========================================================================

struct PermSort;

fn misplaced(perm: &[usize], i: usize, j: usize) -> i64 {
    (perm[i] != i) as i64 + (perm[j] != j) as i64
}

impl AnnealingMethods for PermSort {
    type State = Vec<usize>;
    type Move = (usize, usize);

    fn choose_move<R: Rng + ?Sized>(
        &mut self,
        perm: &Vec<usize>,
        _iteration: u64,
        rng: &mut R,
    ) -> Proposal<(usize, usize)> {
        let i = rng.random_range(0..perm.len());
        let j = rng.random_range(0..perm.len());
        let before = misplaced(perm, i, j);
        let after = (perm[j] != i) as i64 + (perm[i] != j) as i64;
        Proposal::new((i, j), (after - before) as f64)
    }

    fn apply_move(&mut self, mut perm: Vec<usize>, (i, j): (usize, usize)) -> Vec<usize> {
        perm.swap(i, j);
        perm
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal_sphere");
    group.sample_size(10);

    for &dim in &[10usize, 50, 100] {
        let start: Vec<f64> = (0..dim).map(|i| (i % 10) as f64 - 5.0).collect();
        group.bench_with_input(BenchmarkId::from_parameter(dim), &start, |b, start| {
            b.iter(|| {
                let config = SolverConfig::default()
                    .with_iteration_budget(10_000.0)
                    .with_seed(42);
                let mut solver = AnnealingSolver::with_config(Sphere, config);
                let outcome = solver.run(black_box(start.clone()), 10_000);
                black_box(outcome)
            })
        });
    }
    group.finish();
}

fn bench_perm_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal_perm_sort");
    group.sample_size(10);

    for (name, cooling) in [
        ("exponential", CoolingSchedule::Exponential),
        ("linear", CoolingSchedule::Linear),
    ] {
        let start: Vec<usize> = (0..50).rev().collect();
        group.bench_with_input(BenchmarkId::new(name, 50), &start, |b, start| {
            b.iter(|| {
                let config = SolverConfig::default()
                    .with_iteration_budget(20_000.0)
                    .with_cooling(cooling.clone())
                    .with_seed(42);
                let mut solver = AnnealingSolver::with_config(PermSort, config);
                // batched, as an interactive caller would drive it
                let mut perm = black_box(start.clone());
                for _ in 0..20 {
                    perm = solver.run(perm, 1_000).state;
                }
                black_box(perm)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sphere, bench_perm_sort);
criterion_main!(benches);
