//! Benchmarks for model evaluation
//!
//! Tests performance of:
//! - Full fit-mode evaluation (all traces materialized)
//! - Simulation with a seeded RNG
//! - The trace-free likelihood objective
//! - Batch scoring over a parameter grid

#![allow(clippy::expect_used)] // Fine in benchmarks

use associa_core::{
	fit, log_likelihood, log_likelihood_batch, simulate, ModelParams, RewardMatrix,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a probabilistic reversal-free bandit schedule
fn generate_rewards(n_trials: usize) -> RewardMatrix {
	let mut rng = rand::thread_rng();
	let option_1 = (0..n_trials)
		.map(|_| if rng.gen_bool(0.7) { 1.0 } else { 0.0 })
		.collect();
	let option_2 = (0..n_trials)
		.map(|_| if rng.gen_bool(0.3) { 1.0 } else { 0.0 })
		.collect();
	RewardMatrix::new(option_1, option_2).expect("rows have equal length")
}

/// Generate random 1-based choices
fn generate_choices(n_trials: usize) -> Vec<usize> {
	let mut rng = rand::thread_rng();
	(0..n_trials).map(|_| rng.gen_range(1..=2)).collect()
}

fn bench_fit(c: &mut Criterion) {
	let mut group = c.benchmark_group("fit");
	let params = ModelParams::default();

	for n_trials in &[100_usize, 500, 1000, 5000] {
		let rewards = generate_rewards(*n_trials);
		let choices = generate_choices(*n_trials);

		let _ = group.throughput(Throughput::Elements(*n_trials as u64));
		let _ = group.bench_with_input(BenchmarkId::new("trials", n_trials), n_trials, |bench, _| {
			bench.iter(|| fit(black_box(&params), black_box(&rewards), black_box(&choices)));
		});
	}

	group.finish();
}

fn bench_simulate(c: &mut Criterion) {
	let mut group = c.benchmark_group("simulate");
	let params = ModelParams::default();

	for n_trials in &[100_usize, 500, 1000, 5000] {
		let rewards = generate_rewards(*n_trials);
		let mut rng = StdRng::seed_from_u64(42);

		let _ = group.throughput(Throughput::Elements(*n_trials as u64));
		let _ = group.bench_with_input(BenchmarkId::new("trials", n_trials), n_trials, |bench, _| {
			bench.iter(|| simulate(black_box(&params), black_box(&rewards), &mut rng));
		});
	}

	group.finish();
}

fn bench_log_likelihood(c: &mut Criterion) {
	let mut group = c.benchmark_group("log_likelihood");
	let params = ModelParams::default();

	for n_trials in &[100_usize, 500, 1000, 5000] {
		let rewards = generate_rewards(*n_trials);
		let choices = generate_choices(*n_trials);

		let _ = group.throughput(Throughput::Elements(*n_trials as u64));
		let _ = group.bench_with_input(BenchmarkId::new("trials", n_trials), n_trials, |bench, _| {
			bench.iter(|| {
				log_likelihood(black_box(&params), black_box(&rewards), black_box(&choices))
			});
		});
	}

	group.finish();
}

fn bench_batch(c: &mut Criterion) {
	let mut group = c.benchmark_group("log_likelihood_batch");
	let rewards = generate_rewards(300);
	let choices = generate_choices(300);

	for steps in &[5_u32, 10, 20] {
		let grid: Vec<ModelParams> = (0..steps.pow(2))
			.map(|i| {
				let a = f64::from(i / steps + 1) / f64::from(steps + 1);
				let b = f64::from(i % steps + 1);
				ModelParams::new(a, b, 0.5, 0.5)
			})
			.collect();

		let _ = group.throughput(Throughput::Elements(grid.len() as u64));
		let _ = group.bench_with_input(BenchmarkId::new("grid", grid.len()), steps, |bench, _| {
			bench.iter(|| log_likelihood_batch(black_box(&grid), &rewards, &choices));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_fit, bench_simulate, bench_log_likelihood, bench_batch);

criterion_main!(benches);
