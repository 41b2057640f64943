//! Benchmarks for the hot inner loops: greedy construction, the
//! row-weighting local search, and large-neighbourhood search, on
//! synthetic instances of varying size.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use setcover::algorithms::formatter::AlgorithmParameters;
use setcover::algorithms::greedy::greedy;
use setcover::algorithms::lns::large_neighborhood_search;
use setcover::algorithms::row_weighting::local_search_row_weighting;
use setcover::instance::InstanceBuilder;
use setcover::types::Counter;
use setcover::Instance;

/// A synthetic "random cover" instance: `n` elements, each covered by a
/// handful of the `n / 3` sets, so every greedy/local-search run has real
/// marginal-cost decisions to make.
fn random_cover_instance(n: usize) -> Instance {
    let n_sets = (n / 3).max(1);
    let mut builder = InstanceBuilder::new();
    for element_id in 0..n {
        // Every element covered by 3 sets spread across the set range,
        // deterministic so benchmark runs are repeatable.
        for k in 0..3 {
            let set_id = (element_id + k * 7) % n_sets;
            builder.add_arc(set_id, element_id);
        }
    }
    for set_id in 0..n_sets {
        builder.set_cost(set_id, 1 + (set_id % 5) as i64);
    }
    builder.build().expect("every element has three covering sets")
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    for n in [100, 500, 2_000].iter() {
        let instance = Arc::new(random_cover_instance(*n));
        group.bench_with_input(BenchmarkId::new("elements", n), n, |b, _| {
            b.iter(|| greedy(black_box(&instance)));
        });
    }
    group.finish();
}

fn bounded_parameters(max_iterations: Counter) -> AlgorithmParameters {
    AlgorithmParameters {
        maximum_number_of_iterations: Some(max_iterations),
        ..Default::default()
    }
}

fn bench_row_weighting(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_weighting");
    for n in [100, 500, 2_000].iter() {
        let instance = Arc::new(random_cover_instance(*n));
        let initial = greedy(&instance);
        group.bench_with_input(BenchmarkId::new("elements", n), n, |b, _| {
            b.iter(|| {
                local_search_row_weighting(
                    Arc::clone(&instance),
                    initial.clone(),
                    true,
                    bounded_parameters(200),
                )
            });
        });
    }
    group.finish();
}

fn bench_lns(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_neighborhood_search");
    for n in [100, 500, 2_000].iter() {
        let instance = Arc::new(random_cover_instance(*n));
        let initial = greedy(&instance);
        group.bench_with_input(BenchmarkId::new("elements", n), n, |b, _| {
            b.iter(|| {
                large_neighborhood_search(Arc::clone(&instance), initial.clone(), bounded_parameters(200), 2)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_greedy, bench_row_weighting, bench_lns);
criterion_main!(benches);
