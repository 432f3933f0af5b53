use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use walkcount::{
    prelude::*,
    random::{random_candidates, random_graph_seeded},
};

fn strategies(c: &mut Criterion) {
    let graph = random_graph_seeded(52, 4, 7).unwrap();
    let candidates = random_candidates(&graph, 400, 8, 11).unwrap();
    let set = PrefixFreeSet::reduce(&graph, &candidates);

    let mut group = c.benchmark_group("strategies");
    for high in [11, 98] {
        for strategy in [Strategy::Cumulative, Strategy::Propagation] {
            let config = Config::default().with_high(high).with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), high),
                &config,
                |b, config| b.iter(|| black_box(count_walks(&graph, &set, config))),
            );
        }
    }
    group.finish();
}

fn reduction(c: &mut Criterion) {
    let graph = random_graph_seeded(52, 6, 3).unwrap();
    let candidates = random_candidates(&graph, 2000, 10, 5).unwrap();
    c.bench_function("reduce", |b| {
        b.iter(|| black_box(PrefixFreeSet::reduce(&graph, &candidates)))
    });
}

criterion_group!(benches, strategies, reduction);
criterion_main!(benches);
