#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use skyfade_propagation::mobility::{ConstantPositionModel, Position};
use skyfade_propagation::model::{
    LogDistanceModel, LogNormalShadowingModel, LossChainBuilder, PropagationLossModel,
};

/// Benchmark chained power evaluation over a two-link chain.
fn benchmark_chain_throughput(c: &mut Criterion) {
    let num_events = 10_000;

    let mut chain = LossChainBuilder::new()
        .push(Box::new(LogDistanceModel::new()))
        .push(Box::new(LogNormalShadowingModel::new()))
        .build()
        .expect("chain has two links");
    // Fixed stream index for reproducibility.
    chain.assign_streams(0);

    let a = ConstantPositionModel::new(Position::new(0.0, 0.0, 0.0));
    let b = ConstantPositionModel::new(Position::new(120.0, 35.0, 10.0));

    c.bench_function("chain_rx_power", |bench| {
        bench.iter(|| {
            for _ in 0..num_events {
                black_box(chain.calc_rx_power(black_box(14.0), &a, &b));
            }
        })
    });
}

criterion_group!(benches, benchmark_chain_throughput);
criterion_main!(benches);
