//! Quote benchmark
//!
//! Target: well under 10μs per quote (priced on every builder interaction)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use moracat_pricing::cost_plus::{AddOn, CatProfile, CostPlusEngine, Duration, SubscriptionConfig};
use moracat_pricing::retail::{calculate_retail_price, CatType, RetailConfig};
use moracat_pricing::Tier;

fn cost_plus_benchmark(c: &mut Criterion) {
    let engine = CostPlusEngine::new();
    let mut group = c.benchmark_group("cost_plus");

    for tier in Tier::ALL {
        let config = SubscriptionConfig::new(tier, CatProfile::MultiCat)
            .with_duration(Duration::Annual)
            .with_add_on(AddOn::TreatPack, 2)
            .with_add_on(AddOn::ExtraLitter, 10);

        group.bench_with_input(BenchmarkId::from_parameter(tier), &config, |b, config| {
            b.iter(|| black_box(engine.calculate(black_box(config))))
        });
    }

    group.finish();
}

fn retail_benchmark(c: &mut Criterion) {
    let config = RetailConfig::new(Tier::Premium, CatType::Adult);

    c.bench_function("retail", |b| {
        b.iter(|| black_box(calculate_retail_price(black_box(&config))))
    });
}

criterion_group!(benches, cost_plus_benchmark, retail_benchmark);
criterion_main!(benches);
