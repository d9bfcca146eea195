//! Ranking throughput over synthetic catalogs
//!
//! ```bash
//! cargo bench --bench ranking
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use purchase_intent_engine::prelude::*;

const CPU_TIERS: [CpuTier; 4] = [
    CpuTier::Entry,
    CpuTier::Mainstream,
    CpuTier::Performance,
    CpuTier::Enthusiast,
];

const GPU_TIERS: [GpuTier; 4] = [
    GpuTier::Entry,
    GpuTier::Mainstream,
    GpuTier::Performance,
    GpuTier::Enthusiast,
];

fn synthetic_catalog(size: usize) -> Vec<ProductSpec> {
    (0..size)
        .map(|i| {
            let gpu = if i % 3 == 0 {
                GpuSpec::integrated()
            } else {
                GpuSpec::dedicated(GPU_TIERS[i % 4], 4 << (i % 3))
            };
            ProductSpec::new(format!("p{}", i), "Synthetic", 1000.0 + (i % 60) as f64 * 100.0)
                .with_category(Category::Notebook)
                .with_attributes(HardwareProfile {
                    cpu_tier: Some(CPU_TIERS[i % 4]),
                    gpu: Some(gpu),
                    ram_gb: Some(8 << (i % 3)),
                    storage: Some(StorageSpec {
                        kind: StorageKind::Ssd,
                        capacity_gb: 256 << (i % 4),
                    }),
                    screen: Some(ScreenSpec {
                        size_inches: 15.6,
                        refresh_hz: 60 + (i % 4) as u32 * 30,
                    }),
                    battery_hours: Some(4.0 + (i % 8) as f32),
                })
        })
        .collect()
}

fn intent() -> Intent {
    IntentCapture::new()
        .select_category("notebook")
        .and_then(|c| c.select_budget("3000-5000"))
        .and_then(|c| c.toggle_usage("gaming_heavy"))
        .and_then(|c| c.toggle_usage("programming"))
        .and_then(|c| c.confirm_usages())
        .and_then(|c| c.set_specs("16GB RAM, SSD 1TB"))
        .and_then(|c| c.complete())
        .ok()
        .and_then(|c| c.intent().cloned())
        .expect("valid intent")
}

fn bench_rank(c: &mut Criterion) {
    let intent = intent();
    let pipeline = RankingPipeline::default();
    let mut group = c.benchmark_group("rank");

    for size in [100usize, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("aggregate", size), &catalog, |b, catalog| {
            b.iter(|| pipeline.rank(black_box(&intent), black_box(catalog), SortKey::Aggregate))
        });
        group.bench_with_input(BenchmarkId::new("price", size), &catalog, |b, catalog| {
            b.iter(|| pipeline.rank(black_box(&intent), black_box(catalog), SortKey::Price))
        });
    }
    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let intent = intent();
    let product = synthetic_catalog(1).remove(0);
    c.bench_function("score_single", |b| {
        b.iter(|| score(black_box(&intent), black_box(&product)))
    });
}

fn bench_cached(c: &mut Criterion) {
    let intent = intent();
    let pipeline = RankingPipeline::default();
    let cache = RecommendationCache::new(&CacheConfig::default());
    let catalog = Catalog::new("bench", synthetic_catalog(1_000));

    c.bench_function("rank_cached_1000", |b| {
        b.iter(|| cache.get_or_rank(&pipeline, black_box(&intent), &catalog, SortKey::Aggregate))
    });
}

criterion_group!(benches, bench_rank, bench_score, bench_cached);
criterion_main!(benches);
