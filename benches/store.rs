//! 存储层性能基准测试

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use snaplink::storage::{MemoryStore, SqliteStore, Store};
use tempfile::TempDir;

fn open_sqlite(rt: &tokio::runtime::Runtime, dir: &TempDir) -> Arc<dyn Store> {
    let path = dir.path().join("bench.db");
    let store = rt
        .block_on(SqliteStore::open(path.to_str().unwrap()))
        .unwrap();
    Arc::new(store)
}

fn stores(rt: &tokio::runtime::Runtime, dir: &TempDir) -> Vec<(&'static str, Arc<dyn Store>)> {
    vec![
        ("memory", Arc::new(MemoryStore::new()) as Arc<dyn Store>),
        ("sqlite", open_sqlite(rt, dir)),
    ]
}

// ============== create 基准测试 ==============

fn bench_create(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let mut group = c.benchmark_group("store/create");

    for (name, store) in stores(&rt, &dir) {
        group.bench_with_input(BenchmarkId::from_parameter(name), &store, |b, store| {
            b.to_async(&rt).iter(|| {
                let store = store.clone();
                async move { store.create("https://example.com/benchmark").await.unwrap() }
            });
        });
    }

    group.finish();
}

// ============== get 基准测试 ==============

fn bench_get(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let mut group = c.benchmark_group("store/get");

    for (name, store) in stores(&rt, &dir) {
        let record = rt
            .block_on(store.create("https://example.com/benchmark-get"))
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(name), &store, |b, store| {
            b.to_async(&rt).iter(|| {
                let store = store.clone();
                let id = record.id.clone();
                async move { store.get(&id).await.unwrap() }
            });
        });
    }

    group.finish();
}

// ============== get_stats 基准测试 ==============

fn bench_get_stats(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let mut group = c.benchmark_group("store/get_stats");

    for (name, store) in stores(&rt, &dir) {
        rt.block_on(async {
            for i in 0..100 {
                store
                    .create(&format!("https://example.com/benchmark-stats-{}", i))
                    .await
                    .unwrap();
            }
        });

        group.bench_with_input(BenchmarkId::new(name, 100), &store, |b, store| {
            b.to_async(&rt).iter(|| {
                let store = store.clone();
                async move { store.get_stats().await.unwrap() }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create, bench_get, bench_get_stats);
criterion_main!(benches);
