//! 工具函数性能基准测试

use criterion::{Criterion, criterion_group, criterion_main};
use snaplink::utils::url_validator::validate_url;
use snaplink::utils::{generate_id, is_valid_id};

// ============== generate_id 基准测试 ==============

fn bench_generate_id(c: &mut Criterion) {
    c.bench_function("utils/generate_id", |b| {
        b.iter(|| generate_id().unwrap());
    });
}

// ============== is_valid_id 基准测试 ==============

fn bench_is_valid_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_id");

    group.bench_function("valid", |b| {
        b.iter(|| {
            assert!(is_valid_id("aB3-_z"));
        });
    });

    group.bench_function("invalid_length", |b| {
        b.iter(|| {
            assert!(!is_valid_id("nonexistent"));
        });
    });

    group.finish();
}

// ============== validate_url 基准测试 ==============

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("valid_simple", |b| {
        b.iter(|| validate_url("https://example.com").is_ok());
    });

    group.bench_function("valid_with_query", |b| {
        b.iter(|| validate_url("https://example.com/path?query=value&other=123#frag").is_ok());
    });

    group.bench_function("invalid_relative", |b| {
        b.iter(|| validate_url("not-a-url").is_err());
    });

    group.bench_function("invalid_dangerous", |b| {
        b.iter(|| validate_url("javascript:alert(1)").is_err());
    });

    group.finish();
}

criterion_group!(benches, bench_generate_id, bench_is_valid_id, bench_validate_url);
criterion_main!(benches);
