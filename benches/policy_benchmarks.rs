//! Performance benchmarks for the Staff Policy Engine.
//!
//! Covers the permission evaluator, the carryover fold over growing year
//! ranges, and a full `/vacation/carryover` request through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use staff_policy_engine::access::{InMemorySessions, PermissionEvaluator};
use staff_policy_engine::api::{AppState, create_router};
use staff_policy_engine::config::ConfigLoader;
use staff_policy_engine::models::{PermissionSet, Role};
use staff_policy_engine::vacation::{VacationLedger, calculate_carryover};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const FIRST_YEAR: i32 = 2025;

/// Creates a ledger with usage recorded for every year in the range.
fn create_ledger(years: i32) -> VacationLedger {
    (0..years).fold(
        VacationLedger::new(Decimal::from(20), Decimal::from(5)),
        |ledger, offset| ledger.with_used(FIRST_YEAR + offset, Decimal::new(155, 1)),
    )
}

fn bench_permission_evaluator(c: &mut Criterion) {
    let evaluator = PermissionEvaluator::default();
    let granted: PermissionSet = (0..50).map(|i| format!("module{}:action", i)).collect();

    let mut group = c.benchmark_group("permission_evaluator");
    group.bench_function("god_mode", |b| {
        b.iter(|| evaluator.is_granted(black_box(Role::SuperAdmin), &granted, "users:create"))
    });
    group.bench_function("explicit_hit", |b| {
        b.iter(|| evaluator.is_granted(black_box(Role::Worker), &granted, "module42:action"))
    });
    group.bench_function("explicit_miss", |b| {
        b.iter(|| evaluator.is_granted(black_box(Role::Worker), &granted, "users:create"))
    });
    group.finish();
}

fn bench_carryover(c: &mut Criterion) {
    let mut group = c.benchmark_group("carryover");
    for years in [1, 5, 25, 100] {
        let ledger = create_ledger(years);
        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, &years| {
            b.iter(|| calculate_carryover(black_box(&ledger), FIRST_YEAR, FIRST_YEAR + years))
        });
    }
    group.finish();
}

fn bench_carryover_request(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let state = AppState::new(config, Arc::new(InMemorySessions::new()));

    let body = serde_json::json!({
        "usage": [{"year": 2025, "days": "10"}, {"year": 2026, "days": "18"}],
        "default_carryover": "5",
        "target_year": 2027,
        "include_breakdown": true
    })
    .to_string();

    c.bench_function("carryover_request", |b| {
        b.to_async(&runtime).iter(|| {
            let router = create_router(state.clone());
            let request = Request::builder()
                .method("POST")
                .uri("/vacation/carryover")
                .header("Content-Type", "application/json")
                .body(Body::from(body.clone()))
                .unwrap();
            async move { router.oneshot(request).await.unwrap() }
        })
    });
}

criterion_group!(
    benches,
    bench_permission_evaluator,
    bench_carryover,
    bench_carryover_request
);
criterion_main!(benches);
