//! Monitor Chain Benchmarks — Per-Request Instrumentation Overhead
//!
//! Compares a bare handler against the same handler wrapped with the
//! counter and histogram layers.
//!
//! Run with: cargo bench --bench monitor_bench

use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tower::ServiceExt;

use http_monitor_chain::{build_monitor_chain, MetricSelection, MetricsRegistry};

fn app(enabled: bool) -> Router {
    let registry = MetricsRegistry::new();
    let route = build_monitor_chain(
        &registry,
        &MetricSelection::all(),
        get(|| async { "Hello, there!" }),
        enabled,
    )
    .expect("fresh registry");
    Router::new().route("/hello", route)
}

fn request() -> Request<Body> {
    Request::builder()
        .uri("/hello")
        .body(Body::empty())
        .expect("static request")
}

/// Benchmark a request through the bare handler.
fn bench_bare_handler(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let app = app(false);

    c.bench_function("hello_bare", |b| {
        b.to_async(&runtime).iter(|| {
            let app = app.clone();
            async move { black_box(app.oneshot(request()).await) }
        });
    });
}

/// Benchmark a request through the counting + timing chain.
fn bench_monitored_handler(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let app = app(true);

    c.bench_function("hello_monitored", |b| {
        b.to_async(&runtime).iter(|| {
            let app = app.clone();
            async move { black_box(app.oneshot(request()).await) }
        });
    });
}

criterion_group!(benches, bench_bare_handler, bench_monitored_handler);
criterion_main!(benches);
