//! Invoke-path benchmarks for the debouncer

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use debounce::{Debounced, ManualScheduler};
use std::time::Duration;

fn bench_call(c: &mut Criterion) {
    let clock = ManualScheduler::new();
    let debounced = Debounced::new(
        |value: u64| {
            black_box(value);
        },
        Duration::from_millis(300),
        clock.clone(),
    );

    // Every call after the first cancels and reschedules
    c.bench_function("call_reschedule", |b| {
        b.iter(|| debounced.call(black_box(42)));
    });

    c.bench_function("burst_then_fire", |b| {
        b.iter(|| {
            for value in 0..64 {
                debounced.call(black_box(value));
            }
            clock.advance(Duration::from_millis(300))
        });
    });
}

fn bench_tokio_call(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()
        .expect("failed to build tokio runtime");
    let _guard = runtime.enter();
    let debounced = debounce::wrap(|value: u64| {
        black_box(value);
    })
    .expect("runtime is entered");

    c.bench_function("tokio_call_reschedule", |b| {
        b.iter(|| debounced.call(black_box(42)));
    });
}

criterion_group!(benches, bench_call, bench_tokio_call);
criterion_main!(benches);
