//! Benchmark for the effect core: Thunk, Eff and PureEff.
//!
//! Measures construction, first evaluation, memoized reads and combinator
//! chains.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use effkit::control::{Fin, Thunk};
use effkit::effect::{Eff, Error, PureEff};
use std::hint::black_box;

// =============================================================================
// Thunk Benchmarks
// =============================================================================

fn benchmark_thunk(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("thunk");

    group.bench_function("first_evaluation", |bencher| {
        bencher.iter(|| {
            let thunk = Thunk::lazy(|env: &i32| Fin::Succ(env + 1));
            black_box(thunk.value(black_box(&41)))
        });
    });

    group.bench_function("memoized_read", |bencher| {
        let thunk = Thunk::lazy(|env: &i32| Fin::Succ(env + 1));
        let _ = thunk.value(&41);
        bencher.iter(|| black_box(thunk.value(black_box(&0))));
    });

    group.bench_function("reset", |bencher| {
        let thunk = Thunk::lazy(|env: &i32| Fin::Succ(env + 1));
        bencher.iter(|| black_box(thunk.reset()));
    });

    group.finish();
}

// =============================================================================
// Eff Benchmarks
// =============================================================================

fn benchmark_eff_map_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("eff_map_chain");

    for depth in [1usize, 5, 25] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let mut eff = Eff::effect(|env: &i32| *env);
                for _ in 0..depth {
                    eff = eff.map(|x| x.wrapping_add(1));
                }
                black_box(eff.run_io(black_box(&0)))
            });
        });
    }

    group.finish();
}

fn benchmark_eff_bind_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("eff_bind_chain");

    group.bench_function("bind_5", |bencher| {
        bencher.iter(|| {
            let eff = Eff::effect(|env: &i32| *env)
                .bind(|x| Eff::success(x + 1))
                .bind(|x| Eff::effect(move |env: &i32| x * env))
                .bind(|x| Eff::success(x - 3))
                .bind(|x| Eff::success(x * 4))
                .bind(|x| Eff::success(x + 5));
            black_box(eff.run_io(black_box(&2)))
        });
    });

    group.bench_function("failure_short_circuit", |bencher| {
        bencher.iter(|| {
            let eff = Eff::<i32, i32>::fail(Error::new("early"))
                .bind(|x| Eff::success(x + 1))
                .bind(|x| Eff::success(x * 2));
            black_box(eff.run_io(black_box(&2)))
        });
    });

    group.finish();
}

fn benchmark_eff_recovery(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("eff_recovery");

    group.bench_function("alternation", |bencher| {
        bencher.iter(|| {
            let eff = Eff::<(), i32>::fail("primary") | PureEff::success(black_box(1));
            black_box(eff.run_io(&()))
        });
    });

    group.bench_function("if_fail", |bencher| {
        bencher.iter(|| {
            let eff = Eff::<(), i32>::fail("primary").if_fail(|error| error.message().len() as i32);
            black_box(eff.run_io(&()))
        });
    });

    group.bench_function("intercepted_panic", |bencher| {
        std::panic::set_hook(Box::new(|_| {}));
        bencher.iter(|| {
            let eff: Eff<(), i32> = Eff::effect(|_| panic!("bench fault"));
            black_box(eff.run_io(&()))
        });
        let _ = std::panic::take_hook();
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_thunk,
    benchmark_eff_map_chain,
    benchmark_eff_bind_chain,
    benchmark_eff_recovery
);
criterion_main!(benches);
