use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_inject::*;
use std::sync::Arc;

// ===== Handle Benchmarks =====

fn bench_singleton_handle(c: &mut Criterion) {
    struct Database {
        url: String,
    }

    InjectionManager::bind_singleton(|| {
        Box::new(Database {
            url: "postgres://localhost".to_string(),
        })
    });

    // Prime the singleton
    let _ = Injected::<Database>::new().instance();

    c.bench_function("singleton_fresh_handle", |b| {
        b.iter(|| {
            let handle: Injected<Database> = Injected::new();
            black_box(handle.url.len());
        })
    });

    let resolved: Injected<Database> = Injected::new();
    let _ = resolved.get();
    c.bench_function("singleton_resolved_handle", |b| {
        b.iter(|| black_box(resolved.url.len()))
    });
}

fn bench_transient_handle(c: &mut Criterion) {
    #[derive(Clone)]
    struct Payload {
        data: [u8; 64],
    }

    InjectionManager::bind_transient(|| Box::new(Payload { data: [0; 64] }));

    c.bench_function("transient_fresh_handle", |b| {
        b.iter(|| {
            let handle: Injected<Payload> = Injected::new();
            black_box(handle.data[0]);
        })
    });
}

fn bench_handle_clone(c: &mut Criterion) {
    InjectionManager::bind_singleton_instance(Box::new(42u64));
    let handle: Injected<u64> = Injected::new();
    let _ = handle.get();

    c.bench_function("resolved_handle_clone", |b| {
        b.iter(|| black_box(handle.clone()))
    });
}

fn bench_registry_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_resolve");

    for scope in [
        InjectionScope::Singleton,
        InjectionScope::SingletonEager,
        InjectionScope::Transient,
    ] {
        let registry = Registry::new();
        registry
            .configure::<u64>(Arc::new(|| Ok(Arc::new(7))), scope)
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(scope), &registry, |b, registry| {
            b.iter(|| black_box(registry.resolve::<u64>().unwrap()))
        });
    }

    group.finish();
}

fn bench_rebind(c: &mut Criterion) {
    let registry = Registry::new();

    c.bench_function("rebind_singleton", |b| {
        b.iter(|| {
            registry
                .configure::<u64>(Arc::new(|| Ok(Arc::new(1))), InjectionScope::Singleton)
                .unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_singleton_handle,
    bench_transient_handle,
    bench_handle_clone,
    bench_registry_resolve,
    bench_rebind
);
criterion_main!(benches);
