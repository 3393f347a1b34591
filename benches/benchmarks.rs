use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use tincan_mirror::{
    use_shared_state, DetachedPlatform, MemoryPlatform, Platform, ProviderOptions, Scope, Store,
    SharedStateProvider,
};

fn mount(platform: Arc<dyn Platform>) -> SharedStateProvider {
    SharedStateProvider::mount(&Scope::root(), platform, ProviderOptions::default())
}

fn shared_store_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_store");

    let platforms: [(&str, Arc<dyn Platform>); 2] = [
        ("detached", Arc::new(DetachedPlatform)),
        ("memory", Arc::new(MemoryPlatform::new())),
    ];
    for (name, platform) in platforms {
        let provider = mount(platform);
        let shared = provider.shared().clone();

        group.bench_function(name, |b| {
            let mut i = 0usize;
            b.iter(|| {
                shared.store(("counter", black_box(i).to_string()));
                i += 1;
            });
        });
    }
    group.finish();
}

fn shared_get_benchmark(c: &mut Criterion) {
    let page = Arc::new(MemoryPlatform::new());
    let provider = mount(page.clone());
    let shared = provider.shared().clone();
    shared.store(("in-url", "1"));
    page.storage_set("in-durable", "2");

    c.bench_function("get_stored_url_hit", |b| {
        b.iter(|| black_box(shared.get_stored(black_box("in-url"))));
    });

    c.bench_function("get_stored_durable_fallback", |b| {
        b.iter(|| black_box(shared.get_stored(black_box("in-durable"))));
    });
}

fn context_lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("use_shared_state");

    for depth in [1usize, 10, 100].iter() {
        let provider = mount(Arc::new(DetachedPlatform));
        let mut leaf = provider.scope().clone();
        for _ in 0..*depth {
            leaf = leaf.child();
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
            b.iter(|| black_box(use_shared_state(&leaf).is_ok()));
        });
    }
    group.finish();
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    #[derive(Clone)]
    struct State {
        value: usize,
    }

    let mut group = c.benchmark_group("store_subscribe");

    for subscriber_count in [1, 10, 100].iter() {
        let store = Store::new(State { value: 0 });

        let _subscriptions: Vec<_> = (0..*subscriber_count)
            .map(|_| {
                store.subscribe(|_| {
                    // Empty subscriber
                })
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    store.update(|state| state.value = black_box(i));
                    i += 1;
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    shared_store_benchmark,
    shared_get_benchmark,
    context_lookup_benchmark,
    store_subscribe_benchmark,
);
criterion_main!(benches);
