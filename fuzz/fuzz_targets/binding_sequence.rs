#![no_main]

use ferrous_inject::{InjectionScope, Registry};
use libfuzzer_sys::fuzz_target;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// Replays a byte stream as bind/resolve operations on a fresh registry and
// checks every resolution against a simple model of the slot.
fuzz_target!(|data: &[u8]| {
    let registry = Registry::new();
    let built = Arc::new(AtomicU64::new(0));

    // Model: (scope, base value of the current factory, cached value)
    let mut scope = InjectionScope::Invalid;
    let mut base = 0u64;
    let mut cached: Option<u64> = None;

    for chunk in data.chunks(2) {
        let op = chunk[0] % 5;
        let arg = u64::from(*chunk.get(1).unwrap_or(&0));

        if op == 4 {
            let resolved = registry.resolve::<u64>().unwrap().map(|v| *v);
            let before = built.load(Ordering::SeqCst);
            let expected = match scope {
                InjectionScope::Invalid => None,
                InjectionScope::SingletonEager => cached,
                InjectionScope::Singleton => {
                    if cached.is_none() {
                        cached = Some(base * 1000 + 1);
                    }
                    cached
                }
                InjectionScope::Transient => Some(base * 1000 + before),
            };
            assert_eq!(resolved, expected);
            continue;
        }

        scope = match op {
            0 => InjectionScope::Invalid,
            1 => InjectionScope::Transient,
            2 => InjectionScope::Singleton,
            _ => InjectionScope::SingletonEager,
        };
        base = arg;
        built.store(0, Ordering::SeqCst);

        let counter = Arc::clone(&built);
        registry
            .configure::<u64>(
                Arc::new(move || Ok(Arc::new(arg * 1000 + counter.fetch_add(1, Ordering::SeqCst) + 1))),
                scope,
            )
            .unwrap();

        cached = match scope {
            InjectionScope::SingletonEager => Some(base * 1000 + 1),
            _ => None,
        };
    }
});
