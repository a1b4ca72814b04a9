/// Property-based tests for handle resolution
///
/// Each property binds its own type in the global registry, so the two can
/// run in parallel while their cases run one after another.

use ferrous_inject::{Injected, InjectionManager};
use proptest::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Sequence(u64);

static COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
struct Tagged {
    tag: String,
}

proptest! {
    #[test]
    fn transient_handles_resolve_in_declaration_order(
        handle_count in 1usize..20,
        repeats in 1usize..5,
    ) {
        COUNTER.store(0, Ordering::SeqCst);
        InjectionManager::bind_transient(|| {
            Box::new(Sequence(COUNTER.fetch_add(1, Ordering::SeqCst) + 1))
        });

        let handles: Vec<Injected<Sequence>> = (0..handle_count).map(|_| Injected::new()).collect();
        for (index, handle) in handles.iter().enumerate() {
            prop_assert_eq!(handle.0, index as u64 + 1);
        }

        // Repeated access and copies never advance the counter
        for _ in 0..repeats {
            for (index, handle) in handles.iter().enumerate() {
                let copy = handle.clone();
                prop_assert_eq!(handle.0, index as u64 + 1);
                prop_assert_eq!(copy.0, index as u64 + 1);
            }
        }
        prop_assert_eq!(COUNTER.load(Ordering::SeqCst), handle_count as u64);
    }
}

proptest! {
    #[test]
    fn last_binding_wins(tags in proptest::collection::vec("[a-z]{1,12}", 1..8)) {
        let mut resolved = Vec::new();
        for tag in &tags {
            let tag = tag.clone();
            InjectionManager::bind_singleton(move || Box::new(Tagged { tag: tag.clone() }));
            let handle: Injected<Tagged> = Injected::new();
            resolved.push(handle);
        }

        let last: Injected<Tagged> = Injected::new();
        prop_assert_eq!(&last.tag, tags.last().unwrap());

        // Handles resolved after all binds agree on the single instance
        let other: Injected<Tagged> = Injected::new();
        prop_assert!(Arc::ptr_eq(&last.instance().unwrap(), &other.instance().unwrap()));

        // Unresolved handles declared early still see the latest binding
        for handle in &resolved {
            prop_assert_eq!(&handle.tag, tags.last().unwrap());
        }
    }
}
