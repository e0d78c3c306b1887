//! Tests for the lazy provider resolver
//!
//! Exercises the one-time guarded load under concurrency and the
//! retry-until-success policy for registry load failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use adc_domain::{Error, Result};
use adc_runtime::{ControlResolver, ProviderClass, ProviderControl, RegistrySource};

// ============================================================================
// Test doubles
// ============================================================================

struct Stub(&'static str, bool);

impl ProviderControl for Stub {
    fn provider_name(&self) -> &'static str {
        self.0
    }

    fn is_sdk(&self) -> bool {
        self.1
    }
}

fn new_admob() -> Box<dyn ProviderControl> {
    Box::new(Stub("AdMob", true))
}

fn new_facebook() -> Box<dyn ProviderControl> {
    Box::new(Stub("Facebook", false))
}

fn sample_mapping() -> HashMap<String, ProviderClass> {
    let mut mapping = HashMap::new();
    mapping.insert(
        "AdMob".to_string(),
        ProviderClass {
            type_name: "fixtures::AdMobImp",
            provider_name: "AdMob",
            is_sdk: true,
            construct: new_admob,
        },
    );
    mapping.insert(
        "Facebook".to_string(),
        ProviderClass {
            type_name: "fixtures::FacebookImp",
            provider_name: "Facebook",
            is_sdk: false,
            construct: new_facebook,
        },
    );
    mapping
}

/// Counts loads and serves the sample mapping
struct CountingSource {
    loads: Arc<AtomicUsize>,
}

impl RegistrySource for CountingSource {
    fn load_mapping(&self) -> Result<HashMap<String, ProviderClass>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(sample_mapping())
    }
}

/// Fails the first `failures` loads, then serves the sample mapping
struct FlakySource {
    attempts: AtomicUsize,
    failures: usize,
}

impl RegistrySource for FlakySource {
    fn load_mapping(&self) -> Result<HashMap<String, ProviderClass>> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            Err(Error::registry_load("registry not yet available"))
        } else {
            Ok(sample_mapping())
        }
    }
}

// ============================================================================
// Concurrency: exactly one load under concurrent first access
// ============================================================================

#[test]
fn concurrent_first_lookups_load_exactly_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let resolver = Arc::new(ControlResolver::new(CountingSource {
        loads: Arc::clone(&loads),
    }));

    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));
    let names = ["AdMob", "Facebook", "Unknown", "AdMob"];

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            let barrier = Arc::clone(&barrier);
            let name = names[i % names.len()];
            thread::spawn(move || {
                barrier.wait();
                resolver.resolve(name)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let resolved = handle.join().expect("lookup thread panicked");
        let name = names[i % names.len()];
        if name == "Unknown" {
            assert!(resolved.is_none(), "unknown name must stay unresolved");
        } else {
            // Every caller observes a fully populated cache, never a
            // partial one.
            let class = resolved.unwrap_or_else(|| panic!("{name} must resolve"));
            assert_eq!(class.provider_name, name);
        }
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1, "one load across all threads");
    assert!(resolver.is_loaded());
}

#[test]
fn later_lookups_read_without_further_loads() {
    let loads = Arc::new(AtomicUsize::new(0));
    let resolver = ControlResolver::new(CountingSource {
        loads: Arc::clone(&loads),
    });

    for _ in 0..10 {
        assert!(resolver.resolve("AdMob").is_some());
    }
    assert!(resolver.resolve("Unknown").is_none());

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Load-failure policy: retry on every call until a load succeeds
// ============================================================================

#[test]
fn failed_loads_are_retried_until_success() {
    let resolver = ControlResolver::new(FlakySource {
        attempts: AtomicUsize::new(0),
        failures: 2,
    });

    // Two failing attempts degrade to "not found" without loading.
    assert!(resolver.resolve("AdMob").is_none());
    assert!(!resolver.is_loaded());
    assert!(resolver.resolve("AdMob").is_none());
    assert!(!resolver.is_loaded());

    // Third attempt succeeds and is terminal.
    let class = resolver.resolve("AdMob").expect("third attempt loads");
    assert!(class.is_sdk);
    assert!(resolver.is_loaded());
}

#[test]
fn successful_load_stops_retrying() {
    let resolver = ControlResolver::new(FlakySource {
        attempts: AtomicUsize::new(0),
        failures: 1,
    });

    assert!(resolver.resolve("Facebook").is_none());
    assert!(resolver.resolve("Facebook").is_some());

    // Resolved entries now come from the cache; a flaky source that would
    // fail again is never consulted.
    let class = resolver.resolve("Facebook").expect("cache hit");
    assert!(!class.is_sdk);
    assert_eq!(class.instantiate().provider_name(), "Facebook");
}
