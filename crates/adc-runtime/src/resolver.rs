//! Lazy provider resolution
//!
//! [`ControlResolver`] owns the process-wide lookup cache. The cache starts
//! empty and transitions to loaded exactly once, on the first lookup that
//! finds a working [`RegistrySource`]; after that every lookup is a
//! lock-free read of an immutable snapshot.
//!
//! ## Locking discipline
//!
//! The fast path reads the current snapshot without synchronization. When
//! the snapshot is not yet loaded, the caller takes the load mutex,
//! re-checks under the lock, and only the thread that still sees an
//! unloaded snapshot performs the load. A failed load is logged and leaves
//! the cache unloaded; the next lookup repeats the check-and-load sequence
//! until a load succeeds. A successful load is terminal even when the
//! registry is empty: the `loaded` flag, not entry count, gates the fast
//! path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::control::ProviderClass;
use crate::source::RegistrySource;

/// Cache state: unloaded and empty, or loaded with a closed snapshot
#[derive(Default)]
struct CacheState {
    loaded: bool,
    entries: HashMap<String, ProviderClass>,
}

/// Process-wide provider lookup cache with one-time lazy initialization
///
/// The resolver is an explicit, owned object rather than ambient global
/// state: construct one per process next to the generated registry and
/// inject it where lookups happen. The generated registry module exports a
/// ready-made singleton accessor for hosts that want the conventional
/// wiring.
pub struct ControlResolver {
    state: ArcSwap<CacheState>,
    load_lock: Mutex<()>,
    source: Box<dyn RegistrySource>,
}

impl ControlResolver {
    /// Create a resolver over a registry source; no load happens yet
    pub fn new<S: RegistrySource + 'static>(source: S) -> Self {
        Self {
            state: ArcSwap::from_pointee(CacheState::default()),
            load_lock: Mutex::new(()),
            source: Box::new(source),
        }
    }

    /// Resolve a provider's class handle by name
    ///
    /// Returns `None` when the name is absent from the registry, and also
    /// while the registry cannot be loaded; load failures never propagate
    /// to the caller.
    pub fn resolve(&self, provider_name: &str) -> Option<ProviderClass> {
        let snapshot = self.state.load();
        if snapshot.loaded {
            return snapshot.entries.get(provider_name).copied();
        }
        drop(snapshot);
        self.load_and_resolve(provider_name)
    }

    /// Whether the one-time load has completed
    pub fn is_loaded(&self) -> bool {
        self.state.load().loaded
    }

    /// Names of every registered provider, sorted
    ///
    /// Triggers the same lazy load as [`ControlResolver::resolve`].
    pub fn provider_names(&self) -> Vec<String> {
        let snapshot = self.state.load();
        if !snapshot.loaded {
            drop(snapshot);
            let _ = self.load_and_resolve("");
        }
        let snapshot = self.state.load();
        let mut names: Vec<String> = snapshot.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Slow path: serialize loading, re-check, load, then look up
    fn load_and_resolve(&self, provider_name: &str) -> Option<ProviderClass> {
        // The guard protects no invariants of its own; recover it if a
        // test double panicked while loading.
        let _guard = self
            .load_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        // Another thread may have loaded while this one waited on the lock.
        let snapshot = self.state.load();
        if snapshot.loaded {
            return snapshot.entries.get(provider_name).copied();
        }
        drop(snapshot);

        match self.source.load_mapping() {
            Ok(entries) => {
                debug!(providers = entries.len(), "provider registry loaded");
                let found = entries.get(provider_name).copied();
                self.state.store(Arc::new(CacheState {
                    loaded: true,
                    entries,
                }));
                found
            }
            Err(error) => {
                // Cache stays unloaded; the next lookup retries the load.
                warn!(%error, "provider registry load failed; lookups stay unresolved");
                None
            }
        }
    }
}

impl std::fmt::Debug for ControlResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.state.load();
        f.debug_struct("ControlResolver")
            .field("loaded", &snapshot.loaded)
            .field("providers", &snapshot.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use adc_domain::Error;

    use super::*;
    use crate::control::{ProviderControl, RegistryEntry};
    use crate::source::StaticTableSource;

    struct Stub;

    impl ProviderControl for Stub {
        fn provider_name(&self) -> &'static str {
            "stub"
        }

        fn is_sdk(&self) -> bool {
            true
        }
    }

    fn new_stub() -> Box<dyn ProviderControl> {
        Box::new(Stub)
    }

    fn stub_table() -> &'static [RegistryEntry] {
        static TABLE: &[RegistryEntry] = &[RegistryEntry {
            name: "stub",
            class: ProviderClass {
                type_name: "tests::Stub",
                provider_name: "stub",
                is_sdk: true,
                construct: new_stub,
            },
        }];
        TABLE
    }

    struct FailingSource;

    impl RegistrySource for FailingSource {
        fn load_mapping(&self) -> adc_domain::Result<HashMap<String, ProviderClass>> {
            Err(Error::registry_load("table missing"))
        }
    }

    #[test]
    fn resolves_known_provider() {
        let resolver = ControlResolver::new(StaticTableSource::new(stub_table));
        let class = resolver.resolve("stub").expect("provider registered");
        assert_eq!(class.provider_name, "stub");
        assert!(class.is_sdk);
    }

    #[test]
    fn unknown_provider_resolves_to_none() {
        let resolver = ControlResolver::new(StaticTableSource::new(stub_table));
        assert!(resolver.resolve("Unknown").is_none());
    }

    #[test]
    fn no_load_happens_before_first_lookup() {
        let resolver = ControlResolver::new(StaticTableSource::new(stub_table));
        assert!(!resolver.is_loaded());
        resolver.resolve("stub");
        assert!(resolver.is_loaded());
    }

    #[test]
    fn failed_load_leaves_cache_unloaded() {
        let resolver = ControlResolver::new(FailingSource);
        assert!(resolver.resolve("stub").is_none());
        assert!(!resolver.is_loaded());
    }

    #[test]
    fn successful_empty_load_is_terminal() {
        struct CountingEmptySource(std::sync::Arc<AtomicUsize>);

        impl RegistrySource for CountingEmptySource {
            fn load_mapping(&self) -> adc_domain::Result<HashMap<String, ProviderClass>> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(HashMap::new())
            }
        }

        let loads = std::sync::Arc::new(AtomicUsize::new(0));
        let resolver = ControlResolver::new(CountingEmptySource(std::sync::Arc::clone(&loads)));
        assert!(resolver.resolve("stub").is_none());
        assert!(resolver.resolve("stub").is_none());
        assert!(resolver.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 1, "empty load is not retried");
    }

    #[test]
    fn provider_names_are_sorted() {
        fn table() -> &'static [RegistryEntry] {
            static TABLE: &[RegistryEntry] = &[
                RegistryEntry {
                    name: "zeta",
                    class: ProviderClass {
                        type_name: "tests::Stub",
                        provider_name: "zeta",
                        is_sdk: true,
                        construct: new_stub,
                    },
                },
                RegistryEntry {
                    name: "alpha",
                    class: ProviderClass {
                        type_name: "tests::Stub",
                        provider_name: "alpha",
                        is_sdk: false,
                        construct: new_stub,
                    },
                },
            ];
            TABLE
        }

        let resolver = ControlResolver::new(StaticTableSource::new(table));
        assert_eq!(resolver.provider_names(), vec!["alpha", "zeta"]);
    }
}
