//! Provider registry and resolver.
//!
//! An explicit mapping from `(source, process)` to a provider handle,
//! built once at startup or configuration reload. Two providers declaring
//! the same route is a hard configuration error rather than silent
//! first-match behavior, and resolution is an O(1) lookup.

use packet_core::{ConfigError, PacketError, PacketResult, RouteKey};
use std::collections::HashMap;
use std::sync::Arc;

use crate::provider::PacketProvider;

/// Registry of providers keyed by their declared routes.
///
/// Effectively immutable once built; a configuration reload replaces the
/// whole registry through the facade, never patches it in place.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    routes: HashMap<RouteKey, Arc<dyn PacketProvider>>,
}

impl ProviderRegistry {
    /// An empty registry. Store-gateway operations still work against it;
    /// any provider-backed operation resolves to `NoProviderAvailable`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from a set of providers.
    ///
    /// Every route each provider declares gets one table entry. A route
    /// declared by two providers fails with `ConfigError::DuplicateRoute`
    /// naming the pair and both providers.
    pub fn build(
        providers: impl IntoIterator<Item = Arc<dyn PacketProvider>>,
    ) -> Result<Self, ConfigError> {
        let mut routes: HashMap<RouteKey, Arc<dyn PacketProvider>> = HashMap::new();
        for provider in providers {
            for route in provider.routes() {
                if let Some(existing) = routes.get(&route) {
                    return Err(ConfigError::DuplicateRoute {
                        source: route.source,
                        process: route.process,
                        first: existing.name().to_string(),
                        second: provider.name().to_string(),
                    });
                }
                routes.insert(route, Arc::clone(&provider));
            }
        }
        Ok(Self { routes })
    }

    /// Resolve the provider owning a routing pair.
    ///
    /// Side-effect-free and cheap; called on every non-cached invocation.
    /// A miss is logged with the full routing pair and surfaces as
    /// `NoProviderAvailable` - misconfiguration, not transient failure.
    pub fn resolve(&self, source: &str, process: &str) -> PacketResult<Arc<dyn PacketProvider>> {
        let key = RouteKey::new(source, process);
        match self.routes.get(&key) {
            Some(provider) => Ok(Arc::clone(provider)),
            None => {
                tracing::error!(source, process, "no available provider for route");
                Err(PacketError::no_provider(source, process))
            }
        }
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate the registered routes.
    pub fn route_keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.routes.keys()
    }
}
