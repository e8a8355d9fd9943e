//! Property-Based Tests for Provider Resolution and Cache Bypass
//!
//! **Property 1: Routing Totality Over Declared Coverage**
//!
//! For any registered provider set with disjoint `(source, process)`
//! coverage, resolving a covered pair returns exactly the provider that
//! declared it, and resolving an uncovered pair fails with
//! `NoProviderAvailable`.
//!
//! **Property 2: Bypass Semantics**
//!
//! For any sequence of meta-info reads, the provider is invoked once for
//! the first non-bypass read plus once per bypass read.

use packet_core::{PacketError, RouteKey};
use packet_manager::testing::StubProvider;
use packet_manager::{
    AllowAll, MemoryCacheBackend, MemoryPacketStore, PacketProvider, PacketReader,
    ProviderRegistry,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("build test runtime")
        .block_on(future)
}

/// Strategy for a set of distinct routing pairs.
fn route_set() -> impl Strategy<Value = Vec<RouteKey>> {
    proptest::collection::hash_set(("[A-Z]{2,8}", "[A-Z]{2,8}"), 1..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(source, process)| RouteKey::new(source, process))
            .collect()
    })
}

proptest! {
    #[test]
    fn covered_routes_resolve_to_their_provider(routes in route_set()) {
        // One provider per route: coverage is disjoint by construction.
        let providers: Vec<Arc<dyn PacketProvider>> = routes
            .iter()
            .enumerate()
            .map(|(i, route)| {
                Arc::new(StubProvider::new(format!("p{i}"), vec![route.clone()]))
                    as Arc<dyn PacketProvider>
            })
            .collect();
        let registry = ProviderRegistry::build(providers).unwrap();

        for (i, route) in routes.iter().enumerate() {
            let resolved = registry.resolve(&route.source, &route.process).unwrap();
            prop_assert_eq!(resolved.name(), format!("p{i}"));
        }
    }

    #[test]
    fn uncovered_routes_fail_with_no_provider(routes in route_set()) {
        let covered: HashSet<RouteKey> = routes.iter().cloned().collect();
        let providers: Vec<Arc<dyn PacketProvider>> = routes
            .iter()
            .enumerate()
            .map(|(i, route)| {
                Arc::new(StubProvider::new(format!("p{i}"), vec![route.clone()]))
                    as Arc<dyn PacketProvider>
            })
            .collect();
        let registry = ProviderRegistry::build(providers).unwrap();

        // A lowercase pair can never collide with the uppercase coverage.
        let probe = RouteKey::new("cnie", "new");
        prop_assume!(!covered.contains(&probe));
        let err = registry.resolve(&probe.source, &probe.process).unwrap_err();
        prop_assert!(
            matches!(err, PacketError::NoProviderAvailable { .. }),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn provider_invocations_follow_the_bypass_flags(
        bypass_flags in proptest::collection::vec(any::<bool>(), 1..12),
    ) {
        block_on(async {
            let provider = Arc::new(
                StubProvider::new("p1", vec![RouteKey::new("CNIE", "NEW")])
                    .with_meta("creationDate", "2026-01-05"),
            );
            let registry =
                ProviderRegistry::build(vec![provider.clone() as Arc<dyn PacketProvider>])
                    .unwrap();
            let reader = PacketReader::new(
                registry,
                Arc::new(MemoryPacketStore::new()),
                Arc::new(MemoryCacheBackend::with_defaults()),
                Arc::new(AllowAll),
            );

            let id = "pkt-1".to_string();
            let mut expected = 0usize;
            let mut cache_warm = false;
            for bypass in &bypass_flags {
                reader.meta_info(&id, "CNIE", "NEW", *bypass).await.unwrap();
                if *bypass {
                    // Bypass always reaches the provider and never warms
                    // the cache.
                    expected += 1;
                } else if !cache_warm {
                    expected += 1;
                    cache_warm = true;
                }
                prop_assert_eq!(
                    provider.calls.meta_info.load(Ordering::Relaxed),
                    expected
                );
            }
            Ok(())
        })?;
    }
}
