//! In-memory cache backend.
//!
//! Dashmap-backed store honoring the configured TTL and capacity. Entries
//! past their TTL are dropped on read; insertions beyond capacity evict an
//! arbitrary entry. Suitable as the default backend for a single facade
//! instance; cross-instance coherence is out of scope.

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use dashmap::DashMap;
use packet_core::PacketResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::traits::{CacheBackend, CacheConfig, CacheStats, CachedValue};

/// In-memory cache backend with TTL and capacity eviction.
pub struct MemoryCacheBackend {
    entries: DashMap<String, CachedValue>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl MemoryCacheBackend {
    /// Create a backend with the given configuration and the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a backend with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Create a backend with an injected clock for deterministic TTL tests.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    fn is_expired(&self, value: &CachedValue) -> bool {
        let ttl = ChronoDuration::from_std(self.config.entry_ttl)
            .unwrap_or(ChronoDuration::MAX);
        self.clock.now().signed_duration_since(value.cached_at) > ttl
    }

    /// Evict one arbitrary entry to make room at capacity.
    fn evict_one(&self) {
        let victim = self.entries.iter().next().map(|e| e.key().clone());
        if let Some(key) = victim {
            if self.entries.remove(&key).is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> PacketResult<Option<CachedValue>> {
        if let Some(entry) = self.entries.get(key) {
            if !self.is_expired(entry.value()) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(entry.value().clone()));
            }
            drop(entry);
            // Expired: drop it so the map does not fill with dead entries.
            if self.entries.remove(key).is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> PacketResult<()> {
        if !self.entries.contains_key(key) && self.entries.len() >= self.config.max_entries {
            self.evict_one();
        }
        self.entries.insert(
            key.to_string(),
            CachedValue {
                bytes,
                cached_at: self.clock.now(),
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> PacketResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn stats(&self) -> PacketResult<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.entries.len() as u64,
            evictions: self.evictions.load(Ordering::Relaxed),
        })
    }
}
