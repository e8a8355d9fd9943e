//! Cache backend trait and supporting types.
//!
//! Backends store serialized values keyed by strings built from an
//! operation name and its arguments. Implementations must support
//! concurrent get/put without corrupting individual entries; no cross-key
//! transactional guarantee is required.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use packet_core::PacketResult;
use std::time::Duration;

/// A cached value together with the instant it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedValue {
    /// Serialized operation result.
    pub bytes: Vec<u8>,
    /// When the entry was written.
    pub cached_at: DateTime<Utc>,
}

/// Cache backend trait for pluggable cache implementations.
///
/// Serialization is the caller's concern: backends see opaque bytes.
/// Last-writer-wins on concurrent puts to the same key is acceptable,
/// since identical arguments produce idempotent values.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get a value from the cache, or None on miss or expiry.
    async fn get(&self, key: &str) -> PacketResult<Option<CachedValue>>;

    /// Put a value into the cache, replacing any existing entry.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> PacketResult<()>;

    /// Remove a single entry if present.
    async fn remove(&self, key: &str) -> PacketResult<()>;

    /// Get usage statistics.
    async fn stats(&self) -> PacketResult<CacheStats>;
}

/// Configuration for cache backends.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries; entries older than this are treated as
    /// misses and dropped on read.
    pub entry_ttl: Duration,
    /// Maximum number of entries held at once. Insertions beyond capacity
    /// evict an arbitrary entry.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_ttl: Duration::from_secs(3600),
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.entry_ttl = ttl;
        self
    }

    /// Set the max entry count.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Create config from environment variables.
    ///
    /// - `PACKET_CACHE_TTL_SECS`: entry TTL in seconds (default: 3600)
    /// - `PACKET_CACHE_MAX_ENTRIES`: capacity (default: 10000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let entry_ttl = std::env::var("PACKET_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.entry_ttl);
        let max_entries = std::env::var("PACKET_CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_entries);
        Self {
            entry_ttl,
            max_entries,
        }
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses (including expired reads).
    pub misses: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
    /// Number of evictions due to capacity or expiry.
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
