//! Packet Storage - Cache Layer and Store Gateway
//!
//! Defines the cache abstraction used by the packet reader facade and the
//! store gateway trait through which listing and tag reads bypass
//! provider-specific parsing. Ships an in-memory implementation of each for
//! tests and local wiring.

pub mod cache;
pub mod keeper;

pub use cache::{
    cache_key, CacheBackend, CacheConfig, CachePolicy, CacheStats, CachedValue, Clock,
    FixedClock, MemoryCacheBackend, Operation, SystemClock,
};
pub use keeper::{MemoryPacketStore, PacketStore};
