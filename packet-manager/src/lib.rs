//! Packet Manager - Provider Routing, Access Gate and Reader Facade
//!
//! Library-level facade over versioned, multi-modal packets. Read requests
//! are routed to pluggable providers selected by `(source, process)`, with
//! a caching layer, per-operation bypass control and capability-based
//! authorization in front.
//!
//! Composition order for every operation:
//! access gate -> cache layer -> provider resolver -> provider/store.

pub mod access;
pub mod card;
pub mod eventbus;
pub mod provider;
pub mod reader;
pub mod registry;
pub mod testing;

pub use access::{
    ensure_capability, required_capability, AccessChecker, AllowAll, Capability,
    StaticAccessChecker,
};
pub use card::{CardGenerator, CardKind, CardRenderer};
pub use eventbus::EventBusManager;
pub use provider::PacketProvider;
pub use reader::PacketReader;
pub use registry::ProviderRegistry;

// Re-export the storage-layer surface facade callers wire up.
pub use packet_storage::{
    CacheBackend, CacheConfig, CachePolicy, CacheStats, MemoryCacheBackend, MemoryPacketStore,
    Operation, PacketStore,
};
