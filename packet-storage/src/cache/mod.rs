//! Memoization layer for expensive packet read operations.
//!
//! Entries are keyed by operation name plus the operation's discriminating
//! arguments. The facade never invalidates entries explicitly; they expire
//! through the backend's own eviction (TTL, capacity) or are skipped
//! entirely when a caller requests bypass.

pub mod clock;
pub mod memory;
pub mod policy;
pub mod traits;

pub use clock::{Clock, FixedClock, SystemClock};
pub use memory::MemoryCacheBackend;
pub use policy::{cache_key, CachePolicy, Operation};
pub use traits::{CacheBackend, CacheConfig, CacheStats, CachedValue};
