//! Store gateway trait.
//!
//! The keeper persists raw packet objects and tags. The facade reaches it
//! directly for the operations that bypass provider-specific parsing:
//! listing stored objects and reading tags. Transport and format are the
//! gateway's own concern.

use async_trait::async_trait;
use packet_core::{ObjectDescriptor, PacketId, PacketResult, StoreError, TagMap};
use std::collections::HashMap;
use std::sync::RwLock;

/// Store gateway capability consumed by the packet reader facade.
#[async_trait]
pub trait PacketStore: Send + Sync {
    /// List descriptors for every object stored under a packet id.
    async fn list_objects(&self, id: &PacketId) -> PacketResult<Vec<ObjectDescriptor>>;

    /// Read the tag map for a packet id.
    async fn tags(&self, id: &PacketId) -> PacketResult<TagMap>;
}

/// In-memory store gateway for tests and local wiring.
#[derive(Default)]
pub struct MemoryPacketStore {
    objects: RwLock<HashMap<PacketId, Vec<ObjectDescriptor>>>,
    tags: RwLock<HashMap<PacketId, TagMap>>,
}

fn poisoned() -> StoreError {
    StoreError::Io {
        reason: "store lock poisoned".to_string(),
    }
}

impl MemoryPacketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register stored objects for a packet.
    pub fn insert_objects(&self, id: impl Into<PacketId>, descriptors: Vec<ObjectDescriptor>) {
        if let Ok(mut objects) = self.objects.write() {
            objects.insert(id.into(), descriptors);
        }
    }

    /// Register tags for a packet.
    pub fn insert_tags(&self, id: impl Into<PacketId>, tags: TagMap) {
        if let Ok(mut map) = self.tags.write() {
            map.insert(id.into(), tags);
        }
    }
}

#[async_trait]
impl PacketStore for MemoryPacketStore {
    async fn list_objects(&self, id: &PacketId) -> PacketResult<Vec<ObjectDescriptor>> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        Ok(objects.get(id).cloned().unwrap_or_default())
    }

    async fn tags(&self, id: &PacketId) -> PacketResult<TagMap> {
        let tags = self.tags.read().map_err(|_| poisoned())?;
        Ok(tags.get(id).cloned().unwrap_or_default())
    }
}
