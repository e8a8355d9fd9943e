//! Provider capability trait.
//!
//! A provider knows how to extract structured data from one packet
//! format/source. Each provider declares the `(source, process)` routes it
//! owns; the registry builds its lookup table from those declarations.

use async_trait::async_trait;
use packet_core::{
    AuditEntry, BiometricRecord, Document, FieldMap, MetaInfo, PacketId, PacketResult, RouteKey,
};
use std::collections::HashMap;

/// Packet-format-specific extraction for one or more `(source, process)`
/// combinations. All operations are scoped to `(id, source, process)` plus
/// operation-specific selectors.
#[async_trait]
pub trait PacketProvider: Send + Sync {
    /// Provider name, used in configuration errors and diagnostics.
    fn name(&self) -> &str;

    /// The routes this provider declares support for.
    fn routes(&self) -> Vec<RouteKey>;

    /// Whether this provider owns the given routing pair.
    fn supports(&self, source: &str, process: &str) -> bool {
        self.routes()
            .iter()
            .any(|r| r.source == source && r.process == process)
    }

    /// Read a single identity field.
    async fn field(
        &self,
        id: &PacketId,
        field: &str,
        source: &str,
        process: &str,
    ) -> PacketResult<Option<String>>;

    /// Read a set of identity fields, null values preserved.
    async fn fields(
        &self,
        id: &PacketId,
        fields: &[String],
        source: &str,
        process: &str,
    ) -> PacketResult<HashMap<String, Option<String>>>;

    /// Read a document by name.
    async fn document(
        &self,
        id: &PacketId,
        name: &str,
        source: &str,
        process: &str,
    ) -> PacketResult<Document>;

    /// Read biometric samples for a person role, limited to the requested
    /// modalities.
    async fn biometric(
        &self,
        id: &PacketId,
        person: &str,
        modalities: &[String],
        source: &str,
        process: &str,
    ) -> PacketResult<BiometricRecord>;

    /// Read provider-specific packet metadata.
    async fn meta_info(&self, id: &PacketId, source: &str, process: &str)
        -> PacketResult<MetaInfo>;

    /// Read the packet's audit trail, in order.
    async fn audit_info(
        &self,
        id: &PacketId,
        source: &str,
        process: &str,
    ) -> PacketResult<Vec<AuditEntry>>;

    /// Read the full flattened identity object.
    async fn all_fields(&self, id: &PacketId, source: &str, process: &str)
        -> PacketResult<FieldMap>;

    /// Provider-defined packet validity check.
    async fn validate(&self, id: &PacketId, source: &str, process: &str) -> PacketResult<bool>;
}

impl std::fmt::Debug for dyn PacketProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketProvider")
            .field("name", &self.name())
            .finish()
    }
}
