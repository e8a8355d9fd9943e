//! Access gate.
//!
//! Every facade operation requires one capability for its data class. The
//! gate runs before provider resolution, cache lookup and any logging of
//! operation arguments; a denial surfaces as `Unauthorized` carrying only
//! the capability name.

use packet_core::{PacketError, PacketResult};
use packet_storage::Operation;
use std::collections::HashSet;
use std::fmt;

/// Capabilities gating facade operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Field, key, tag, audit and listing reads.
    DataRead,
    /// Document retrieval.
    DocumentRead,
    /// Biometric retrieval.
    BiometricRead,
    /// Metadata retrieval.
    MetadataRead,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::DataRead => "DATA_READ",
            Capability::DocumentRead => "DOCUMENT_READ",
            Capability::BiometricRead => "BIOMETRIC_READ",
            Capability::MetadataRead => "METADATA_READ",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The capability required by each facade operation.
pub fn required_capability(op: Operation) -> Capability {
    match op {
        Operation::Document => Capability::DocumentRead,
        Operation::Biometric => Capability::BiometricRead,
        Operation::MetaInfo => Capability::MetadataRead,
        Operation::Field
        | Operation::Fields
        | Operation::Audits
        | Operation::Tags
        | Operation::AllKeys
        | Operation::Info
        | Operation::ValidatePacket => Capability::DataRead,
    }
}

/// Access control capability consumed by the facade.
pub trait AccessChecker: Send + Sync {
    /// Whether the current caller holds the given capability.
    fn has_capability(&self, capability: Capability) -> bool;
}

/// Checker granting every capability. Useful for trusted in-process
/// callers and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessChecker for AllowAll {
    fn has_capability(&self, _capability: Capability) -> bool {
        true
    }
}

/// Checker with an explicit grant set.
#[derive(Debug, Clone, Default)]
pub struct StaticAccessChecker {
    granted: HashSet<Capability>,
}

impl StaticAccessChecker {
    /// A checker granting nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant one capability.
    pub fn grant(mut self, capability: Capability) -> Self {
        self.granted.insert(capability);
        self
    }
}

impl AccessChecker for StaticAccessChecker {
    fn has_capability(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }
}

/// Verify the caller holds `capability`, or fail with `Unauthorized`.
pub fn ensure_capability(
    access: &dyn AccessChecker,
    capability: Capability,
) -> PacketResult<()> {
    if access.has_capability(capability) {
        Ok(())
    } else {
        Err(PacketError::Unauthorized {
            capability: capability.as_str().to_string(),
        })
    }
}
