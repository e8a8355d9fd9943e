//! Packet Core - Data Types
//!
//! Pure data structures for the packet manager. All other crates depend on
//! this. This crate contains ONLY data types and the error taxonomy - no
//! business logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub mod error;

pub use error::{
    CacheError, ConfigError, PacketError, PacketResult, ProviderError, StoreError,
};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Opaque identifier for one packet instance. Immutable once issued.
pub type PacketId = String;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Flattened identity object: field name to raw JSON value.
/// Absent fields resolve to `None` on lookup, never an error.
pub type FieldMap = HashMap<String, serde_json::Value>;

/// Provider-specific metadata key/value pairs.
pub type MetaInfo = HashMap<String, String>;

/// One record of the packet's audit trail. The trail is append-only at the
/// source and read-only through the facade.
pub type AuditEntry = HashMap<String, String>;

/// Tag key/value pairs, sourced directly from the store gateway.
pub type TagMap = HashMap<String, String>;

// ============================================================================
// ROUTING
// ============================================================================

/// Routing coordinates selecting which provider and logical stage owns a
/// packet's data. Both parts are required for provider resolution and are
/// independent of the packet id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    /// The source packet format (e.g. "CNIE").
    pub source: String,
    /// The logical processing stage (e.g. "NEW", "UPDATE").
    pub process: String,
}

impl RouteKey {
    pub fn new(source: impl Into<String>, process: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            process: process.into(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.process)
    }
}

// ============================================================================
// PACKET CONTENT
// ============================================================================

/// Opaque binary document owned by exactly one packet + source + process
/// combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Raw document bytes.
    pub value: Vec<u8>,
    /// Document type as declared by the provider (e.g. "POA").
    pub doc_type: Option<String>,
    /// Storage format (e.g. "pdf", "jpg").
    pub format: Option<String>,
}

impl Document {
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            doc_type: None,
            format: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// One biometric sample within a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricSegment {
    /// Modality of the sample (e.g. "Iris", "Finger", "Face").
    pub modality: String,
    /// Capture quality score, if the provider reports one.
    pub quality: Option<f32>,
    /// Raw sample bytes.
    pub data: Vec<u8>,
}

/// Biometric samples scoped to a packet, a person role and a requested
/// modality list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiometricRecord {
    /// The person role the samples belong to (e.g. "applicant", "operator").
    pub person: String,
    /// The samples matching the requested modalities.
    pub segments: Vec<BiometricSegment>,
}

impl BiometricRecord {
    pub fn new(person: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            segments: Vec::new(),
        }
    }
}

/// Descriptor for one stored object, as reported by the store gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    /// Source the object belongs to.
    pub source: String,
    /// Process the object belongs to.
    pub process: String,
    /// Object name within the packet.
    pub object_name: String,
    /// Last modification time, if the store tracks it.
    pub last_modified: Option<Timestamp>,
}
