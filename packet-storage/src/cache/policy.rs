//! Per-operation cache policy, expressed as data.
//!
//! Each facade operation maps to a policy telling the caller whether its
//! result is cache-eligible, and under what condition. Bypass means the
//! cache is skipped entirely: no read, no write.

use packet_core::PacketId;

/// The read operations exposed by the packet reader facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Field,
    Fields,
    Document,
    Biometric,
    MetaInfo,
    Audits,
    Tags,
    AllKeys,
    Info,
    ValidatePacket,
}

impl Operation {
    /// Operation name used as the cache key prefix and in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Field => "field",
            Operation::Fields => "fields",
            Operation::Document => "documents",
            Operation::Biometric => "biometrics",
            Operation::MetaInfo => "metainfo",
            Operation::Audits => "audits",
            Operation::Tags => "tags",
            Operation::AllKeys => "allkeys",
            Operation::Info => "info",
            Operation::ValidatePacket => "validate",
        }
    }

    /// The cache policy for this operation.
    pub fn cache_policy(self) -> CachePolicy {
        match self {
            // Document and tag reads carry no bypass flag.
            Operation::Document | Operation::Tags => CachePolicy::Always,
            Operation::Biometric | Operation::MetaInfo | Operation::Audits => {
                CachePolicy::WhenNotBypassed
            }
            // Field lookups filter a whole-map fetch client-side instead of
            // fragmenting the cache per field; the rest must stay fresh.
            Operation::Field
            | Operation::Fields
            | Operation::AllKeys
            | Operation::Info
            | Operation::ValidatePacket => CachePolicy::Never,
        }
    }
}

/// Whether and when an operation's result may be served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Always cache-eligible; the operation exposes no bypass flag.
    Always,
    /// Cache-eligible only when the caller's bypass flag is false.
    WhenNotBypassed,
    /// Never cached.
    Never,
}

impl CachePolicy {
    /// Whether the cache should be consulted and written for this call.
    pub fn use_cache(self, bypass: bool) -> bool {
        match self {
            CachePolicy::Always => true,
            CachePolicy::WhenNotBypassed => !bypass,
            CachePolicy::Never => false,
        }
    }
}

/// Build the cache key for an operation from its discriminating arguments.
///
/// The key is the operation name joined with each argument by `-`, e.g.
/// `documents-pkt1-POA-CNIE-NEW`.
pub fn cache_key(op: Operation, id: &PacketId, parts: &[&str]) -> String {
    let mut key = String::with_capacity(32);
    key.push_str(op.as_str());
    key.push('-');
    key.push_str(id);
    for part in parts {
        key.push('-');
        key.push_str(part);
    }
    key
}
