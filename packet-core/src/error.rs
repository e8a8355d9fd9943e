//! Error types for packet manager operations

use thiserror::Error;

/// Configuration errors, surfaced at registry construction time.
// Display/Error are hand-written (not thiserror-derived) because the
// `source` field holds a routing source string, not an error cause, and
// thiserror unconditionally treats a field named `source` as the cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    DuplicateRoute {
        source: String,
        process: String,
        first: String,
        second: String,
    },

    MissingRequired { field: String },

    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateRoute {
                source,
                process,
                first,
                second,
            } => write!(
                f,
                "Duplicate provider route {source}/{process}: declared by both {first} and {second}"
            ),
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration field: {field}")
            }
            Self::InvalidValue {
                field,
                value,
                reason,
            } => write!(f, "Invalid value for {field}: {value} - {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Store gateway errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Packet not found in store: {id}")]
    PacketNotFound { id: String },

    #[error("Object not found for packet {id}: {object_name}")]
    ObjectNotFound { id: String, object_name: String },

    #[error("Store I/O failure: {reason}")]
    Io { reason: String },
}

/// Cache backend errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache serialization failed for key {key}: {reason}")]
    Serialization { key: String, reason: String },

    #[error("Cache backend failure: {reason}")]
    Backend { reason: String },
}

/// Provider-internal failures. Opaque pass-through: the facade adds no
/// recovery and the shape depends entirely on the specific provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Provider {provider} failed: {reason}")]
pub struct ProviderError {
    pub provider: String,
    pub reason: String,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level error for all packet manager operations.
// Display/Error/From are hand-written (not thiserror-derived) because the
// `source` field holds a routing source string, not an error cause, and
// thiserror unconditionally treats a field named `source` as the cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// No registered provider owns the `(source, process)` pair. Indicates
    /// misconfiguration, not transient failure: never retried.
    NoProviderAvailable { source: String, process: String },

    /// The caller lacks the required capability. Carries only the
    /// capability name, never the data being requested.
    Unauthorized { capability: String },

    Provider(ProviderError),

    Store(StoreError),

    Cache(CacheError),

    Config(ConfigError),
}

impl std::fmt::Display for PacketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoProviderAvailable { source, process } => write!(
                f,
                "No available provider for source {source} and process {process}"
            ),
            Self::Unauthorized { capability } => {
                write!(f, "Caller lacks capability {capability}")
            }
            Self::Provider(e) => std::fmt::Display::fmt(e, f),
            Self::Store(e) => std::fmt::Display::fmt(e, f),
            Self::Cache(e) => std::fmt::Display::fmt(e, f),
            Self::Config(e) => std::fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoProviderAvailable { .. } | Self::Unauthorized { .. } => None,
            Self::Provider(e) => e.source(),
            Self::Store(e) => e.source(),
            Self::Cache(e) => e.source(),
            Self::Config(e) => e.source(),
        }
    }
}

impl From<ProviderError> for PacketError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

impl From<StoreError> for PacketError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<CacheError> for PacketError {
    fn from(e: CacheError) -> Self {
        Self::Cache(e)
    }
}

impl From<ConfigError> for PacketError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl PacketError {
    pub fn no_provider(source: impl Into<String>, process: impl Into<String>) -> Self {
        Self::NoProviderAvailable {
            source: source.into(),
            process: process.into(),
        }
    }
}

/// Result alias used across all packet manager crates.
pub type PacketResult<T> = Result<T, PacketError>;
