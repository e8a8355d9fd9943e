//! Test support: a configurable stub provider with invocation counters.
//!
//! Lives in the library (not behind `cfg(test)`) so integration and
//! property suites can share it.

use async_trait::async_trait;
use packet_core::{
    AuditEntry, BiometricRecord, Document, FieldMap, MetaInfo, PacketId, PacketResult,
    ProviderError, RouteKey,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::provider::PacketProvider;

/// Per-operation invocation counters.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub field: AtomicUsize,
    pub fields: AtomicUsize,
    pub document: AtomicUsize,
    pub biometric: AtomicUsize,
    pub meta_info: AtomicUsize,
    pub audit_info: AtomicUsize,
    pub all_fields: AtomicUsize,
    pub validate: AtomicUsize,
}

impl CallCounts {
    /// Total provider invocations across all operations.
    pub fn total(&self) -> usize {
        self.field.load(Ordering::Relaxed)
            + self.fields.load(Ordering::Relaxed)
            + self.document.load(Ordering::Relaxed)
            + self.biometric.load(Ordering::Relaxed)
            + self.meta_info.load(Ordering::Relaxed)
            + self.audit_info.load(Ordering::Relaxed)
            + self.all_fields.load(Ordering::Relaxed)
            + self.validate.load(Ordering::Relaxed)
    }
}

/// Stub provider serving fixture data for its declared routes.
pub struct StubProvider {
    name: String,
    routes: Vec<RouteKey>,
    identity: FieldMap,
    documents: HashMap<String, Document>,
    biometrics: HashMap<String, BiometricRecord>,
    meta: MetaInfo,
    audits: Vec<AuditEntry>,
    valid: AtomicBool,
    /// Invocation counters, readable by tests.
    pub calls: CallCounts,
}

impl StubProvider {
    pub fn new(name: impl Into<String>, routes: Vec<RouteKey>) -> Self {
        Self {
            name: name.into(),
            routes,
            identity: FieldMap::new(),
            documents: HashMap::new(),
            biometrics: HashMap::new(),
            meta: MetaInfo::new(),
            audits: Vec::new(),
            valid: AtomicBool::new(true),
            calls: CallCounts::default(),
        }
    }

    /// Add one identity field (raw JSON value, so nulls can be modeled).
    pub fn with_field(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.identity.insert(name.into(), value);
        self
    }

    pub fn with_document(mut self, name: impl Into<String>, document: Document) -> Self {
        self.documents.insert(name.into(), document);
        self
    }

    pub fn with_biometric(mut self, person: impl Into<String>, record: BiometricRecord) -> Self {
        self.biometrics.insert(person.into(), record);
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn with_audit(mut self, entry: AuditEntry) -> Self {
        self.audits.push(entry);
        self
    }

    pub fn with_validity(self, valid: bool) -> Self {
        self.valid.store(valid, Ordering::Relaxed);
        self
    }

    fn stringify(value: &serde_json::Value) -> Option<String> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[async_trait]
impl PacketProvider for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn routes(&self) -> Vec<RouteKey> {
        self.routes.clone()
    }

    async fn field(
        &self,
        _id: &PacketId,
        field: &str,
        _source: &str,
        _process: &str,
    ) -> PacketResult<Option<String>> {
        self.calls.field.fetch_add(1, Ordering::Relaxed);
        Ok(self.identity.get(field).and_then(Self::stringify))
    }

    async fn fields(
        &self,
        _id: &PacketId,
        fields: &[String],
        _source: &str,
        _process: &str,
    ) -> PacketResult<HashMap<String, Option<String>>> {
        self.calls.fields.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .identity
            .iter()
            .filter(|(k, _)| fields.contains(*k))
            .map(|(k, v)| (k.clone(), Self::stringify(v)))
            .collect())
    }

    async fn document(
        &self,
        id: &PacketId,
        name: &str,
        _source: &str,
        _process: &str,
    ) -> PacketResult<Document> {
        self.calls.document.fetch_add(1, Ordering::Relaxed);
        self.documents.get(name).cloned().ok_or_else(|| {
            ProviderError::new(&self.name, format!("no document {name} in packet {id}")).into()
        })
    }

    async fn biometric(
        &self,
        id: &PacketId,
        person: &str,
        modalities: &[String],
        _source: &str,
        _process: &str,
    ) -> PacketResult<BiometricRecord> {
        self.calls.biometric.fetch_add(1, Ordering::Relaxed);
        let record = self.biometrics.get(person).cloned().ok_or_else(|| {
            ProviderError::new(&self.name, format!("no biometrics for {person} in {id}"))
        })?;
        if modalities.is_empty() {
            return Ok(record);
        }
        let segments = record
            .segments
            .into_iter()
            .filter(|s| modalities.contains(&s.modality))
            .collect();
        Ok(BiometricRecord {
            person: record.person,
            segments,
        })
    }

    async fn meta_info(
        &self,
        _id: &PacketId,
        _source: &str,
        _process: &str,
    ) -> PacketResult<MetaInfo> {
        self.calls.meta_info.fetch_add(1, Ordering::Relaxed);
        Ok(self.meta.clone())
    }

    async fn audit_info(
        &self,
        _id: &PacketId,
        _source: &str,
        _process: &str,
    ) -> PacketResult<Vec<AuditEntry>> {
        self.calls.audit_info.fetch_add(1, Ordering::Relaxed);
        Ok(self.audits.clone())
    }

    async fn all_fields(
        &self,
        _id: &PacketId,
        _source: &str,
        _process: &str,
    ) -> PacketResult<FieldMap> {
        self.calls.all_fields.fetch_add(1, Ordering::Relaxed);
        Ok(self.identity.clone())
    }

    async fn validate(&self, _id: &PacketId, _source: &str, _process: &str) -> PacketResult<bool> {
        self.calls.validate.fetch_add(1, Ordering::Relaxed);
        Ok(self.valid.load(Ordering::Relaxed))
    }
}
