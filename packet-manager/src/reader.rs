//! Packet reader facade.
//!
//! Public entry point composing the access gate, the cache layer, the
//! provider registry and the store gateway. Each operation authorizes
//! first, then either serves from cache or resolves a provider, invokes
//! it, and stores the result. Timing diagnostics are emitted for every
//! provider-backed call.

use packet_core::{
    AuditEntry, BiometricRecord, Document, FieldMap, MetaInfo, ObjectDescriptor, PacketId,
    PacketResult, TagMap,
};
use packet_storage::{cache_key, CacheBackend, Operation, PacketStore};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::access::{ensure_capability, required_capability, AccessChecker};
use crate::provider::PacketProvider;
use crate::registry::ProviderRegistry;

/// Stringify a raw identity value the way callers expect: strings stay
/// bare, other JSON values render compactly, null becomes absent.
fn stringify(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// The packet reader facade.
///
/// Stateless per call aside from the shared registry and cache; safe for
/// concurrent use without per-call locking. The registry is swapped
/// wholesale on configuration reload, so readers observe either the
/// fully-old or fully-new provider set.
pub struct PacketReader {
    providers: RwLock<Arc<ProviderRegistry>>,
    store: Arc<dyn PacketStore>,
    cache: Arc<dyn CacheBackend>,
    access: Arc<dyn AccessChecker>,
}

impl PacketReader {
    pub fn new(
        registry: ProviderRegistry,
        store: Arc<dyn PacketStore>,
        cache: Arc<dyn CacheBackend>,
        access: Arc<dyn AccessChecker>,
    ) -> Self {
        Self {
            providers: RwLock::new(Arc::new(registry)),
            store,
            cache,
            access,
        }
    }

    /// Replace the provider set wholesale (configuration reload).
    pub fn reload(&self, registry: ProviderRegistry) {
        let registry = Arc::new(registry);
        match self.providers.write() {
            Ok(mut guard) => *guard = registry,
            Err(poisoned) => *poisoned.into_inner() = registry,
        }
    }

    fn registry(&self) -> Arc<ProviderRegistry> {
        match self.providers.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn resolve(&self, source: &str, process: &str) -> PacketResult<Arc<dyn PacketProvider>> {
        self.registry().resolve(source, process)
    }

    fn authorize(&self, op: Operation) -> PacketResult<()> {
        ensure_capability(self.access.as_ref(), required_capability(op))
    }

    /// Apply the operation's cache policy around a fetch.
    ///
    /// Bypass (or a `Never` policy) skips the cache entirely: no read and
    /// no write. A cache write failure degrades to a log line; the fetched
    /// value is returned regardless.
    async fn cached<T, F, Fut>(
        &self,
        op: Operation,
        key: String,
        bypass: bool,
        fetch: F,
    ) -> PacketResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = PacketResult<T>>,
    {
        if !op.cache_policy().use_cache(bypass) {
            return fetch().await;
        }

        if let Some(hit) = self.cache.get(&key).await? {
            match serde_json::from_slice(&hit.bytes) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    tracing::debug!(key = %key, error = %error, "discarding undecodable cache entry");
                }
            }
        }

        let value = fetch().await?;
        match serde_json::to_vec(&value) {
            Ok(bytes) => {
                if let Err(error) = self.cache.put(&key, bytes).await {
                    tracing::warn!(key = %key, error = %error, "cache write failed");
                }
            }
            Err(error) => {
                tracing::debug!(key = %key, error = %error, "skipping cache write");
            }
        }
        Ok(value)
    }

    /// Fetch the full flattened identity object. Deliberately not cached:
    /// whole-object fetches are cheap to filter in memory and avoid
    /// per-field cache fragmentation, at O(total fields) per lookup.
    async fn all_fields(
        &self,
        id: &PacketId,
        source: &str,
        process: &str,
    ) -> PacketResult<FieldMap> {
        let provider = self.resolve(source, process)?;
        let started = Instant::now();
        let map = provider.all_fields(id, source, process).await?;
        tracing::debug!(
            id = %id,
            source = %source,
            process = %process,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "read full identity object"
        );
        Ok(map)
    }

    /// Get a single field from the identity object.
    ///
    /// When not bypassing, the full field map is fetched and matched
    /// case-insensitively, skipping null values. When bypassing, the
    /// provider answers directly.
    pub async fn field(
        &self,
        id: &PacketId,
        field: &str,
        source: &str,
        process: &str,
        bypass_cache: bool,
    ) -> PacketResult<Option<String>> {
        self.authorize(Operation::Field)?;
        tracing::info!(
            id = %id,
            field = %field,
            source = %source,
            process = %process,
            bypass_cache,
            "field lookup"
        );
        if bypass_cache {
            let provider = self.resolve(source, process)?;
            let started = Instant::now();
            let value = provider.field(id, field, source, process).await?;
            tracing::debug!(
                id = %id,
                field = %field,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "read field from provider"
            );
            Ok(value)
        } else {
            let all = self.all_fields(id, source, process).await?;
            Ok(all
                .iter()
                .find(|(name, value)| name.eq_ignore_ascii_case(field) && !value.is_null())
                .and_then(|(_, value)| stringify(value)))
        }
    }

    /// Get a set of fields from the identity object, null values preserved.
    ///
    /// Unlike [`field`](Self::field), the non-bypass path matches requested
    /// names exactly (case-sensitive containment); the asymmetry is
    /// deliberate and mirrors the observed system.
    pub async fn fields(
        &self,
        id: &PacketId,
        fields: &[String],
        source: &str,
        process: &str,
        bypass_cache: bool,
    ) -> PacketResult<HashMap<String, Option<String>>> {
        self.authorize(Operation::Fields)?;
        tracing::info!(
            id = %id,
            fields = ?fields,
            source = %source,
            process = %process,
            bypass_cache,
            "fields lookup"
        );
        if bypass_cache {
            let provider = self.resolve(source, process)?;
            let started = Instant::now();
            let values = provider.fields(id, fields, source, process).await?;
            tracing::debug!(
                id = %id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "read fields from provider"
            );
            Ok(values)
        } else {
            let all = self.all_fields(id, source, process).await?;
            Ok(all
                .iter()
                .filter(|(name, _)| fields.contains(*name))
                .map(|(name, value)| (name.clone(), stringify(value)))
                .collect())
        }
    }

    /// Get a document by name. Always cache-eligible.
    pub async fn document(
        &self,
        id: &PacketId,
        document_name: &str,
        source: &str,
        process: &str,
    ) -> PacketResult<Document> {
        self.authorize(Operation::Document)?;
        tracing::info!(
            id = %id,
            document_name = %document_name,
            source = %source,
            process = %process,
            "document lookup"
        );
        let key = cache_key(Operation::Document, id, &[document_name, source, process]);
        self.cached(Operation::Document, key, false, || async {
            let provider = self.resolve(source, process)?;
            let started = Instant::now();
            let document = provider.document(id, document_name, source, process).await?;
            tracing::debug!(
                id = %id,
                document_name = %document_name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "read document from provider"
            );
            Ok(document)
        })
        .await
    }

    /// Get biometric samples for a person role and modality list.
    ///
    /// The modality list is serialized only for the diagnostic log; a
    /// serialization failure must not affect the returned record.
    pub async fn biometric(
        &self,
        id: &PacketId,
        person: &str,
        modalities: &[String],
        source: &str,
        process: &str,
        bypass_cache: bool,
    ) -> PacketResult<BiometricRecord> {
        self.authorize(Operation::Biometric)?;
        tracing::info!(
            id = %id,
            person = %person,
            source = %source,
            process = %process,
            bypass_cache,
            "biometric lookup"
        );
        let modality_part = modalities.join(",");
        let key = cache_key(
            Operation::Biometric,
            id,
            &[person, &modality_part, source, process],
        );
        self.cached(Operation::Biometric, key, bypass_cache, || async {
            let provider = self.resolve(source, process)?;
            let started = Instant::now();
            let record = provider
                .biometric(id, person, modalities, source, process)
                .await?;
            let elapsed_ms = started.elapsed().as_millis() as u64;
            match serde_json::to_string(modalities) {
                Ok(listed) => tracing::debug!(
                    id = %id,
                    person = %person,
                    modalities = %listed,
                    elapsed_ms,
                    "read biometrics from provider"
                ),
                Err(_) => tracing::debug!(
                    id = %id,
                    person = %person,
                    elapsed_ms,
                    "read biometrics from provider"
                ),
            }
            Ok(record)
        })
        .await
    }

    /// Get provider-specific packet metadata.
    pub async fn meta_info(
        &self,
        id: &PacketId,
        source: &str,
        process: &str,
        bypass_cache: bool,
    ) -> PacketResult<MetaInfo> {
        self.authorize(Operation::MetaInfo)?;
        tracing::info!(
            id = %id,
            source = %source,
            process = %process,
            bypass_cache,
            "meta info lookup"
        );
        let key = cache_key(Operation::MetaInfo, id, &[source, process]);
        self.cached(Operation::MetaInfo, key, bypass_cache, || async {
            let provider = self.resolve(source, process)?;
            let started = Instant::now();
            let meta = provider.meta_info(id, source, process).await?;
            tracing::debug!(
                id = %id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "read meta info from provider"
            );
            Ok(meta)
        })
        .await
    }

    /// Get the packet's audit trail, in order.
    ///
    /// An explicit bypass must never serve stale cached data: it skips
    /// both cache read and cache write.
    pub async fn audits(
        &self,
        id: &PacketId,
        source: &str,
        process: &str,
        bypass_cache: bool,
    ) -> PacketResult<Vec<AuditEntry>> {
        self.authorize(Operation::Audits)?;
        tracing::info!(
            id = %id,
            source = %source,
            process = %process,
            bypass_cache,
            "audit trail lookup"
        );
        let key = cache_key(Operation::Audits, id, &[source, process]);
        self.cached(Operation::Audits, key, bypass_cache, || async {
            let provider = self.resolve(source, process)?;
            let started = Instant::now();
            let trail = provider.audit_info(id, source, process).await?;
            tracing::debug!(
                id = %id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "read audit trail from provider"
            );
            Ok(trail)
        })
        .await
    }

    /// Get the packet's tags, routed to the store gateway. Never consults
    /// the provider registry.
    pub async fn tags(&self, id: &PacketId) -> PacketResult<TagMap> {
        self.authorize(Operation::Tags)?;
        let key = cache_key(Operation::Tags, id, &[]);
        self.cached(Operation::Tags, key, false, || async {
            let started = Instant::now();
            let tags = self.store.tags(id).await?;
            tracing::debug!(
                id = %id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "read tags from store"
            );
            Ok(tags)
        })
        .await
    }

    /// Get the provider's full field name set.
    pub async fn all_keys(
        &self,
        id: &PacketId,
        source: &str,
        process: &str,
    ) -> PacketResult<BTreeSet<String>> {
        self.authorize(Operation::AllKeys)?;
        let all = self.all_fields(id, source, process).await?;
        Ok(all.into_keys().collect())
    }

    /// List descriptors for every object stored under a packet id, routed
    /// to the store gateway. Never consults the provider registry.
    pub async fn info(&self, id: &PacketId) -> PacketResult<Vec<ObjectDescriptor>> {
        self.authorize(Operation::Info)?;
        let started = Instant::now();
        let objects = self.store.list_objects(id).await?;
        tracing::debug!(
            id = %id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "listed stored objects"
        );
        Ok(objects)
    }

    /// Provider-defined packet validity check. Never cached.
    pub async fn validate_packet(
        &self,
        id: &PacketId,
        source: &str,
        process: &str,
    ) -> PacketResult<bool> {
        self.authorize(Operation::ValidatePacket)?;
        let provider = self.resolve(source, process)?;
        let started = Instant::now();
        let valid = provider.validate(id, source, process).await?;
        tracing::debug!(
            id = %id,
            source = %source,
            process = %process,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "validated packet"
        );
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AllowAll, Capability, StaticAccessChecker};
    use crate::testing::StubProvider;
    use packet_core::{BiometricSegment, PacketError, RouteKey};
    use packet_storage::{MemoryCacheBackend, MemoryPacketStore};
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn pkt(id: &str) -> PacketId {
        id.to_string()
    }

    fn reader_with(providers: Vec<Arc<StubProvider>>) -> PacketReader {
        reader_with_access(providers, Arc::new(AllowAll))
    }

    fn reader_with_access(
        providers: Vec<Arc<StubProvider>>,
        access: Arc<dyn AccessChecker>,
    ) -> PacketReader {
        let dyn_providers: Vec<Arc<dyn PacketProvider>> = providers
            .into_iter()
            .map(|p| p as Arc<dyn PacketProvider>)
            .collect();
        let registry = ProviderRegistry::build(dyn_providers).unwrap();
        PacketReader::new(
            registry,
            Arc::new(MemoryPacketStore::new()),
            Arc::new(MemoryCacheBackend::with_defaults()),
            access,
        )
    }

    fn cnie_provider() -> StubProvider {
        StubProvider::new("cnie-reader", vec![RouteKey::new("CNIE", "NEW")])
    }

    #[tokio::test]
    async fn field_matches_case_insensitively() {
        let provider = Arc::new(cnie_provider().with_field("Name", json!("Amina")));
        let reader = reader_with(vec![provider.clone()]);

        let value = reader
            .field(&pkt("pkt-1"), "name", "CNIE", "NEW", false)
            .await
            .unwrap();
        assert_eq!(value, Some("Amina".to_string()));
        // Served through the whole-map path, not the per-field provider call.
        assert_eq!(provider.calls.all_fields.load(Ordering::Relaxed), 1);
        assert_eq!(provider.calls.field.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn field_skips_null_values_and_absent_names() {
        let provider = Arc::new(
            cnie_provider()
                .with_field("email", json!(null))
                .with_field("age", json!(34)),
        );
        let reader = reader_with(vec![provider]);

        let id = pkt("pkt-1");
        assert_eq!(
            reader.field(&id, "email", "CNIE", "NEW", false).await.unwrap(),
            None
        );
        assert_eq!(
            reader.field(&id, "missing", "CNIE", "NEW", false).await.unwrap(),
            None
        );
        // Non-string values come back stringified.
        assert_eq!(
            reader.field(&id, "AGE", "CNIE", "NEW", false).await.unwrap(),
            Some("34".to_string())
        );
    }

    #[tokio::test]
    async fn field_bypass_goes_straight_to_provider() {
        let provider = Arc::new(cnie_provider().with_field("Name", json!("Amina")));
        let reader = reader_with(vec![provider.clone()]);

        // The provider's direct lookup is exact-match; "Name" hits it.
        let value = reader
            .field(&pkt("pkt-1"), "Name", "CNIE", "NEW", true)
            .await
            .unwrap();
        assert_eq!(value, Some("Amina".to_string()));
        assert_eq!(provider.calls.field.load(Ordering::Relaxed), 1);
        assert_eq!(provider.calls.all_fields.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn fields_returns_exactly_the_requested_names() {
        let provider = Arc::new(
            cnie_provider()
                .with_field("A", json!("1"))
                .with_field("B", json!(null))
                .with_field("C", json!("3")),
        );
        let reader = reader_with(vec![provider]);

        let requested = vec!["A".to_string(), "B".to_string()];
        let values = reader
            .fields(&pkt("pkt-1"), &requested, "CNIE", "NEW", false)
            .await
            .unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("A"), Some(&Some("1".to_string())));
        // Null preserved as null, not dropped.
        assert_eq!(values.get("B"), Some(&None));
        assert!(!values.contains_key("C"));
    }

    #[tokio::test]
    async fn fields_containment_is_case_sensitive() {
        let provider = Arc::new(cnie_provider().with_field("Name", json!("Amina")));
        let reader = reader_with(vec![provider]);

        let requested = vec!["name".to_string()];
        let values = reader
            .fields(&pkt("pkt-1"), &requested, "CNIE", "NEW", false)
            .await
            .unwrap();
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn document_is_cached_across_calls() {
        let provider = Arc::new(
            cnie_provider().with_document("POA", Document::new(b"proof-of-address".to_vec())),
        );
        let reader = reader_with(vec![provider.clone()]);

        let id = pkt("pkt-1");
        let first = reader.document(&id, "POA", "CNIE", "NEW").await.unwrap();
        let second = reader.document(&id, "POA", "CNIE", "NEW").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls.document.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn meta_info_bypass_false_hits_provider_at_most_once() {
        let provider = Arc::new(cnie_provider().with_meta("creationDate", "2026-01-05"));
        let reader = reader_with(vec![provider.clone()]);

        let id = pkt("pkt-1");
        reader.meta_info(&id, "CNIE", "NEW", false).await.unwrap();
        reader.meta_info(&id, "CNIE", "NEW", false).await.unwrap();
        assert_eq!(provider.calls.meta_info.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn meta_info_bypass_true_hits_provider_every_call() {
        let provider = Arc::new(cnie_provider().with_meta("creationDate", "2026-01-05"));
        let reader = reader_with(vec![provider.clone()]);

        let id = pkt("pkt-1");
        reader.meta_info(&id, "CNIE", "NEW", true).await.unwrap();
        reader.meta_info(&id, "CNIE", "NEW", true).await.unwrap();
        assert_eq!(provider.calls.meta_info.load(Ordering::Relaxed), 2);

        // Bypass skipped the cache write too: a non-bypass call still has
        // to reach the provider.
        reader.meta_info(&id, "CNIE", "NEW", false).await.unwrap();
        assert_eq!(provider.calls.meta_info.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn audits_bypass_never_serves_cached_data() {
        let mut entry = AuditEntry::new();
        entry.insert("event".to_string(), "PACKET_UPLOAD".to_string());
        let provider = Arc::new(cnie_provider().with_audit(entry));
        let reader = reader_with(vec![provider.clone()]);

        let id = pkt("pkt-1");
        reader.audits(&id, "CNIE", "NEW", false).await.unwrap();
        reader.audits(&id, "CNIE", "NEW", false).await.unwrap();
        assert_eq!(provider.calls.audit_info.load(Ordering::Relaxed), 1);

        reader.audits(&id, "CNIE", "NEW", true).await.unwrap();
        assert_eq!(provider.calls.audit_info.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn biometric_filters_requested_modalities() {
        let record = BiometricRecord {
            person: "applicant".to_string(),
            segments: vec![
                BiometricSegment {
                    modality: "Iris".to_string(),
                    quality: Some(0.92),
                    data: vec![1],
                },
                BiometricSegment {
                    modality: "Finger".to_string(),
                    quality: Some(0.81),
                    data: vec![2],
                },
            ],
        };
        let provider = Arc::new(cnie_provider().with_biometric("applicant", record));
        let reader = reader_with(vec![provider.clone()]);

        let modalities = vec!["Iris".to_string()];
        let read = reader
            .biometric(&pkt("pkt-1"), "applicant", &modalities, "CNIE", "NEW", false)
            .await
            .unwrap();
        assert_eq!(read.segments.len(), 1);
        assert_eq!(read.segments[0].modality, "Iris");

        // Cached under the person + modality key.
        reader
            .biometric(&pkt("pkt-1"), "applicant", &modalities, "CNIE", "NEW", false)
            .await
            .unwrap();
        assert_eq!(provider.calls.biometric.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn unauthorized_document_never_reaches_the_provider() {
        let provider =
            Arc::new(cnie_provider().with_document("POA", Document::new(b"secret".to_vec())));
        let access = Arc::new(StaticAccessChecker::new().grant(Capability::DataRead));
        let reader = reader_with_access(vec![provider.clone()], access);

        let err = reader
            .document(&pkt("pkt-1"), "POA", "CNIE", "NEW")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PacketError::Unauthorized {
                capability: "DOCUMENT_READ".to_string(),
            }
        );
        assert_eq!(provider.calls.document.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn tags_and_info_work_with_an_empty_provider_set() {
        let store = Arc::new(MemoryPacketStore::new());
        let mut tags = TagMap::new();
        tags.insert("stage".to_string(), "uin-generated".to_string());
        store.insert_tags("pkt-1", tags);
        store.insert_objects(
            "pkt-1",
            vec![ObjectDescriptor {
                source: "CNIE".to_string(),
                process: "NEW".to_string(),
                object_name: "id".to_string(),
                last_modified: None,
            }],
        );

        let reader = PacketReader::new(
            ProviderRegistry::empty(),
            store,
            Arc::new(MemoryCacheBackend::with_defaults()),
            Arc::new(AllowAll),
        );

        let id = pkt("pkt-1");
        let tags = reader.tags(&id).await.unwrap();
        assert_eq!(tags.get("stage").map(String::as_str), Some("uin-generated"));

        let objects = reader.info(&id).await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].object_name, "id");
    }

    #[tokio::test]
    async fn validate_packet_forwards_to_the_owning_provider() {
        let provider = Arc::new(cnie_provider().with_validity(true));
        let reader = reader_with(vec![provider.clone()]);

        let id = pkt("pkt-1");
        assert!(reader.validate_packet(&id, "CNIE", "NEW").await.unwrap());
        assert_eq!(provider.calls.validate.load(Ordering::Relaxed), 1);

        let err = reader.validate_packet(&id, "CNIE", "UPDATE").await.unwrap_err();
        assert!(matches!(err, PacketError::NoProviderAvailable { .. }));
    }

    #[tokio::test]
    async fn validate_packet_is_never_cached() {
        let provider = Arc::new(cnie_provider());
        let reader = reader_with(vec![provider.clone()]);

        let id = pkt("pkt-1");
        reader.validate_packet(&id, "CNIE", "NEW").await.unwrap();
        reader.validate_packet(&id, "CNIE", "NEW").await.unwrap();
        assert_eq!(provider.calls.validate.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn all_keys_returns_the_full_name_set() {
        let provider = Arc::new(
            cnie_provider()
                .with_field("name", json!("Amina"))
                .with_field("dob", json!("1992-03-14")),
        );
        let reader = reader_with(vec![provider]);

        let keys = reader.all_keys(&pkt("pkt-1"), "CNIE", "NEW").await.unwrap();
        assert_eq!(
            keys.into_iter().collect::<Vec<_>>(),
            vec!["dob".to_string(), "name".to_string()]
        );
    }

    #[tokio::test]
    async fn reload_swaps_the_provider_set_wholesale() {
        let old = Arc::new(cnie_provider());
        let reader = reader_with(vec![old]);

        let new_provider: Arc<dyn PacketProvider> = Arc::new(
            StubProvider::new("opencrvs-reader", vec![RouteKey::new("OPENCRVS", "NEW")])
                .with_validity(true),
        );
        reader.reload(ProviderRegistry::build(vec![new_provider]).unwrap());

        let id = pkt("pkt-1");
        assert!(reader
            .validate_packet(&id, "OPENCRVS", "NEW")
            .await
            .is_ok());
        let err = reader.validate_packet(&id, "CNIE", "NEW").await.unwrap_err();
        assert!(matches!(err, PacketError::NoProviderAvailable { .. }));
    }
}
