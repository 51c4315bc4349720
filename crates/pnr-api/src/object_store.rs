//! # Object Store Capability
//!
//! The ingestion pipeline writes material files through the [`ObjectStore`]
//! trait. Two implementations ship with the service:
//!
//! - [`CloudinaryClient`] from `pnr-object-store`, used when credentials are
//!   configured.
//! - [`InMemoryObjectStore`], used for development and tests. Objects live
//!   only as long as the process.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use pnr_object_store::{
    CloudinaryClient, ConfigError, ObjectStoreConfig, ObjectStoreError, StoredObject,
};

/// Write-only view of an object store.
#[axum::async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug {
    /// Store `bytes` as `folder/key`, returning its public URL and id.
    async fn put(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        key: &str,
    ) -> Result<StoredObject, ObjectStoreError>;

    /// Short backend label for logs and the service descriptor.
    fn backend(&self) -> &'static str;
}

#[axum::async_trait]
impl ObjectStore for CloudinaryClient {
    async fn put(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        key: &str,
    ) -> Result<StoredObject, ObjectStoreError> {
        self.upload_raw(bytes, folder, key).await
    }

    fn backend(&self) -> &'static str {
        "cloudinary"
    }
}

/// Process-local object store keyed by `folder/key`.
///
/// A second write to the same key replaces the first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored object by public id.
    pub fn get(&self, public_id: &str) -> Option<Vec<u8>> {
        self.objects.read().get(public_id).cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[axum::async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        key: &str,
    ) -> Result<StoredObject, ObjectStoreError> {
        let public_id = format!("{folder}/{key}");
        self.objects.write().insert(public_id.clone(), bytes);
        Ok(StoredObject {
            secure_url: format!("memory://{public_id}"),
            public_id,
        })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Pick the backend for a loaded object store configuration.
///
/// Absent credentials fall back to [`InMemoryObjectStore`]. A configuration
/// that is present but malformed is an error, so a typo never silently
/// diverts uploads into process memory.
pub fn from_config(
    config: Result<ObjectStoreConfig, ConfigError>,
) -> Result<Arc<dyn ObjectStore>, ObjectStoreError> {
    match config {
        Ok(config) => {
            tracing::info!(?config, "object store configured");
            Ok(Arc::new(CloudinaryClient::new(config)?))
        }
        Err(e) if e.is_missing() => {
            tracing::warn!(
                "Object store not configured: {e}. Uploads are kept in memory and lost on restart."
            );
            Ok(Arc::new(InMemoryObjectStore::new()))
        }
        Err(e) => Err(e.into()),
    }
}
