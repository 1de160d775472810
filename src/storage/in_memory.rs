use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use tokio::sync::RwLock;

use crate::storage::object_store::{ObjectStore, StoreError};
use crate::types::{NewObject, StoredObject};

/// In-memory object store for testing/development
#[derive(Clone)]
pub struct InMemoryStore {
    objects: Arc<RwLock<HashMap<String, StoredEntry>>>,
    next_id: Arc<AtomicU64>,
}

/// One object as recorded by the in-memory store
#[derive(Clone)]
pub struct StoredEntry {
    pub name: String,
    pub mime_type: String,
    pub folder_id: String,
    pub data: Bytes,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Look up a stored object by its assigned id.
    pub async fn get(&self, id: &str) -> Option<StoredEntry> {
        self.objects.read().await.get(id).cloned()
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryStore {
    async fn create_object(
        &self,
        _access_token: &str,
        object: &NewObject,
        data: Bytes,
    ) -> Result<StoredObject, StoreError> {
        let id = format!("obj-{}", self.next_id.fetch_add(1, Ordering::Relaxed));

        let entry = StoredEntry {
            name: object.name.clone(),
            mime_type: object.mime_type.clone(),
            folder_id: object.folder_id.clone(),
            data,
        };

        let mut objects = self.objects.write().await;
        objects.insert(id.clone(), entry);

        Ok(StoredObject {
            id,
            name: object.name.clone(),
        })
    }
}
