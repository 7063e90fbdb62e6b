//! In-process [`BlobStore`] for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::{key_from_url, public_url, BlobStore};

pub const MEMORY_BASE_URL: &str = "https://blob.test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, StoredBlob>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// The blob behind `url`, if stored.
    pub async fn get(&self, url: &str) -> Option<StoredBlob> {
        let key = key_from_url(MEMORY_BASE_URL, url)?;
        self.blobs.lock().await.get(&key).cloned()
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.get(url).await.is_some()
    }

    pub async fn len(&self) -> usize {
        self.blobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Upload("memory blob store rejects uploads".into()));
        }
        self.blobs.lock().await.insert(
            key.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(public_url(MEMORY_BASE_URL, key))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Delete("memory blob store rejects deletes".into()));
        }
        let key = key_from_url(MEMORY_BASE_URL, url)
            .ok_or_else(|| StorageError::Delete(format!("{url} is not a blob URL")))?;
        self.blobs.lock().await.remove(&key);
        Ok(())
    }

    fn public_base_url(&self) -> &str {
        MEMORY_BASE_URL
    }
}
