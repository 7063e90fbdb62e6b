//! Blob storage for uploaded images.
//!
//! [`BlobStore`] is the seam: `put` stores bytes under a key and returns the
//! public URL, `delete` removes a blob by that URL. [`S3BlobStore`] talks to
//! any S3-compatible service; [`MemoryBlobStore`] backs tests.

pub mod config;
pub mod error;
pub mod memory;
pub mod payload;
pub mod s3;

use async_trait::async_trait;

pub use config::BlobConfig;
pub use error::StorageError;
pub use memory::MemoryBlobStore;
pub use payload::{decode_payload, is_data_uri, DecodedPayload};
pub use s3::S3BlobStore;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URL.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;

    /// Delete the blob behind a URL previously returned by [`BlobStore::put`].
    async fn delete(&self, url: &str) -> Result<(), StorageError>;

    /// Base URL every blob URL starts with.
    fn public_base_url(&self) -> &str;

    /// Whether `url` points into this store. Only such URLs may be deleted.
    fn owns(&self, url: &str) -> bool {
        key_from_url(self.public_base_url(), url).is_some()
    }
}

/// `{base}/{key}` without doubling the separator.
///
/// Each key segment is percent-encoded so names with spaces, `#` or `?`
/// stay a single path.
pub fn public_url(base: &str, key: &str) -> String {
    let path = key
        .trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{path}", base.trim_end_matches('/'))
}

/// Inverse of [`public_url`]: the decoded key when `url` lives under `base`.
pub fn key_from_url(base: &str, url: &str) -> Option<String> {
    let base = base.trim_end_matches('/');
    let encoded = url
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|key| !key.is_empty())?;
    urlencoding::decode(encoded).ok().map(|key| key.into_owned())
}
