use crate::error::StorageError;

/// Blob storage settings, read from the environment.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    pub bucket: String,
    /// Public URL prefix of stored blobs. Also identifies blob-hosted URLs.
    pub public_base_url: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint_url: Option<String>,
    pub region: String,
}

impl BlobConfig {
    /// | Env Var                | Default     |
    /// |------------------------|-------------|
    /// | `BLOB_BUCKET`          | required    |
    /// | `BLOB_PUBLIC_BASE_URL` | required    |
    /// | `BLOB_ENDPOINT_URL`    | unset       |
    /// | `BLOB_REGION`          | `us-east-1` |
    pub fn from_env() -> Result<Self, StorageError> {
        let required = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| StorageError::Config(format!("{key} must be set")))
        };
        Ok(Self {
            bucket: required("BLOB_BUCKET")?,
            public_base_url: required("BLOB_PUBLIC_BASE_URL")?,
            endpoint_url: std::env::var("BLOB_ENDPOINT_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            region: std::env::var("BLOB_REGION").unwrap_or_else(|_| "us-east-1".into()),
        })
    }
}
