#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid upload payload: {0}")]
    InvalidPayload(String),

    #[error("Blob upload failed: {0}")]
    Upload(String),

    #[error("Blob delete failed: {0}")]
    Delete(String),

    #[error("Blob storage misconfigured: {0}")]
    Config(String),
}
