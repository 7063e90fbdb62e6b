//! Blob helpers shared by the tour, category and media handlers.

use tourbook_core::naming::timestamped_key;
use tourbook_storage::{decode_payload, BlobStore};

use crate::error::AppResult;

/// Where an uploaded payload ended up.
#[derive(Debug, Clone)]
pub struct UploadedBlob {
    pub url: String,
    pub content_type: String,
}

/// Decode a base64 / `data:` payload and upload it under
/// `{prefix/}{millis}-{name}`.
///
/// The MIME type of a `data:` URI wins; `fallback_type` covers bare base64.
pub async fn upload_payload(
    blobs: &dyn BlobStore,
    prefix: Option<&str>,
    name: &str,
    payload: &str,
    fallback_type: &str,
) -> AppResult<UploadedBlob> {
    let decoded = decode_payload(payload)?;
    let content_type = decoded
        .content_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback_type)
        .to_string();
    let key = timestamped_key(prefix, chrono::Utc::now().timestamp_millis(), name);
    let url = blobs.put(&key, decoded.bytes, &content_type).await?;
    tracing::info!(key = %key, url = %url, "Payload uploaded");
    Ok(UploadedBlob { url, content_type })
}

/// Delete every blob-hosted URL in `urls`, logging failures instead of
/// returning them. URLs outside the blob host are skipped.
pub async fn delete_best_effort<'a, I>(blobs: &dyn BlobStore, urls: I)
where
    I: IntoIterator<Item = &'a str>,
{
    for url in urls {
        if !blobs.owns(url) {
            continue;
        }
        if let Err(e) = blobs.delete(url).await {
            tracing::warn!(url, error = %e, "Failed to delete blob");
        }
    }
}
