//! Decoding of base64 upload payloads.
//!
//! The admin UI sends images either as bare base64 or as a `data:` URI
//! (`data:image/png;base64,....`). Both decode to raw bytes; the URI form
//! also carries a MIME type.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub bytes: Vec<u8>,
    /// MIME type from a `data:` URI header, if any.
    pub content_type: Option<String>,
}

pub fn is_data_uri(raw: &str) -> bool {
    raw.trim_start().starts_with("data:")
}

/// Decode bare base64 or a base64 `data:` URI.
pub fn decode_payload(raw: &str) -> Result<DecodedPayload, StorageError> {
    let raw = raw.trim();
    let (content_type, encoded) = match raw.strip_prefix("data:") {
        Some(uri) => {
            let (header, data) = uri.split_once(',').ok_or_else(|| {
                StorageError::InvalidPayload("data URI has no ',' separator".into())
            })?;
            let mime = header.strip_suffix(";base64").ok_or_else(|| {
                StorageError::InvalidPayload("only base64 data URIs are supported".into())
            })?;
            let mime = (!mime.is_empty()).then(|| mime.to_string());
            (mime, data)
        }
        None => (None, raw),
    };
    if encoded.is_empty() {
        return Err(StorageError::InvalidPayload("payload is empty".into()));
    }
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| StorageError::InvalidPayload(e.to_string()))?;
    Ok(DecodedPayload {
        bytes,
        content_type,
    })
}
