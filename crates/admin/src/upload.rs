//! Media upload queue.
//!
//! ```text
//! Idle -> QueueLoaded(n) -> Uploading(current) -> success: next item, or Finished
//!                                              -> failure: back on current
//! ```
//!
//! Files are uploaded one at a time. A file over [`MAX_UPLOAD_BYTES`] is
//! dropped from the queue when its turn comes. The queue cannot be edited
//! while a request is in flight. `Finished` clears the queue and refreshes
//! the media library.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tourbook_core::error::CoreError;
use tourbook_core::naming::normalize_name;
use tourbook_db::models::media::MediaItem;

use crate::client::{CatalogApi, MediaUpload};
use crate::error::ClientError;

/// 4.5 MB, the largest file the admin accepts.
pub const MAX_UPLOAD_BYTES: usize = 4_718_592;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedFile {
    /// Display name the file will be stored under.
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl QueuedFile {
    /// The display name defaults to the file name without its extension.
    pub fn new(file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        let name = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        };
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    fn to_upload(&self) -> MediaUpload {
        MediaUpload {
            image: format!(
                "data:{};base64,{}",
                self.content_type,
                STANDARD.encode(&self.bytes)
            ),
            name: self.name.clone(),
            media_type: self.content_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    QueueLoaded { pending: usize },
    Uploading { current: usize },
    Finished { uploaded: usize },
}

#[derive(Debug, Default)]
pub struct UploadQueue {
    items: Vec<QueuedFile>,
    current: usize,
    uploaded: usize,
    in_flight: bool,
    finished: bool,
    last_error: Option<String>,
    library: Vec<MediaItem>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UploadState {
        if self.in_flight {
            UploadState::Uploading {
                current: self.current,
            }
        } else if !self.items.is_empty() {
            UploadState::QueueLoaded {
                pending: self.items.len(),
            }
        } else if self.finished {
            UploadState::Finished {
                uploaded: self.uploaded,
            }
        } else {
            UploadState::Idle
        }
    }

    pub fn items(&self) -> &[QueuedFile] {
        &self.items
    }

    /// The file the next upload will send.
    pub fn current(&self) -> Option<&QueuedFile> {
        self.items.get(self.current)
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Media library as of the last refresh.
    pub fn library(&self) -> &[MediaItem] {
        &self.library
    }

    /// Replace the queue with a new selection of files.
    pub fn load(&mut self, files: Vec<QueuedFile>) -> Result<UploadState, ClientError> {
        self.ensure_idle()?;
        self.items = files;
        self.current = 0;
        self.uploaded = 0;
        self.finished = false;
        self.last_error = None;
        Ok(self.state())
    }

    /// Drop the current file without uploading it.
    pub fn remove_current(&mut self) -> Result<QueuedFile, ClientError> {
        self.ensure_idle()?;
        if self.current >= self.items.len() {
            return Err(nothing_queued().into());
        }
        let removed = self.items.remove(self.current);
        self.clamp_current();
        Ok(removed)
    }

    pub fn rename_current(&mut self, name: &str) -> Result<(), ClientError> {
        self.ensure_idle()?;
        let name = normalize_name(name)?;
        let item = self
            .items
            .get_mut(self.current)
            .ok_or_else(nothing_queued)?;
        item.name = name;
        Ok(())
    }

    /// Start uploading the current file and return the request body.
    ///
    /// An oversized file is removed from the queue instead and reported as a
    /// validation error.
    pub fn begin_upload(&mut self) -> Result<MediaUpload, ClientError> {
        self.ensure_idle()?;
        let item = self.current().ok_or_else(nothing_queued)?;
        if item.bytes.len() > MAX_UPLOAD_BYTES {
            let message = format!("File {} too large. Max 4.5MB", item.name);
            tracing::warn!(name = %item.name, size = item.bytes.len(), "File too large, dropped");
            self.items.remove(self.current);
            self.clamp_current();
            // Dropping the last file leaves the queue Idle without a library refresh.
            return Err(CoreError::Validation(message).into());
        }
        if normalize_name(&item.name).is_err() {
            return Err(CoreError::Validation("Name is required".into()).into());
        }
        let upload = item.to_upload();
        self.in_flight = true;
        Ok(upload)
    }

    /// Settle the in-flight upload.
    ///
    /// Success removes the file and moves on; emptying the queue finishes it
    /// and refreshes the library. Failure keeps the file current for a retry
    /// or a skip.
    pub async fn complete_upload(
        &mut self,
        api: &dyn CatalogApi,
        result: Result<MediaItem, ClientError>,
    ) -> Result<UploadState, ClientError> {
        self.in_flight = false;
        match result {
            Ok(item) => {
                tracing::info!(media_id = %item.id, name = %item.name, "Uploaded");
                if self.current < self.items.len() {
                    self.items.remove(self.current);
                    self.clamp_current();
                }
                self.uploaded += 1;
                self.last_error = None;
                if self.items.is_empty() {
                    self.finished = true;
                    self.library = api.list_media().await?;
                }
                Ok(self.state())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upload failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// [`begin_upload`](Self::begin_upload), send, then
    /// [`complete_upload`](Self::complete_upload).
    pub async fn upload_next(&mut self, api: &dyn CatalogApi) -> Result<UploadState, ClientError> {
        let upload = self.begin_upload()?;
        let result = api.upload_media(&upload).await;
        self.complete_upload(api, result).await
    }

    fn ensure_idle(&self) -> Result<(), ClientError> {
        if self.in_flight {
            return Err(
                CoreError::Conflict("The queue cannot change while uploading".into()).into(),
            );
        }
        Ok(())
    }

    fn clamp_current(&mut self) {
        if self.current >= self.items.len() {
            self.current = self.items.len().saturating_sub(1);
        }
    }
}

fn nothing_queued() -> CoreError {
    CoreError::Validation("No file is queued".into())
}
