use std::sync::Arc;

use tourbook_db::CatalogStore;
use tourbook_storage::BlobStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every field is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog persistence (Postgres in production, in-memory in tests).
    pub store: Arc<dyn CatalogStore>,
    /// Blob storage for uploaded images.
    pub blobs: Arc<dyn BlobStore>,
    pub config: Arc<ServerConfig>,
}
