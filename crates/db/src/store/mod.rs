//! The catalog store seam.
//!
//! Handlers depend on [`CatalogStore`] rather than on a pool, so the HTTP
//! layer can run against Postgres in production and against
//! [`MemoryCatalogStore`] in tests. One sub-trait per collection keeps the
//! method lists readable.

mod memory;
mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

use async_trait::async_trait;
use tourbook_core::types::{DbId, Timestamp};

use crate::models::category::Category;
use crate::models::media::MediaItem;
use crate::models::query::{ListQuery, TourQuery};
use crate::models::taxonomy::{TaxonomyKind, TaxonomyTerm};
use crate::models::tour::{Tour, TourPatch};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A page of records plus the total number of matches.
pub type Page<T> = (Vec<T>, i64);

#[async_trait]
pub trait TourStore: Send + Sync {
    async fn list_tours(&self, query: &TourQuery) -> StoreResult<Page<Tour>>;
    async fn find_tour(&self, id: DbId) -> StoreResult<Option<Tour>>;
    async fn find_tour_by_slug(&self, slug: &str) -> StoreResult<Option<Tour>>;
    async fn insert_tour(&self, tour: &Tour) -> StoreResult<Tour>;
    /// Overwrite the editable fields; `created_at`, `rating` and
    /// `review_count` keep their stored values.
    async fn replace_tour(&self, tour: &Tour) -> StoreResult<Option<Tour>>;
    async fn patch_tour(
        &self,
        id: DbId,
        patch: &TourPatch,
        now: Timestamp,
    ) -> StoreResult<Option<Tour>>;
    async fn delete_tour(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Categories ordered by `sequence`.
    async fn list_categories(&self, query: &ListQuery) -> StoreResult<Page<Category>>;
    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>>;
    /// Case-insensitive name lookup.
    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>>;
    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;
    async fn max_category_sequence(&self) -> StoreResult<Option<i32>>;
    async fn insert_category(&self, category: &Category) -> StoreResult<Category>;
    /// Persist name, description, image and `updated_at`.
    async fn update_category(&self, category: &Category) -> StoreResult<Option<Category>>;
    async fn delete_category(&self, id: DbId) -> StoreResult<bool>;
    /// Apply `(id, sequence)` pairs, skipping unknown ids. Returns how many
    /// categories changed.
    async fn reorder_categories(&self, order: &[(DbId, i32)]) -> StoreResult<u64>;
}

#[async_trait]
pub trait TaxonomyStore: Send + Sync {
    async fn list_terms(
        &self,
        kind: TaxonomyKind,
        query: &ListQuery,
    ) -> StoreResult<Page<TaxonomyTerm>>;
    async fn find_term(&self, kind: TaxonomyKind, id: DbId) -> StoreResult<Option<TaxonomyTerm>>;
    /// Case-insensitive name lookup.
    async fn find_term_by_name(
        &self,
        kind: TaxonomyKind,
        name: &str,
    ) -> StoreResult<Option<TaxonomyTerm>>;
    async fn insert_term(&self, kind: TaxonomyKind, term: &TaxonomyTerm)
        -> StoreResult<TaxonomyTerm>;
    async fn rename_term(
        &self,
        kind: TaxonomyKind,
        id: DbId,
        name: &str,
        now: Timestamp,
    ) -> StoreResult<Option<TaxonomyTerm>>;
    async fn delete_term(&self, kind: TaxonomyKind, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn list_media(&self, query: &ListQuery) -> StoreResult<Page<MediaItem>>;
    async fn find_media(&self, id: DbId) -> StoreResult<Option<MediaItem>>;
    async fn insert_media(&self, item: &MediaItem) -> StoreResult<MediaItem>;
    async fn rename_media(&self, id: DbId, name: &str) -> StoreResult<Option<MediaItem>>;
    async fn delete_media(&self, id: DbId) -> StoreResult<bool>;
}

/// Everything the catalog service needs from persistence.
#[async_trait]
pub trait CatalogStore: TourStore + CategoryStore + TaxonomyStore + MediaStore {
    /// Readiness probe.
    async fn ping(&self) -> StoreResult<()>;

    /// Release connections on shutdown.
    async fn close(&self);
}
