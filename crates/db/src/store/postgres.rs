//! [`CatalogStore`] over a Postgres pool, delegating to the repositories.

use async_trait::async_trait;
use tourbook_core::types::{DbId, Timestamp};

use super::{
    CatalogStore, CategoryStore, MediaStore, Page, StoreResult, TaxonomyStore, TourStore,
};
use crate::models::category::Category;
use crate::models::media::MediaItem;
use crate::models::query::{ListQuery, TourQuery};
use crate::models::taxonomy::{TaxonomyKind, TaxonomyTerm};
use crate::models::tour::{Tour, TourPatch};
use crate::repositories::{CategoryRepo, MediaRepo, TaxonomyRepo, TourRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl TourStore for PgCatalogStore {
    async fn list_tours(&self, query: &TourQuery) -> StoreResult<Page<Tour>> {
        Ok(TourRepo::list(&self.pool, query).await?)
    }

    async fn find_tour(&self, id: DbId) -> StoreResult<Option<Tour>> {
        Ok(TourRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_tour_by_slug(&self, slug: &str) -> StoreResult<Option<Tour>> {
        Ok(TourRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn insert_tour(&self, tour: &Tour) -> StoreResult<Tour> {
        Ok(TourRepo::insert(&self.pool, tour).await?)
    }

    async fn replace_tour(&self, tour: &Tour) -> StoreResult<Option<Tour>> {
        Ok(TourRepo::replace(&self.pool, tour).await?)
    }

    async fn patch_tour(
        &self,
        id: DbId,
        patch: &TourPatch,
        now: Timestamp,
    ) -> StoreResult<Option<Tour>> {
        Ok(TourRepo::patch(&self.pool, id, patch, now).await?)
    }

    async fn delete_tour(&self, id: DbId) -> StoreResult<bool> {
        Ok(TourRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl CategoryStore for PgCatalogStore {
    async fn list_categories(&self, query: &ListQuery) -> StoreResult<Page<Category>> {
        Ok(CategoryRepo::list(&self.pool, query).await?)
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::find_by_name(&self.pool, name).await?)
    }

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn max_category_sequence(&self) -> StoreResult<Option<i32>> {
        Ok(CategoryRepo::max_sequence(&self.pool).await?)
    }

    async fn insert_category(&self, category: &Category) -> StoreResult<Category> {
        Ok(CategoryRepo::insert(&self.pool, category).await?)
    }

    async fn update_category(&self, category: &Category) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::update(&self.pool, category).await?)
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<bool> {
        Ok(CategoryRepo::delete(&self.pool, id).await?)
    }

    async fn reorder_categories(&self, order: &[(DbId, i32)]) -> StoreResult<u64> {
        let updated = CategoryRepo::reorder(&self.pool, order).await?;
        tracing::debug!(requested = order.len(), updated, "Applied category sequence batch");
        Ok(updated)
    }
}

#[async_trait]
impl TaxonomyStore for PgCatalogStore {
    async fn list_terms(
        &self,
        kind: TaxonomyKind,
        query: &ListQuery,
    ) -> StoreResult<Page<TaxonomyTerm>> {
        Ok(TaxonomyRepo::list(&self.pool, kind, query).await?)
    }

    async fn find_term(&self, kind: TaxonomyKind, id: DbId) -> StoreResult<Option<TaxonomyTerm>> {
        Ok(TaxonomyRepo::find_by_id(&self.pool, kind, id).await?)
    }

    async fn find_term_by_name(
        &self,
        kind: TaxonomyKind,
        name: &str,
    ) -> StoreResult<Option<TaxonomyTerm>> {
        Ok(TaxonomyRepo::find_by_name(&self.pool, kind, name).await?)
    }

    async fn insert_term(
        &self,
        kind: TaxonomyKind,
        term: &TaxonomyTerm,
    ) -> StoreResult<TaxonomyTerm> {
        Ok(TaxonomyRepo::insert(&self.pool, kind, term).await?)
    }

    async fn rename_term(
        &self,
        kind: TaxonomyKind,
        id: DbId,
        name: &str,
        now: Timestamp,
    ) -> StoreResult<Option<TaxonomyTerm>> {
        Ok(TaxonomyRepo::rename(&self.pool, kind, id, name, now).await?)
    }

    async fn delete_term(&self, kind: TaxonomyKind, id: DbId) -> StoreResult<bool> {
        Ok(TaxonomyRepo::delete(&self.pool, kind, id).await?)
    }
}

#[async_trait]
impl MediaStore for PgCatalogStore {
    async fn list_media(&self, query: &ListQuery) -> StoreResult<Page<MediaItem>> {
        Ok(MediaRepo::list(&self.pool, query).await?)
    }

    async fn find_media(&self, id: DbId) -> StoreResult<Option<MediaItem>> {
        Ok(MediaRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert_media(&self, item: &MediaItem) -> StoreResult<MediaItem> {
        Ok(MediaRepo::insert(&self.pool, item).await?)
    }

    async fn rename_media(&self, id: DbId, name: &str) -> StoreResult<Option<MediaItem>> {
        Ok(MediaRepo::rename(&self.pool, id, name).await?)
    }

    async fn delete_media(&self, id: DbId) -> StoreResult<bool> {
        Ok(MediaRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn close(&self) {
        tracing::info!(connections = self.pool.size(), "Closing database pool");
        self.pool.close().await;
    }
}
