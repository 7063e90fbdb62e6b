//! In-process [`CatalogStore`] used by tests and local demos.
//!
//! Mirrors the Postgres behaviour that callers can observe: the same filter,
//! sort and paging rules, and [`StoreError::Conflict`] where Postgres would
//! hit a `uq_*` index.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tourbook_core::naming::names_match;
use tourbook_core::search::{contains_ignore_case, PageRequest};
use tourbook_core::sorting::{SortOrder, TourSortField};
use tourbook_core::types::{DbId, Timestamp};

use super::{
    CatalogStore, CategoryStore, MediaStore, Page, StoreError, StoreResult, TaxonomyStore,
    TourStore,
};
use crate::models::category::Category;
use crate::models::media::MediaItem;
use crate::models::query::{ListQuery, TourQuery};
use crate::models::taxonomy::{TaxonomyKind, TaxonomyTerm};
use crate::models::tour::{Tour, TourPatch};

#[derive(Default)]
struct Collections {
    tours: Vec<Tour>,
    categories: Vec<Category>,
    terms: HashMap<TaxonomyKind, Vec<TaxonomyTerm>>,
    media: Vec<MediaItem>,
}

#[derive(Default)]
pub struct MemoryCatalogStore {
    data: RwLock<Collections>,
    unavailable: AtomicBool,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`],
    /// simulating a lost database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as i64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
    (items.into_iter().skip(offset).take(limit).collect(), total)
}

fn name_matches(name: &str, query: &ListQuery) -> bool {
    query
        .search
        .as_deref()
        .map_or(true, |term| contains_ignore_case(name, term))
}

fn tour_matches(tour: &Tour, query: &TourQuery) -> bool {
    let search_ok = query.search.as_deref().map_or(true, |term| {
        contains_ignore_case(&tour.name, term) || contains_ignore_case(&tour.description, term)
    });
    search_ok
        && query.category.as_deref().map_or(true, |c| tour.category == c)
        && query.status.map_or(true, |s| tour.status == s)
        && query.featured.map_or(true, |f| tour.featured == f)
        && query.difficulty.map_or(true, |d| tour.difficulty == d)
}

fn compare_tours(a: &Tour, b: &Tour, field: TourSortField) -> Ordering {
    let by_field = match field {
        TourSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        TourSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        TourSortField::Name => a.name.cmp(&b.name),
        TourSortField::Price => a.price.total_cmp(&b.price),
        TourSortField::Rating => a.rating.total_cmp(&b.rating),
    };
    by_field.then_with(|| a.id.cmp(&b.id))
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (Timestamp, DbId)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl TourStore for MemoryCatalogStore {
    async fn list_tours(&self, query: &TourQuery) -> StoreResult<Page<Tour>> {
        self.check()?;
        let data = self.data.read().await;
        let mut matched: Vec<Tour> = data
            .tours
            .iter()
            .filter(|t| tour_matches(t, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            let ord = compare_tours(a, b, query.sort.field);
            match query.sort.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        Ok(paginate(matched, query.page))
    }

    async fn find_tour(&self, id: DbId) -> StoreResult<Option<Tour>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data.tours.iter().find(|t| t.id == id).cloned())
    }

    async fn find_tour_by_slug(&self, slug: &str) -> StoreResult<Option<Tour>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data
            .tours
            .iter()
            .filter(|t| t.slug.as_deref() == Some(slug))
            .min_by_key(|t| (t.created_at, t.id))
            .cloned())
    }

    async fn insert_tour(&self, tour: &Tour) -> StoreResult<Tour> {
        self.check()?;
        let mut data = self.data.write().await;
        data.tours.push(tour.clone());
        Ok(tour.clone())
    }

    async fn replace_tour(&self, tour: &Tour) -> StoreResult<Option<Tour>> {
        self.check()?;
        let mut data = self.data.write().await;
        let Some(existing) = data.tours.iter_mut().find(|t| t.id == tour.id) else {
            return Ok(None);
        };
        let mut replacement = tour.clone();
        replacement.created_at = existing.created_at;
        replacement.rating = existing.rating;
        replacement.review_count = existing.review_count;
        *existing = replacement.clone();
        Ok(Some(replacement))
    }

    async fn patch_tour(
        &self,
        id: DbId,
        patch: &TourPatch,
        now: Timestamp,
    ) -> StoreResult<Option<Tour>> {
        self.check()?;
        let mut data = self.data.write().await;
        Ok(data.tours.iter_mut().find(|t| t.id == id).map(|tour| {
            patch.apply(tour, now);
            tour.clone()
        }))
    }

    async fn delete_tour(&self, id: DbId) -> StoreResult<bool> {
        self.check()?;
        let mut data = self.data.write().await;
        let before = data.tours.len();
        data.tours.retain(|t| t.id != id);
        Ok(data.tours.len() < before)
    }
}

#[async_trait]
impl CategoryStore for MemoryCatalogStore {
    async fn list_categories(&self, query: &ListQuery) -> StoreResult<Page<Category>> {
        self.check()?;
        let data = self.data.read().await;
        let mut matched: Vec<Category> = data
            .categories
            .iter()
            .filter(|c| name_matches(&c.name, query))
            .cloned()
            .collect();
        matched.sort_by_key(|c| (c.sequence, c.id));
        Ok(paginate(matched, query.page))
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data
            .categories
            .iter()
            .find(|c| names_match(&c.name, name))
            .cloned())
    }

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn max_category_sequence(&self) -> StoreResult<Option<i32>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data.categories.iter().map(|c| c.sequence).max())
    }

    async fn insert_category(&self, category: &Category) -> StoreResult<Category> {
        self.check()?;
        let mut data = self.data.write().await;
        if data
            .categories
            .iter()
            .any(|c| names_match(&c.name, &category.name) || c.slug == category.slug)
        {
            return Err(StoreError::Conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
        data.categories.push(category.clone());
        Ok(category.clone())
    }

    async fn update_category(&self, category: &Category) -> StoreResult<Option<Category>> {
        self.check()?;
        let mut data = self.data.write().await;
        if data
            .categories
            .iter()
            .any(|c| c.id != category.id && names_match(&c.name, &category.name))
        {
            return Err(StoreError::Conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
        Ok(data
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .map(|existing| {
                existing.name = category.name.clone();
                existing.description = category.description.clone();
                existing.image_url = category.image_url.clone();
                existing.updated_at = category.updated_at;
                existing.clone()
            }))
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<bool> {
        self.check()?;
        let mut data = self.data.write().await;
        let before = data.categories.len();
        data.categories.retain(|c| c.id != id);
        Ok(data.categories.len() < before)
    }

    async fn reorder_categories(&self, order: &[(DbId, i32)]) -> StoreResult<u64> {
        self.check()?;
        let mut data = self.data.write().await;
        let now = chrono::Utc::now();
        let mut updated = 0;
        for (id, sequence) in order {
            if let Some(category) = data.categories.iter_mut().find(|c| c.id == *id) {
                category.sequence = *sequence;
                category.updated_at = now;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl TaxonomyStore for MemoryCatalogStore {
    async fn list_terms(
        &self,
        kind: TaxonomyKind,
        query: &ListQuery,
    ) -> StoreResult<Page<TaxonomyTerm>> {
        self.check()?;
        let data = self.data.read().await;
        let mut matched: Vec<TaxonomyTerm> = data
            .terms
            .get(&kind)
            .into_iter()
            .flatten()
            .filter(|t| name_matches(&t.name, query))
            .cloned()
            .collect();
        newest_first(&mut matched, |t| (t.created_at, t.id));
        Ok(paginate(matched, query.page))
    }

    async fn find_term(&self, kind: TaxonomyKind, id: DbId) -> StoreResult<Option<TaxonomyTerm>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data
            .terms
            .get(&kind)
            .and_then(|terms| terms.iter().find(|t| t.id == id))
            .cloned())
    }

    async fn find_term_by_name(
        &self,
        kind: TaxonomyKind,
        name: &str,
    ) -> StoreResult<Option<TaxonomyTerm>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data
            .terms
            .get(&kind)
            .and_then(|terms| terms.iter().find(|t| names_match(&t.name, name)))
            .cloned())
    }

    async fn insert_term(
        &self,
        kind: TaxonomyKind,
        term: &TaxonomyTerm,
    ) -> StoreResult<TaxonomyTerm> {
        self.check()?;
        let mut data = self.data.write().await;
        let terms = data.terms.entry(kind).or_default();
        if terms.iter().any(|t| names_match(&t.name, &term.name)) {
            return Err(StoreError::Conflict(format!(
                "{} '{}' already exists",
                kind.entity(),
                term.name
            )));
        }
        terms.push(term.clone());
        Ok(term.clone())
    }

    async fn rename_term(
        &self,
        kind: TaxonomyKind,
        id: DbId,
        name: &str,
        now: Timestamp,
    ) -> StoreResult<Option<TaxonomyTerm>> {
        self.check()?;
        let mut data = self.data.write().await;
        let terms = data.terms.entry(kind).or_default();
        if terms.iter().any(|t| t.id != id && names_match(&t.name, name)) {
            return Err(StoreError::Conflict(format!(
                "{} '{name}' already exists",
                kind.entity()
            )));
        }
        Ok(terms.iter_mut().find(|t| t.id == id).map(|term| {
            term.name = name.to_string();
            term.updated_at = now;
            term.clone()
        }))
    }

    async fn delete_term(&self, kind: TaxonomyKind, id: DbId) -> StoreResult<bool> {
        self.check()?;
        let mut data = self.data.write().await;
        let terms = data.terms.entry(kind).or_default();
        let before = terms.len();
        terms.retain(|t| t.id != id);
        Ok(terms.len() < before)
    }
}

#[async_trait]
impl MediaStore for MemoryCatalogStore {
    async fn list_media(&self, query: &ListQuery) -> StoreResult<Page<MediaItem>> {
        self.check()?;
        let data = self.data.read().await;
        let mut matched: Vec<MediaItem> = data
            .media
            .iter()
            .filter(|m| name_matches(&m.name, query))
            .cloned()
            .collect();
        newest_first(&mut matched, |m| (m.created_at, m.id));
        Ok(paginate(matched, query.page))
    }

    async fn find_media(&self, id: DbId) -> StoreResult<Option<MediaItem>> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data.media.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_media(&self, item: &MediaItem) -> StoreResult<MediaItem> {
        self.check()?;
        let mut data = self.data.write().await;
        data.media.push(item.clone());
        Ok(item.clone())
    }

    async fn rename_media(&self, id: DbId, name: &str) -> StoreResult<Option<MediaItem>> {
        self.check()?;
        let mut data = self.data.write().await;
        Ok(data.media.iter_mut().find(|m| m.id == id).map(|item| {
            item.name = name.to_string();
            item.clone()
        }))
    }

    async fn delete_media(&self, id: DbId) -> StoreResult<bool> {
        self.check()?;
        let mut data = self.data.write().await;
        let before = data.media.len();
        data.media.retain(|m| m.id != id);
        Ok(data.media.len() < before)
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use tourbook_core::types::new_id;

    fn category(name: &str, sequence: i32) -> Category {
        let now = Utc::now();
        Category {
            id: new_id(),
            name: name.into(),
            description: None,
            slug: tourbook_core::naming::derive_slug(name),
            image_url: None,
            sequence,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryCatalogStore::new();
        store.set_unavailable(true);
        assert_matches!(store.ping().await, Err(StoreError::Unavailable(_)));
        assert_matches!(
            store.list_categories(&ListQuery::default()).await,
            Err(StoreError::Unavailable(_))
        );
        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_category_name_conflicts() {
        let store = MemoryCatalogStore::new();
        store.insert_category(&category("Wildlife", 1)).await.unwrap();
        assert_matches!(
            store.insert_category(&category("WILDLIFE", 2)).await,
            Err(StoreError::Conflict(_))
        );
    }

    #[tokio::test]
    async fn reorder_skips_unknown_ids() {
        let store = MemoryCatalogStore::new();
        let a = store.insert_category(&category("A", 1)).await.unwrap();
        let updated = store
            .reorder_categories(&[(new_id(), 1), (a.id, 2)])
            .await
            .unwrap();
        assert_eq!(updated, 1);
        assert_eq!(store.find_category(a.id).await.unwrap().unwrap().sequence, 2);
    }
}
