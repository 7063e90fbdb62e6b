//! Integration tests for the catalog store contract.
//!
//! Runs against `MemoryCatalogStore`, which mirrors the Postgres filter,
//! sort, paging and uniqueness behaviour.

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use tourbook_core::reorder::assign_sequences;
use tourbook_core::search::PageRequest;
use tourbook_core::sorting::{SortOrder, TourSort, TourSortField};
use tourbook_core::tour::{Difficulty, TourStatus};
use tourbook_core::types::{new_id, Timestamp};
use tourbook_db::models::category::Category;
use tourbook_db::models::media::MediaItem;
use tourbook_db::models::query::{ListQuery, TourQuery};
use tourbook_db::models::taxonomy::{TaxonomyKind, TaxonomyTerm};
use tourbook_db::models::tour::{Tour, TourInput, TourPatch};
use tourbook_db::{
    CatalogStore, CategoryStore, MediaStore, MemoryCatalogStore, StoreError, TaxonomyStore,
    TourStore,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

fn new_tour(name: &str, price: f64, created_at: Timestamp) -> Tour {
    TourInput {
        name: name.to_string(),
        description: format!("{name} with a local guide"),
        price,
        category: "culture".into(),
        ..Default::default()
    }
    .into_new_tour(new_id(), created_at)
}

fn new_category(name: &str, sequence: i32) -> Category {
    Category {
        id: new_id(),
        name: name.to_string(),
        description: None,
        slug: tourbook_core::naming::derive_slug(name),
        image_url: None,
        sequence,
        created_at: t0(),
        updated_at: t0(),
    }
}

fn new_term(name: &str, created_at: Timestamp) -> TaxonomyTerm {
    TaxonomyTerm {
        id: new_id(),
        name: name.to_string(),
        created_at,
        updated_at: created_at,
    }
}

fn page(page: i64, limit: i64) -> PageRequest {
    PageRequest { page, limit }
}

async fn seeded_tours(store: &MemoryCatalogStore) -> Vec<Tour> {
    let mut out = Vec::new();
    for (i, (name, price)) in [("Taj Mahal", 120.0), ("Agra Fort", 40.0), ("Old Delhi", 60.0)]
        .into_iter()
        .enumerate()
    {
        let tour = new_tour(name, price, t0() + Duration::minutes(i as i64));
        out.push(store.insert_tour(&tour).await.unwrap());
    }
    out
}

// ---------------------------------------------------------------------------
// Tours
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tours_default_to_newest_first() {
    let store = MemoryCatalogStore::new();
    seeded_tours(&store).await;

    let (tours, total) = store.list_tours(&TourQuery::default()).await.unwrap();
    assert_eq!(total, 3);
    let names: Vec<_> = tours.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Old Delhi", "Agra Fort", "Taj Mahal"]);
}

#[tokio::test]
async fn tours_sort_by_price_ascending() {
    let store = MemoryCatalogStore::new();
    seeded_tours(&store).await;

    let query = TourQuery {
        sort: TourSort {
            field: TourSortField::Price,
            order: SortOrder::Asc,
        },
        ..Default::default()
    };
    let (tours, _) = store.list_tours(&query).await.unwrap();
    let prices: Vec<_> = tours.iter().map(|t| t.price).collect();
    assert_eq!(prices, vec![40.0, 60.0, 120.0]);
}

#[tokio::test]
async fn tour_search_matches_name_or_description() {
    let store = MemoryCatalogStore::new();
    seeded_tours(&store).await;

    let by_name = TourQuery {
        search: Some("taj".into()),
        ..Default::default()
    };
    assert_eq!(store.list_tours(&by_name).await.unwrap().1, 1);

    let by_description = TourQuery {
        search: Some("LOCAL GUIDE".into()),
        ..Default::default()
    };
    assert_eq!(store.list_tours(&by_description).await.unwrap().1, 3);
}

#[tokio::test]
async fn tour_filters_combine() {
    let store = MemoryCatalogStore::new();
    let tours = seeded_tours(&store).await;
    store
        .patch_tour(
            tours[0].id,
            &TourPatch {
                status: Some(TourStatus::Inactive),
                featured: Some(true),
            },
            t0(),
        )
        .await
        .unwrap();

    let active = TourQuery {
        status: Some(TourStatus::Active),
        ..Default::default()
    };
    assert_eq!(store.list_tours(&active).await.unwrap().1, 2);

    let featured_inactive = TourQuery {
        status: Some(TourStatus::Inactive),
        featured: Some(true),
        ..Default::default()
    };
    let (found, total) = store.list_tours(&featured_inactive).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].id, tours[0].id);

    let hard = TourQuery {
        difficulty: Some(Difficulty::Challenging),
        ..Default::default()
    };
    assert_eq!(store.list_tours(&hard).await.unwrap().1, 0);

    let other_category = TourQuery {
        category: Some("adventure".into()),
        ..Default::default()
    };
    assert_eq!(store.list_tours(&other_category).await.unwrap().1, 0);
}

#[tokio::test]
async fn page_past_the_end_is_empty_with_total() {
    let store = MemoryCatalogStore::new();
    seeded_tours(&store).await;

    let query = TourQuery {
        page: page(5, 2),
        ..Default::default()
    };
    let (tours, total) = store.list_tours(&query).await.unwrap();
    assert!(tours.is_empty());
    assert_eq!(total, 3);
}

#[tokio::test]
async fn slug_lookup_ignores_status() {
    let store = MemoryCatalogStore::new();
    let tours = seeded_tours(&store).await;
    store
        .patch_tour(
            tours[1].id,
            &TourPatch {
                status: Some(TourStatus::Inactive),
                featured: None,
            },
            t0(),
        )
        .await
        .unwrap();

    let found = store.find_tour_by_slug("agra-fort").await.unwrap().unwrap();
    assert_eq!(found.status, TourStatus::Inactive);
    assert!(store.find_tour_by_slug("nowhere").await.unwrap().is_none());
}

#[tokio::test]
async fn replace_keeps_server_fields() {
    let store = MemoryCatalogStore::new();
    let original = store
        .insert_tour(&new_tour("Taj Mahal", 120.0, t0()))
        .await
        .unwrap();

    let mut replacement = new_tour("Taj Mahal at Dawn", 150.0, t0() + Duration::days(1));
    replacement.id = original.id;
    replacement.rating = 5.0;
    replacement.review_count = 99;

    let stored = store.replace_tour(&replacement).await.unwrap().unwrap();
    assert_eq!(stored.name, "Taj Mahal at Dawn");
    assert_eq!(stored.created_at, original.created_at);
    assert_eq!(stored.rating, 0.0);
    assert_eq!(stored.review_count, 0);

    let mut missing = replacement.clone();
    missing.id = new_id();
    assert!(store.replace_tour(&missing).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_tour_reports_presence() {
    let store = MemoryCatalogStore::new();
    let tour = store
        .insert_tour(&new_tour("Taj Mahal", 120.0, t0()))
        .await
        .unwrap();
    assert!(store.delete_tour(tour.id).await.unwrap());
    assert!(!store.delete_tour(tour.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn categories_list_by_sequence() {
    let store = MemoryCatalogStore::new();
    for (name, seq) in [("Culture", 2), ("Wildlife", 3), ("Adventure", 1)] {
        store.insert_category(&new_category(name, seq)).await.unwrap();
    }

    let (categories, total) = store.list_categories(&ListQuery::default()).await.unwrap();
    assert_eq!(total, 3);
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Adventure", "Culture", "Wildlife"]);
    assert_eq!(store.max_category_sequence().await.unwrap(), Some(3));
}

#[tokio::test]
async fn reorder_yields_dense_sequences() {
    let store = MemoryCatalogStore::new();
    let mut ids = Vec::new();
    for (name, seq) in [("A", 10), ("B", 20), ("C", 30)] {
        ids.push(store.insert_category(&new_category(name, seq)).await.unwrap().id);
    }
    ids.reverse();

    let order = assign_sequences(&ids).unwrap();
    assert_eq!(store.reorder_categories(&order).await.unwrap(), 3);

    let (categories, _) = store.list_categories(&ListQuery::default()).await.unwrap();
    let seqs: Vec<_> = categories.iter().map(|c| c.sequence).collect();
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
    assert_eq!(names, vec!["C", "B", "A"]);
}

#[tokio::test]
async fn category_rename_conflicts_with_other_names_only() {
    let store = MemoryCatalogStore::new();
    let culture = store.insert_category(&new_category("Culture", 1)).await.unwrap();
    store.insert_category(&new_category("Wildlife", 2)).await.unwrap();

    let mut renamed = culture.clone();
    renamed.name = "CULTURE".into();
    assert!(store.update_category(&renamed).await.unwrap().is_some());

    renamed.name = "wildlife".into();
    assert_matches!(
        store.update_category(&renamed).await,
        Err(StoreError::Conflict(_))
    );
}

#[tokio::test]
async fn category_lookups() {
    let store = MemoryCatalogStore::new();
    store
        .insert_category(&new_category("Adventure Tours", 1))
        .await
        .unwrap();
    assert!(store
        .find_category_by_name("adventure TOURS")
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_category_by_slug("adventure-tours")
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn taxonomy_collections_are_independent() {
    let store = MemoryCatalogStore::new();
    store
        .insert_term(TaxonomyKind::Inclusion, &new_term("Hotel pickup", t0()))
        .await
        .unwrap();
    // Same name in another collection is fine.
    store
        .insert_term(TaxonomyKind::Exclusion, &new_term("Hotel pickup", t0()))
        .await
        .unwrap();
    assert_matches!(
        store
            .insert_term(TaxonomyKind::Inclusion, &new_term("HOTEL PICKUP", t0()))
            .await,
        Err(StoreError::Conflict(_))
    );

    let (types, total) = store
        .list_terms(TaxonomyKind::TourType, &ListQuery::default())
        .await
        .unwrap();
    assert!(types.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn taxonomy_search_and_newest_first() {
    let store = MemoryCatalogStore::new();
    for (i, name) in ["Lunch", "Entrance fees", "Lunch box"].iter().enumerate() {
        store
            .insert_term(
                TaxonomyKind::Inclusion,
                &new_term(name, t0() + Duration::minutes(i as i64)),
            )
            .await
            .unwrap();
    }

    let query = ListQuery {
        page: PageRequest::default(),
        search: Some("lunch".into()),
    };
    let (terms, total) = store
        .list_terms(TaxonomyKind::Inclusion, &query)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(terms[0].name, "Lunch box");
}

#[tokio::test]
async fn taxonomy_rename_and_delete() {
    let store = MemoryCatalogStore::new();
    let kind = TaxonomyKind::TourType;
    let term = store.insert_term(kind, &new_term("Day trip", t0())).await.unwrap();

    let later = t0() + Duration::hours(1);
    let renamed = store
        .rename_term(kind, term.id, "Day Trip", later)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Day Trip");
    assert_eq!(renamed.updated_at, later);

    assert!(store.delete_term(kind, term.id).await.unwrap());
    assert!(store.find_term(kind, term.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[tokio::test]
async fn media_rename_and_delete() {
    let store = MemoryCatalogStore::new();
    let item = store
        .insert_media(&MediaItem {
            id: new_id(),
            name: "taj.jpg".into(),
            media_type: "image/jpeg".into(),
            url: "https://blob.example.com/1-taj.jpg".into(),
            created_at: t0(),
        })
        .await
        .unwrap();

    let renamed = store.rename_media(item.id, "Taj at dawn").await.unwrap().unwrap();
    assert_eq!(renamed.name, "Taj at dawn");
    assert_eq!(renamed.url, item.url);

    assert!(store.delete_media(item.id).await.unwrap());
    assert!(store.find_media(item.id).await.unwrap().is_none());
    assert!(store.rename_media(item.id, "x").await.unwrap().is_none());
}

#[tokio::test]
async fn ping_reflects_availability() {
    let store = MemoryCatalogStore::new();
    assert!(store.ping().await.is_ok());
    store.set_unavailable(true);
    assert_matches!(store.ping().await, Err(StoreError::Unavailable(_)));
}
