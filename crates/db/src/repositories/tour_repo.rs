//! Repository for the `tours` table.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tourbook_core::search::contains_pattern;
use tourbook_core::types::{DbId, Timestamp};

use crate::models::query::TourQuery;
use crate::models::tour::{Tour, TourPatch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, duration, price, variants, category, tour_type, \
     inclusions, exclusions, itinerary, images, cover_image, video, difficulty, status, \
     featured, rating, review_count, slug, seo_title, seo_description, seo_keywords, \
     created_at, updated_at";

/// Provides CRUD operations for tours.
pub struct TourRepo;

impl TourRepo {
    /// List tours matching `query`, returning the page and the total match
    /// count. Ties in the sort column are broken by id so paging is stable.
    pub async fn list(pool: &PgPool, query: &TourQuery) -> Result<(Vec<Tour>, i64), sqlx::Error> {
        let mut items = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM tours"));
        push_filters(&mut items, query);
        let order = query.sort.order.sql();
        items.push(format!(
            " ORDER BY {} {order}, id {order} LIMIT ",
            query.sort.field.column()
        ));
        items.push_bind(query.page.limit);
        items.push(" OFFSET ");
        items.push_bind(query.page.offset());

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tours");
        push_filters(&mut count, query);

        futures::try_join!(
            items.build_query_as::<Tour>().fetch_all(pool),
            count.build_query_scalar::<i64>().fetch_one(pool),
        )
    }

    /// Find a tour by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tours WHERE id = $1");
        sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tour by slug regardless of status. When legacy data holds
    /// duplicate slugs the oldest tour wins.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tours WHERE slug = $1 ORDER BY created_at ASC, id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert a fully-built tour document, returning the stored row.
    pub async fn insert(pool: &PgPool, tour: &Tour) -> Result<Tour, sqlx::Error> {
        let query = format!(
            "INSERT INTO tours ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                     $17, $18, $19, $20, $21, $22, $23, $24, $25)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(tour.id)
            .bind(&tour.name)
            .bind(&tour.description)
            .bind(&tour.duration)
            .bind(tour.price)
            .bind(Json(&tour.variants))
            .bind(&tour.category)
            .bind(&tour.tour_type)
            .bind(&tour.inclusions)
            .bind(&tour.exclusions)
            .bind(Json(&tour.itinerary))
            .bind(Json(&tour.images))
            .bind(Json(&tour.cover_image))
            .bind(&tour.video)
            .bind(tour.difficulty.as_str())
            .bind(tour.status.as_str())
            .bind(tour.featured)
            .bind(tour.rating)
            .bind(tour.review_count)
            .bind(&tour.slug)
            .bind(&tour.seo_title)
            .bind(&tour.seo_description)
            .bind(&tour.seo_keywords)
            .bind(tour.created_at)
            .bind(tour.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every client-editable column of an existing tour.
    ///
    /// `created_at`, `rating` and `review_count` are left alone. Returns
    /// `None` if no row with the tour's id exists.
    pub async fn replace(pool: &PgPool, tour: &Tour) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!(
            "UPDATE tours SET
                name = $2, description = $3, duration = $4, price = $5, variants = $6,
                category = $7, tour_type = $8, inclusions = $9, exclusions = $10,
                itinerary = $11, images = $12, cover_image = $13, video = $14,
                difficulty = $15, status = $16, featured = $17, slug = $18,
                seo_title = $19, seo_description = $20, seo_keywords = $21,
                updated_at = $22
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(tour.id)
            .bind(&tour.name)
            .bind(&tour.description)
            .bind(&tour.duration)
            .bind(tour.price)
            .bind(Json(&tour.variants))
            .bind(&tour.category)
            .bind(&tour.tour_type)
            .bind(&tour.inclusions)
            .bind(&tour.exclusions)
            .bind(Json(&tour.itinerary))
            .bind(Json(&tour.images))
            .bind(Json(&tour.cover_image))
            .bind(&tour.video)
            .bind(tour.difficulty.as_str())
            .bind(tour.status.as_str())
            .bind(tour.featured)
            .bind(&tour.slug)
            .bind(&tour.seo_title)
            .bind(&tour.seo_description)
            .bind(&tour.seo_keywords)
            .bind(tour.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Apply the status/featured toggles. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn patch(
        pool: &PgPool,
        id: DbId,
        patch: &TourPatch,
        now: Timestamp,
    ) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!(
            "UPDATE tours SET
                status = COALESCE($2, status),
                featured = COALESCE($3, featured),
                updated_at = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .bind(patch.status.map(|s| s.as_str()))
            .bind(patch.featured)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tour by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &TourQuery) {
    builder.push(" WHERE TRUE");
    if let Some(search) = &query.search {
        let pattern = contains_pattern(search);
        builder.push(" AND (name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
    if let Some(category) = &query.category {
        builder.push(" AND category = ");
        builder.push_bind(category.clone());
    }
    if let Some(status) = query.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(featured) = query.featured {
        builder.push(" AND featured = ");
        builder.push_bind(featured);
    }
    if let Some(difficulty) = query.difficulty {
        builder.push(" AND difficulty = ");
        builder.push_bind(difficulty.as_str());
    }
}
