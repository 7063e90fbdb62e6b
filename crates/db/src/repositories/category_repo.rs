//! Repository for the `categories` table.

use sqlx::PgPool;
use tourbook_core::types::DbId;

use crate::models::category::Category;
use crate::models::query::ListQuery;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, slug, image_url, sequence, created_at, updated_at";

/// Provides CRUD and ordering operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List categories in display order.
    pub async fn list(
        pool: &PgPool,
        query: &ListQuery,
    ) -> Result<(Vec<Category>, i64), sqlx::Error> {
        super::list_by_name(pool, "categories", COLUMNS, "sequence ASC, id ASC", query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup backed by `uq_categories_name`.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE lower(name) = lower($1)");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Highest `sequence` in use, `None` when the table is empty.
    pub async fn max_sequence(pool: &PgPool) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(sequence) FROM categories")
            .fetch_one(pool)
            .await
    }

    /// Insert a new category, returning the created row.
    pub async fn insert(pool: &PgPool, category: &Category) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.description)
            .bind(&category.slug)
            .bind(&category.image_url)
            .bind(category.sequence)
            .bind(category.created_at)
            .bind(category.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Write the mutable fields (name, description, image) of a category.
    ///
    /// Returns `None` if no row with the category's id exists.
    pub async fn update(pool: &PgPool, category: &Category) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = $2,
                description = $3,
                image_url = $4,
                updated_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.description)
            .bind(&category.image_url)
            .bind(category.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set `sequence` for every `(id, sequence)` pair in one statement.
    ///
    /// Ids that match no row are skipped. Returns the number of rows updated.
    pub async fn reorder(pool: &PgPool, order: &[(DbId, i32)]) -> Result<u64, sqlx::Error> {
        let (ids, sequences): (Vec<DbId>, Vec<i32>) = order.iter().copied().unzip();
        let result = sqlx::query(
            "UPDATE categories AS c
             SET sequence = v.sequence, updated_at = NOW()
             FROM UNNEST($1::uuid[], $2::int4[]) AS v(id, sequence)
             WHERE c.id = v.id",
        )
        .bind(&ids)
        .bind(&sequences)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
