//! Repository for the `media` table.

use sqlx::PgPool;
use tourbook_core::types::DbId;

use crate::models::media::MediaItem;
use crate::models::query::ListQuery;

const COLUMNS: &str = "id, name, media_type, url, created_at";

/// Provides CRUD operations for media library records. The blobs themselves
/// live in the blob store.
pub struct MediaRepo;

impl MediaRepo {
    /// List media, newest first.
    pub async fn list(
        pool: &PgPool,
        query: &ListQuery,
    ) -> Result<(Vec<MediaItem>, i64), sqlx::Error> {
        super::list_by_name(pool, "media", COLUMNS, "created_at DESC, id DESC", query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn insert(pool: &PgPool, item: &MediaItem) -> Result<MediaItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO media ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.media_type)
            .bind(&item.url)
            .bind(item.created_at)
            .fetch_one(pool)
            .await
    }

    /// Change the display name. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("UPDATE media SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
