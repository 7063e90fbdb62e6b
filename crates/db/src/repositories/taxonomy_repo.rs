//! Repository for `tour_types`, `inclusions` and `exclusions`.
//!
//! The three tables share one shape, so every method takes the
//! [`TaxonomyKind`] that selects the table.

use sqlx::PgPool;
use tourbook_core::types::{DbId, Timestamp};

use crate::models::query::ListQuery;
use crate::models::taxonomy::{TaxonomyKind, TaxonomyTerm};

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct TaxonomyRepo;

impl TaxonomyRepo {
    /// List terms, newest first.
    pub async fn list(
        pool: &PgPool,
        kind: TaxonomyKind,
        query: &ListQuery,
    ) -> Result<(Vec<TaxonomyTerm>, i64), sqlx::Error> {
        super::list_by_name(pool, kind.table(), COLUMNS, "created_at DESC, id DESC", query).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        kind: TaxonomyKind,
        id: DbId,
    ) -> Result<Option<TaxonomyTerm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", kind.table());
        sqlx::query_as::<_, TaxonomyTerm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup backed by the `uq_*_name` index.
    pub async fn find_by_name(
        pool: &PgPool,
        kind: TaxonomyKind,
        name: &str,
    ) -> Result<Option<TaxonomyTerm>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE lower(name) = lower($1)",
            kind.table()
        );
        sqlx::query_as::<_, TaxonomyTerm>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn insert(
        pool: &PgPool,
        kind: TaxonomyKind,
        term: &TaxonomyTerm,
    ) -> Result<TaxonomyTerm, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} ({COLUMNS}) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, TaxonomyTerm>(&query)
            .bind(term.id)
            .bind(&term.name)
            .bind(term.created_at)
            .bind(term.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn rename(
        pool: &PgPool,
        kind: TaxonomyKind,
        id: DbId,
        name: &str,
        now: Timestamp,
    ) -> Result<Option<TaxonomyTerm>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET name = $2, updated_at = $3 WHERE id = $1 RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, TaxonomyTerm>(&query)
            .bind(id)
            .bind(name)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, kind: TaxonomyKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
