//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod media_repo;
pub mod taxonomy_repo;
pub mod tour_repo;

pub use category_repo::CategoryRepo;
pub use media_repo::MediaRepo;
pub use taxonomy_repo::TaxonomyRepo;
pub use tour_repo::TourRepo;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tourbook_core::search::contains_pattern;

use crate::models::query::ListQuery;

/// Page through `table`, optionally filtered by a case-insensitive name
/// search. The page and the total count are fetched concurrently.
pub(crate) async fn list_by_name<T>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    order_by: &str,
    query: &ListQuery,
) -> Result<(Vec<T>, i64), sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut items = QueryBuilder::<Postgres>::new(format!("SELECT {columns} FROM {table}"));
    push_name_search(&mut items, query);
    items.push(format!(" ORDER BY {order_by} LIMIT "));
    items.push_bind(query.page.limit);
    items.push(" OFFSET ");
    items.push_bind(query.page.offset());

    let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {table}"));
    push_name_search(&mut count, query);

    futures::try_join!(
        items.build_query_as::<T>().fetch_all(pool),
        count.build_query_scalar::<i64>().fetch_one(pool),
    )
}

fn push_name_search(builder: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(search) = &query.search {
        builder.push(" WHERE name ILIKE ");
        builder.push_bind(contains_pattern(search));
    }
}
