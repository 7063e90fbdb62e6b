//! Routes shared by the three taxonomy collections.
//!
//! The caller nests this router once per [`TaxonomyKind`] and attaches the
//! kind as an `Extension`.
//!
//! [`TaxonomyKind`]: tourbook_db::models::taxonomy::TaxonomyKind

use axum::routing::get;
use axum::Router;

use crate::handlers::taxonomy;
use crate::state::AppState;

/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (rename)
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(taxonomy::list).post(taxonomy::create))
        .route(
            "/{id}",
            get(taxonomy::get_by_id)
                .put(taxonomy::update)
                .delete(taxonomy::delete),
        )
}
