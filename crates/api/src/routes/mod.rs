pub mod categories;
pub mod health;
pub mod media;
pub mod public;
pub mod taxonomy;
pub mod tours;

use axum::{middleware, Extension, Router};
use tourbook_db::models::taxonomy::TaxonomyKind;

use crate::middleware::admin_gate::require_admin;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tours                                 public search (active only)
/// /tours/{slug}                          public tour detail
/// /categories                            public category list
/// /checkout/{tour_id}                    checkout quote
///
/// /admin/tours                           list, create
/// /admin/tours/{id}                      get, replace, toggle, delete
/// /admin/categories                      list, create
/// /admin/categories/reorder              reorder (PUT)
/// /admin/categories/{id}                 get, update, delete
/// /admin/tour-types                      list, create
/// /admin/tour-types/{id}                 get, rename, delete
/// /admin/inclusions                      list, create
/// /admin/inclusions/{id}                 get, rename, delete
/// /admin/exclusions                      list, create
/// /admin/exclusions/{id}                 get, rename, delete
/// /admin/media                           list, upload, rename, delete
/// ```
///
/// Everything under `/admin` passes through [`require_admin`].
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let mut admin = Router::new()
        .nest("/tours", tours::router())
        .nest("/categories", categories::router())
        .nest("/media", media::router());

    for kind in TaxonomyKind::ALL {
        admin = admin.nest(kind.path(), taxonomy::router().layer(Extension(kind)));
    }

    let admin = admin.route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public::router())
        .nest("/admin", admin)
}
