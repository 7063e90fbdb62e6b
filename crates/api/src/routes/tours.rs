//! Admin tour routes, mounted at `/admin/tours`.

use axum::routing::get;
use axum::Router;

use crate::handlers::tours;
use crate::state::AppState;

/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> patch (status / featured)
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tours::list).post(tours::create))
        .route(
            "/{id}",
            get(tours::get_by_id)
                .put(tours::update)
                .patch(tours::patch)
                .delete(tours::delete),
        )
}
