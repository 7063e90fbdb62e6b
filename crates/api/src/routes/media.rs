//! Media library routes, mounted at `/admin/media`.

use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// ```text
/// GET    /                  -> list
/// POST   /                  -> upload
/// PATCH  /                  -> rename
/// DELETE /?id=..&url=..     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(media::list)
            .post(media::upload)
            .patch(media::rename)
            .delete(media::delete),
    )
}
