//! Storefront routes, mounted directly under `/api/v1`.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// ```text
/// GET /tours                     -> search_tours
/// GET /tours/{slug}              -> tour_by_slug
/// GET /checkout/{tour_id}       -> checkout_quote
/// GET /categories                -> categories
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tours", get(public::search_tours))
        .route("/tours/{slug}", get(public::tour_by_slug))
        .route("/checkout/{tour_id}", get(public::checkout_quote))
        .route("/categories", get(public::categories))
}
