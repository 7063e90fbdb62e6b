//! Read-only endpoints for the storefront.
//!
//! Only active tours are visible here; inactive and missing tours are
//! indistinguishable to public callers.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tourbook_core::checkout::{
    format_remaining, total_price, unit_price, validate_adults, HoldTimer,
};
use tourbook_core::error::CoreError;
use tourbook_core::types::{parse_id, DbId, Timestamp};
use tourbook_db::models::category::Category;
use tourbook_db::models::tour::Tour;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::query::{CheckoutParams, ListParams, PublicTourParams, LOOKUP_PAGE_SIZE};
use crate::response::ListResponse;
use crate::state::AppState;

/// GET /api/v1/tours
pub async fn search_tours(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PublicTourParams>,
) -> AppResult<Json<ListResponse<Tour>>> {
    let query = params.into_query()?;
    let page = state.store.list_tours(&query).await?;
    Ok(Json(ListResponse::new("tours", page, query.page)))
}

/// GET /api/v1/tours/{slug}
pub async fn tour_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Tour>> {
    Ok(Json(find_public_tour(&state, &slug).await?))
}

/// GET /api/v1/categories
pub async fn categories(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ListResponse<Category>>> {
    let query = params.into_query(LOOKUP_PAGE_SIZE)?;
    let page = state.store.list_categories(&query).await?;
    Ok(Json(ListResponse::new("categories", page, query.page)))
}

/// Price quote shown on the checkout page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub tour_id: DbId,
    pub tour_name: String,
    pub slug: Option<String>,
    pub variant: Option<String>,
    pub adults: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub hold_seconds: i64,
    /// `m:ss` countdown label at issue time.
    pub hold_remaining: String,
    pub hold_expires_at: Timestamp,
}

/// GET /api/v1/checkout/{tour_id}?adults=&variant=
pub async fn checkout_quote(
    State(state): State<AppState>,
    Path(tour_id): Path<String>,
    AppQuery(params): AppQuery<CheckoutParams>,
) -> AppResult<Json<CheckoutQuote>> {
    let tour_id = parse_id(&tour_id)?;
    let adults = validate_adults(params.adults)?;
    let tour = match state.store.find_tour(tour_id).await? {
        Some(tour) if tour.status.is_public() => tour,
        _ => return Err(CoreError::not_found("Tour", tour_id).into()),
    };
    let variant = params
        .variant
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let unit = unit_price(tour.price, tour.variant_prices(), variant.as_deref())?;

    let now = Utc::now();
    let timer = HoldTimer::start(now);
    Ok(Json(CheckoutQuote {
        tour_id: tour.id,
        tour_name: tour.name,
        slug: tour.slug,
        variant,
        adults,
        unit_price: unit,
        total_price: total_price(unit, adults),
        hold_seconds: timer.duration_secs,
        hold_remaining: format_remaining(timer.remaining_secs(now)),
        hold_expires_at: timer.expires_at(),
    }))
}

async fn find_public_tour(state: &AppState, slug: &str) -> AppResult<Tour> {
    match state.store.find_tour_by_slug(slug).await? {
        Some(tour) if tour.status.is_public() => Ok(tour),
        _ => Err(CoreError::not_found("Tour", slug).into()),
    }
}
