//! Handlers for the admin `/tours` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tourbook_core::error::CoreError;
use tourbook_core::types::{new_id, parse_id, DbId};
use tourbook_db::models::tour::{Tour, TourInput, TourPatch};

use crate::blobs::delete_best_effort;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::query::TourListParams;
use crate::response::{ListResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/v1/admin/tours
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TourListParams>,
) -> AppResult<Json<ListResponse<Tour>>> {
    let query = params.into_query()?;
    let page = state.store.list_tours(&query).await?;
    Ok(Json(ListResponse::new("tours", page, query.page)))
}

/// POST /api/v1/admin/tours
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<TourInput>,
) -> AppResult<(StatusCode, Json<Tour>)> {
    input.check()?;
    let tour = input.into_new_tour(new_id(), Utc::now());
    let tour = state.store.insert_tour(&tour).await?;
    tracing::info!(tour_id = %tour.id, name = %tour.name, "Tour created");
    Ok((StatusCode::CREATED, Json(tour)))
}

/// GET /api/v1/admin/tours/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Tour>> {
    let id = parse_id(&id)?;
    Ok(Json(find_existing(&state, id).await?))
}

/// PUT /api/v1/admin/tours/{id}
///
/// Replaces the whole document. Id, creation time and review fields are
/// kept from the stored tour.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<TourInput>,
) -> AppResult<Json<Tour>> {
    let id = parse_id(&id)?;
    input.check()?;
    let existing = find_existing(&state, id).await?;
    let replacement = input.into_replacement(&existing, Utc::now());
    let tour = state
        .store
        .replace_tour(&replacement)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;
    tracing::info!(tour_id = %tour.id, "Tour updated");
    Ok(Json(tour))
}

/// PATCH /api/v1/admin/tours/{id}
///
/// Toggles `status` and/or `featured` from the tour table.
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<TourPatch>,
) -> AppResult<Json<Tour>> {
    let id = parse_id(&id)?;
    patch.check()?;
    let tour = state
        .store
        .patch_tour(id, &patch, Utc::now())
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;
    tracing::info!(
        tour_id = %tour.id,
        status = tour.status.as_str(),
        featured = tour.featured,
        "Tour toggled"
    );
    Ok(Json(tour))
}

/// DELETE /api/v1/admin/tours/{id}
///
/// Removes the record, then its blob-hosted cover and gallery images on a
/// best-effort basis.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let existing = find_existing(&state, id).await?;
    if !state.store.delete_tour(id).await? {
        return Err(CoreError::not_found("Tour", id).into());
    }
    delete_best_effort(state.blobs.as_ref(), existing.image_urls()).await;
    tracing::info!(tour_id = %id, "Tour deleted");
    Ok(Json(MessageResponse::new("Tour deleted")))
}

async fn find_existing(state: &AppState, id: DbId) -> AppResult<Tour> {
    let tour = state
        .store
        .find_tour(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;
    Ok(tour)
}
