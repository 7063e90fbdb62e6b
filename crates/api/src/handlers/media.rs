//! Handlers for the media library.
//!
//! Uploads arrive as base64 JSON and are pushed to blob storage before the
//! record is written. Deletion removes the blob first; if that fails the
//! record stays so the blob is never orphaned silently.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tourbook_core::error::CoreError;
use tourbook_core::search::DEFAULT_PAGE_SIZE;
use tourbook_core::types::{new_id, parse_id};
use tourbook_db::models::media::{MediaItem, RenameMedia, UploadMedia};

use crate::blobs::upload_payload;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::{ListParams, MediaDeleteParams};
use crate::response::{ListResponse, MessageResponse};
use crate::state::AppState;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// GET /api/v1/admin/media
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ListResponse<MediaItem>>> {
    let query = params.into_query(DEFAULT_PAGE_SIZE)?;
    let page = state.store.list_media(&query).await?;
    Ok(Json(ListResponse::new("media", page, query.page)))
}

/// POST /api/v1/admin/media
pub async fn upload(
    State(state): State<AppState>,
    AppJson(input): AppJson<UploadMedia>,
) -> AppResult<(StatusCode, Json<MediaItem>)> {
    input.check()?;
    let name = input.name.trim();
    let fallback = match input.media_type.trim() {
        "" => FALLBACK_MEDIA_TYPE,
        declared => declared,
    };
    let uploaded = upload_payload(state.blobs.as_ref(), None, name, &input.image, fallback).await?;

    let item = MediaItem {
        id: new_id(),
        name: name.to_string(),
        media_type: uploaded.content_type,
        url: uploaded.url,
        created_at: Utc::now(),
    };
    let item = state.store.insert_media(&item).await?;
    tracing::info!(media_id = %item.id, url = %item.url, "Media uploaded");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/v1/admin/media
pub async fn rename(
    State(state): State<AppState>,
    AppJson(input): AppJson<RenameMedia>,
) -> AppResult<Json<MediaItem>> {
    input.check()?;
    let id = parse_id(input.id.trim())?;
    let item = state
        .store
        .rename_media(id, input.name.trim())
        .await?
        .ok_or_else(|| CoreError::not_found("Media", id))?;
    tracing::info!(media_id = %item.id, name = %item.name, "Media renamed");
    Ok(Json(item))
}

/// DELETE /api/v1/admin/media?id=...&url=...
///
/// `url` must match the stored record, guarding against stale clients
/// deleting a re-uploaded item.
pub async fn delete(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MediaDeleteParams>,
) -> AppResult<Json<MessageResponse>> {
    let (Some(raw_id), Some(url)) = (
        params.id.filter(|s| !s.trim().is_empty()),
        params.url.filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(AppError::BadRequest("ID and URL are required".into()));
    };
    let id = parse_id(raw_id.trim())?;

    let item = state
        .store
        .find_media(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Media", id))?;
    if item.url != url {
        return Err(AppError::BadRequest(
            "URL does not match the media item".into(),
        ));
    }

    state.blobs.delete(&item.url).await?;
    if !state.store.delete_media(id).await? {
        return Err(CoreError::not_found("Media", id).into());
    }
    tracing::info!(media_id = %id, url = %item.url, "Media deleted");
    Ok(Json(MessageResponse::new("Media deleted")))
}
