//! Handlers for the admin `/categories` resource.
//!
//! Names are unique case-insensitively, slugs are fixed at creation and the
//! `sequence` column drives display order.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tourbook_core::error::CoreError;
use tourbook_core::naming::{normalize_name, slug_or_derive};
use tourbook_core::reorder::{assign_sequences, next_sequence};
use tourbook_core::search::DEFAULT_PAGE_SIZE;
use tourbook_core::types::{new_id, parse_id, DbId};
use tourbook_db::models::category::{Category, CreateCategory, ReorderCategories, UpdateCategory};
use tourbook_storage::is_data_uri;

use crate::blobs::{delete_best_effort, upload_payload};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::query::ListParams;
use crate::response::{ListResponse, MessageResponse, ReorderResponse};
use crate::state::AppState;

const IMAGE_PREFIX: &str = "categories";
const FALLBACK_IMAGE_TYPE: &str = "application/octet-stream";

/// GET /api/v1/admin/categories
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ListResponse<Category>>> {
    let query = params.into_query(DEFAULT_PAGE_SIZE)?;
    let page = state.store.list_categories(&query).await?;
    Ok(Json(ListResponse::new("categories", page, query.page)))
}

/// POST /api/v1/admin/categories
///
/// New categories go to the end of the display order. A `data:` image is
/// uploaded to blob storage first.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    input.check()?;
    let name = normalize_name(&input.name)?;
    ensure_name_free(&state, &name, None).await?;

    let slug = slug_or_derive(input.slug.as_deref(), &name);
    if state.store.find_category_by_slug(&slug).await?.is_some() {
        return Err(
            CoreError::Conflict("Category with this slug already exists".into()).into(),
        );
    }

    let sequence = next_sequence(state.store.max_category_sequence().await?);
    let image_url = match non_blank(input.image_url) {
        Some(raw) if is_data_uri(&raw) => Some(
            upload_payload(
                state.blobs.as_ref(),
                Some(IMAGE_PREFIX),
                &slug,
                &raw,
                FALLBACK_IMAGE_TYPE,
            )
            .await?
            .url,
        ),
        other => other,
    };

    let now = Utc::now();
    let category = Category {
        id: new_id(),
        name,
        description: non_blank(input.description),
        slug,
        image_url,
        sequence,
        created_at: now,
        updated_at: now,
    };
    let category = state.store.insert_category(&category).await?;
    tracing::info!(
        category_id = %category.id,
        slug = %category.slug,
        sequence = category.sequence,
        "Category created"
    );
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let id = parse_id(&id)?;
    Ok(Json(find_existing(&state, id).await?))
}

/// PUT /api/v1/admin/categories/{id}
///
/// Only supplied fields change. A new `data:` image is uploaded first and
/// the old blob removed after the record is saved; an empty `imageUrl`
/// clears it.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let id = parse_id(&id)?;
    input.check()?;
    let existing = find_existing(&state, id).await?;
    let mut category = existing.clone();

    if let Some(raw) = input.name.as_deref() {
        let name = normalize_name(raw)?;
        ensure_name_free(&state, &name, Some(id)).await?;
        category.name = name;
    }
    if let Some(description) = input.description {
        category.description = non_blank(Some(description));
    }
    let mut uploaded_url = None;
    if let Some(raw) = input.image_url {
        if is_data_uri(&raw) {
            let uploaded = upload_payload(
                state.blobs.as_ref(),
                Some(IMAGE_PREFIX),
                &existing.slug,
                &raw,
                FALLBACK_IMAGE_TYPE,
            )
            .await?;
            category.image_url = Some(uploaded.url.clone());
            uploaded_url = Some(uploaded.url);
        } else {
            category.image_url = non_blank(Some(raw));
        }
    }
    category.updated_at = Utc::now();

    // The old blob goes only once the record points at its replacement.
    let updated = match state.store.update_category(&category).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            delete_best_effort(state.blobs.as_ref(), uploaded_url.as_deref()).await;
            return Err(CoreError::not_found("Category", id).into());
        }
        Err(e) => {
            delete_best_effort(state.blobs.as_ref(), uploaded_url.as_deref()).await;
            return Err(e.into());
        }
    };
    if uploaded_url.is_some() {
        delete_best_effort(state.blobs.as_ref(), existing.image_url.as_deref()).await;
    }
    tracing::info!(category_id = %updated.id, "Category updated");
    Ok(Json(updated))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Tours keep their `category` string; the image blob is removed
/// best-effort.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let existing = find_existing(&state, id).await?;
    if !state.store.delete_category(id).await? {
        return Err(CoreError::not_found("Category", id).into());
    }
    delete_best_effort(state.blobs.as_ref(), existing.image_url.as_deref()).await;
    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(MessageResponse::new("Category deleted")))
}

/// PUT /api/v1/admin/categories/reorder
///
/// The body lists category ids in their new display order; each gets
/// `sequence = position + 1` in a single store call.
pub async fn reorder(
    State(state): State<AppState>,
    AppJson(input): AppJson<ReorderCategories>,
) -> AppResult<Json<ReorderResponse>> {
    let ids = input
        .categories
        .iter()
        .map(|entry| parse_id(entry.raw_id()))
        .collect::<Result<Vec<_>, _>>()?;
    let order = assign_sequences(&ids)?;
    let updated = state.store.reorder_categories(&order).await?;
    tracing::info!(requested = ids.len(), updated, "Categories reordered");
    Ok(Json(ReorderResponse {
        message: "Categories reordered".into(),
        updated,
    }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn find_existing(state: &AppState, id: DbId) -> AppResult<Category> {
    let category = state
        .store
        .find_category(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", id))?;
    Ok(category)
}

/// Conflict when another category already uses `name` (case-insensitive).
async fn ensure_name_free(state: &AppState, name: &str, current: Option<DbId>) -> AppResult<()> {
    match state.store.find_category_by_name(name).await? {
        Some(other) if Some(other.id) != current => Err(CoreError::Conflict(
            "Category with this name already exists".into(),
        )
        .into()),
        _ => Ok(()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
