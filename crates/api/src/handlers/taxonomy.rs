//! Handlers shared by `/tour-types`, `/inclusions` and `/exclusions`.
//!
//! The router attaches the [`TaxonomyKind`] as an extension, so one set of
//! handlers serves all three collections.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use tourbook_core::error::CoreError;
use tourbook_core::naming::normalize_name;
use tourbook_core::types::{new_id, parse_id, DbId};
use tourbook_db::models::taxonomy::{TaxonomyKind, TaxonomyTerm, TermInput};

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::query::{ListParams, LOOKUP_PAGE_SIZE};
use crate::response::{ListResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/v1/admin/{tour-types|inclusions|exclusions}
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<TaxonomyKind>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ListResponse<TaxonomyTerm>>> {
    let query = params.into_query(LOOKUP_PAGE_SIZE)?;
    let page = state.store.list_terms(kind, &query).await?;
    Ok(Json(ListResponse::new(kind.list_key(), page, query.page)))
}

/// POST /api/v1/admin/{tour-types|inclusions|exclusions}
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<TaxonomyKind>,
    AppJson(input): AppJson<TermInput>,
) -> AppResult<(StatusCode, Json<TaxonomyTerm>)> {
    input.check()?;
    let name = normalize_name(&input.name)?;
    ensure_name_free(&state, kind, &name, None).await?;

    let now = Utc::now();
    let term = TaxonomyTerm {
        id: new_id(),
        name,
        created_at: now,
        updated_at: now,
    };
    let term = state.store.insert_term(kind, &term).await?;
    tracing::info!(kind = kind.table(), term_id = %term.id, name = %term.name, "Term created");
    Ok((StatusCode::CREATED, Json(term)))
}

/// GET /api/v1/admin/{tour-types|inclusions|exclusions}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<TaxonomyKind>,
    Path(id): Path<String>,
) -> AppResult<Json<TaxonomyTerm>> {
    let id = parse_id(&id)?;
    Ok(Json(find_existing(&state, kind, id).await?))
}

/// PUT /api/v1/admin/{tour-types|inclusions|exclusions}/{id}
///
/// Renames the term. Tours that reference the old name keep it.
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<TaxonomyKind>,
    Path(id): Path<String>,
    AppJson(input): AppJson<TermInput>,
) -> AppResult<Json<TaxonomyTerm>> {
    let id = parse_id(&id)?;
    input.check()?;
    let name = normalize_name(&input.name)?;
    find_existing(&state, kind, id).await?;
    ensure_name_free(&state, kind, &name, Some(id)).await?;

    let term = state
        .store
        .rename_term(kind, id, &name, Utc::now())
        .await?
        .ok_or_else(|| CoreError::not_found(kind.entity(), id))?;
    tracing::info!(kind = kind.table(), term_id = %term.id, "Term renamed");
    Ok(Json(term))
}

/// DELETE /api/v1/admin/{tour-types|inclusions|exclusions}/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<TaxonomyKind>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    if !state.store.delete_term(kind, id).await? {
        return Err(CoreError::not_found(kind.entity(), id).into());
    }
    tracing::info!(kind = kind.table(), term_id = %id, "Term deleted");
    Ok(Json(MessageResponse::new(format!("{} deleted", kind.entity()))))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn find_existing(state: &AppState, kind: TaxonomyKind, id: DbId) -> AppResult<TaxonomyTerm> {
    let term = state
        .store
        .find_term(kind, id)
        .await?
        .ok_or_else(|| CoreError::not_found(kind.entity(), id))?;
    Ok(term)
}

async fn ensure_name_free(
    state: &AppState,
    kind: TaxonomyKind,
    name: &str,
    current: Option<DbId>,
) -> AppResult<()> {
    match state.store.find_term_by_name(kind, name).await? {
        Some(other) if Some(other.id) != current => Err(CoreError::Conflict(format!(
            "{} with this name already exists",
            kind.entity()
        ))
        .into()),
        _ => Ok(()),
    }
}
