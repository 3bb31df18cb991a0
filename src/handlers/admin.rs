//! Management surface under `/admin/`. Read path is a trimmed listing
//! (title and timestamps, body omitted); mutations reuse the same
//! repository contract as the public resource with no extra rules.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::json::AppJson;
use crate::models::content::*;
use crate::repo;
use crate::state::AppState;

const DEFAULT_PER_PAGE: u64 = 100;

#[instrument(skip(state, query))]
pub async fn list_content(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<AdminListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 100);
    let offset = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(per_page))
        .ok_or_else(|| AppError::NotFound("Invalid page".into()))?;

    let repo_query = repo::ContentQuery {
        search: query.search,
        created_after: query.created_after,
        created_before: query.created_before,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
        offset,
        limit: per_page,
    };
    let (total, data) = repo::list(&state.db, &repo_query).await?;

    Ok(Json(AdminListResponse {
        count: total,
        results: data.into_iter().map(AdminContentRow::from).collect(),
    }))
}

#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_content(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_content(&payload)?;
    let model = repo::create(&state.db, &payload.title, payload.body).await?;
    Ok((StatusCode::CREATED, Json(ContentResponse::from(model))))
}

#[instrument(skip(state, payload), fields(id))]
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    validate_update_content(&payload)?;
    let model = repo::update(&state.db, id, payload).await?;
    Ok(Json(model.into()))
}

#[instrument(skip(state), fields(id))]
pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    repo::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
