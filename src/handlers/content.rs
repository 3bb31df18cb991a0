use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::content::*;
use crate::repo;
use crate::state::AppState;

/// Base path of the content resource, used for pagination links.
const CONTENT_BASE: &str = "/api/cms/content/";

#[utoipa::path(
    get,
    path = "/",
    tag = "Content",
    operation_id = "listContent",
    summary = "List content with pagination, search and filtering",
    description = "Returns a paginated envelope of content records, 10 per page, newest first by default. Supports case-insensitive substring search over title and body and created_at range filtering. When no record matches the query, returns a bare two-item placeholder array instead of an empty envelope.",
    params(ContentListQuery),
    responses(
        (status = 200, description = "Paginated content list, or the placeholder array when nothing matches", body = ContentListResponse),
        (status = 400, description = "Invalid query parameter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Page number past the end (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_content(
    State(state): State<AppState>,
    Query(query): Query<ContentListQuery>,
) -> Result<Response, AppError> {
    let page = query.page.unwrap_or(1);
    // Page 0 and offsets past u64::MAX are both invalid pages.
    let offset = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(PAGE_SIZE))
        .ok_or_else(|| AppError::NotFound("Invalid page".into()))?;

    let repo_query = repo::ContentQuery {
        search: query.search.clone(),
        created_after: query.created_after,
        created_before: query.created_before,
        sort_by: query.sort_by.clone(),
        sort_order: query.sort_order.clone(),
        offset,
        limit: PAGE_SIZE,
    };
    let (total, data) = repo::list(&state.db, &repo_query).await?;

    // Fresh-install placeholder: a list query matching nothing serves the
    // fixed sample items, unpaginated, GET list only.
    if total == 0 {
        return Ok(Json(fallback_payload()).into_response());
    }

    if offset >= total {
        return Err(AppError::NotFound("Invalid page".into()));
    }

    let next = if offset + PAGE_SIZE < total {
        Some(page_link(CONTENT_BASE, &query, page + 1))
    } else {
        None
    };
    let previous = if page > 1 {
        Some(page_link(CONTENT_BASE, &query, page - 1))
    } else {
        None
    };

    Ok(Json(ContentListResponse {
        count: total,
        next,
        previous,
        results: data.into_iter().map(ContentResponse::from).collect(),
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/{id}/",
    tag = "Content",
    operation_id = "getContent",
    summary = "Get a content record by ID",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content record", body = ContentResponse),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContentResponse>, AppError> {
    let model = repo::find(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Content",
    operation_id = "createContent",
    summary = "Create a content record",
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Content created", body = ContentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_content(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_content(&payload)?;
    let model = repo::create(&state.db, &payload.title, payload.body).await?;
    Ok((StatusCode::CREATED, Json(ContentResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}/",
    tag = "Content",
    operation_id = "replaceContent",
    summary = "Update a content record",
    description = "Only supplied fields change; `updated_at` is refreshed either way.",
    params(("id" = i32, Path, description = "Content ID")),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated", body = ContentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn replace_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    apply_update(&state, id, payload).await
}

#[utoipa::path(
    patch,
    path = "/{id}/",
    tag = "Content",
    operation_id = "updateContent",
    summary = "Partially update a content record",
    description = "PATCH semantics: only supplied fields change; `updated_at` is refreshed either way.",
    params(("id" = i32, Path, description = "Content ID")),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated", body = ContentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    apply_update(&state, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/{id}/",
    tag = "Content",
    operation_id = "deleteContent",
    summary = "Delete a content record",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    repo::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update(
    state: &AppState,
    id: i32,
    payload: UpdateContentRequest,
) -> Result<Json<ContentResponse>, AppError> {
    validate_update_content(&payload)?;
    let model = repo::update(&state.db, id, payload).await?;
    Ok(Json(model.into()))
}
