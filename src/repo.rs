//! Data access for the `content` table. Both the public REST handlers and
//! the admin surface go through these functions; no other code touches the
//! store.

use chrono::{DateTime, Utc};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;

use crate::entity::content;
use crate::error::AppError;
use crate::models::content::UpdateContentRequest;

/// Filters, ordering and paging for a list query.
pub struct ContentQuery {
    pub search: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub offset: u64,
    pub limit: u64,
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    title: &str,
    body: String,
) -> Result<content::Model, AppError> {
    let now = chrono::Utc::now();
    let new_content = content::ActiveModel {
        title: Set(title.trim().to_string()),
        body: Set(body),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(new_content.insert(db).await?)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<content::Model, AppError> {
    content::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Content not found".into()))
}

/// Count and fetch one page of matching records.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    query: &ContentQuery,
) -> Result<(u64, Vec<content::Model>), AppError> {
    let (sort_column, sort_order) = resolve_sort(query)?;

    let mut select = content::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            let pattern = format!("%{}%", term.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(content::Column::Title)))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(content::Column::Body)))
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }
    }
    if let Some(after) = query.created_after {
        select = select.filter(content::Column::CreatedAt.gte(after));
    }
    if let Some(before) = query.created_before {
        select = select.filter(content::Column::CreatedAt.lte(before));
    }

    let total = select.clone().count(db).await?;

    let data = select
        .order_by(sort_column, sort_order)
        .offset(Some(query.offset))
        .limit(Some(query.limit))
        .all(db)
        .await?;

    Ok((total, data))
}

/// Apply a partial update. `updated_at` is refreshed no matter which fields
/// were supplied.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    payload: UpdateContentRequest,
) -> Result<content::Model, AppError> {
    let existing = find(db, id).await?;
    let mut active: content::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(body) = payload.body {
        active.body = Set(body);
    }
    active.updated_at = Set(chrono::Utc::now());

    Ok(active.update(db).await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), AppError> {
    find(db, id).await?;
    content::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

fn resolve_sort(query: &ContentQuery) -> Result<(content::Column, Order), AppError> {
    let sort_order = if query.sort_order.as_deref() == Some("asc") {
        Order::Asc
    } else {
        Order::Desc
    };
    let sort_column = match query.sort_by.as_deref().unwrap_or("created_at") {
        "created_at" => content::Column::CreatedAt,
        "updated_at" => content::Column::UpdatedAt,
        "title" => content::Column::Title,
        _ => {
            return Err(AppError::Validation(
                "sort_by must be one of: created_at, updated_at, title".into(),
            ));
        }
    };
    Ok((sort_column, sort_order))
}

/// Escape LIKE wildcard characters in a search string.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
