use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AppError;

/// Fixed page size of the public list endpoint.
pub const PAGE_SIZE: u64 = 10;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateContentRequest {
    pub title: String,
    pub body: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentResponse {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::content::Model> for ContentResponse {
    fn from(m: crate::entity::content::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            body: m.body,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Page-number pagination envelope of the public list endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentListResponse {
    /// Total number of matching records across all pages.
    pub count: u64,
    /// Relative URL of the next page, or null on the last page.
    pub next: Option<String>,
    /// Relative URL of the previous page, or null on the first page.
    pub previous: Option<String>,
    pub results: Vec<ContentResponse>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ContentListQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Case-insensitive substring match over title and body.
    pub search: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// One of: created_at (default), updated_at, title.
    pub sort_by: Option<String>,
    /// "asc" or "desc" (default).
    pub sort_order: Option<String>,
}

/// Admin listing query. Unlike the public endpoint the page size is
/// adjustable.
#[derive(Deserialize)]
pub struct AdminListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub search: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Row shape of the admin listing: title and timestamps only.
#[derive(Serialize)]
pub struct AdminContentRow {
    pub id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::content::Model> for AdminContentRow {
    fn from(m: crate::entity::content::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct AdminListResponse {
    pub count: u64,
    pub results: Vec<AdminContentRow>,
}

/// Placeholder payload served when a list query matches nothing. Raw JSON
/// literals on purpose: these are not records and never touch the store.
pub fn fallback_payload() -> Value {
    json!([
        {
            "id": 1,
            "title": "Welcome",
            "body": "Welcome to CMS Platform",
            "created_at": "1970-01-01T00:00:00Z",
            "updated_at": "1970-01-01T00:00:00Z",
        },
        {
            "id": 2,
            "title": "Getting Started",
            "body": "Start creating your content",
            "created_at": "1970-01-01T00:00:00Z",
            "updated_at": "1970-01-01T00:00:00Z",
        },
    ])
}

/// Build a relative page link for the envelope, keeping every query
/// parameter except `page`.
pub fn page_link(base: &str, query: &ContentListQuery, page: u64) -> String {
    let mut params = vec![format!("page={page}")];
    if let Some(ref search) = query.search {
        params.push(format!("search={}", urlencode(search)));
    }
    if let Some(after) = query.created_after {
        params.push(format!("created_after={}", urlencode(&after.to_rfc3339())));
    }
    if let Some(before) = query.created_before {
        params.push(format!("created_before={}", urlencode(&before.to_rfc3339())));
    }
    if let Some(ref sort_by) = query.sort_by {
        params.push(format!("sort_by={}", urlencode(sort_by)));
    }
    if let Some(ref sort_order) = query.sort_order {
        params.push(format!("sort_order={}", urlencode(sort_order)));
    }
    format!("{base}?{}", params.join("&"))
}

/// Percent-encode the characters that matter inside a query value.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

pub fn validate_create_content(req: &CreateContentRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_body(&req.body)
}

pub fn validate_update_content(req: &UpdateContentRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref body) = req.body {
        validate_body(body)?;
    }
    Ok(())
}

/// Title is required: 1-200 Unicode characters after trimming.
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 200 {
        return Err(AppError::Validation(
            "Title must be 1-200 characters".into(),
        ));
    }
    Ok(())
}

/// Body is required and unbounded, but may not be blank.
pub fn validate_body(body: &str) -> Result<(), AppError> {
    if body.trim().is_empty() {
        return Err(AppError::Validation("Body must not be empty".into()));
    }
    Ok(())
}
