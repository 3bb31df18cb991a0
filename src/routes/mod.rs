use axum::{
    Router,
    routing::{delete, get},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{admin, content};
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/api/cms/content", content_routes())
}

fn content_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(content::list_content, content::create_content))
        .routes(routes!(
            content::get_content,
            content::replace_content,
            content::update_content,
            content::delete_content
        ))
}

/// Management routes. Not part of the OpenAPI document.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/content/",
            get(admin::list_content).post(admin::create_content),
        )
        .route(
            "/content/{id}/",
            delete(admin::delete_content)
                .patch(admin::update_content)
                .put(admin::update_content),
        )
}
