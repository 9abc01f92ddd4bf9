//! Tag listing.

use actix_web::{HttpResponse, web};

use quill_shared::ApiResponse;
use quill_shared::dto::TagResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/tags - every tag known to the blog, alphabetically.
pub async fn list_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.list_all().await?;
    let tags: Vec<TagResponse> = tags
        .into_iter()
        .map(|t| TagResponse {
            id: t.id,
            name: t.name,
            slug: t.slug,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(tags)))
}
