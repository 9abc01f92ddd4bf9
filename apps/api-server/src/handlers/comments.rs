//! Comment submission.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_shared::ApiResponse;
use quill_shared::dto::{CommentResponse, CreateCommentRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts/{id}/comments - submit a comment on a published post.
/// Comments start active and are immediately visible; there is no
/// moderation queue.
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    // Validate input
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("body must not be empty".to_string()));
    }

    // Only published posts accept comments; drafts are invisible.
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .filter(|p| p.is_published())
        .ok_or_else(|| AppError::NotFound(format!("post {post_id} not found")))?;

    let comment = Comment::new(post.id, req.name, req.email, req.body);
    let comment = state.comments.save(comment).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CommentResponse {
        id: comment.id,
        name: comment.name,
        body: comment.body,
        created_at: comment.created_at,
    })))
}
