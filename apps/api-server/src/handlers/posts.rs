//! Post handlers - listing, detail, authoring, publication.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, Tag};
use quill_shared::ApiResponse;
use quill_shared::dto::{CommentResponse, CreatePostRequest, PostDetailResponse, TagResponse};

use super::summarize;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Tag slug to filter by.
    pub tag: Option<String>,
    pub limit: Option<u64>,
}

/// GET /api/posts - published posts, newest first. `?tag=` restricts to
/// one tag; an unknown tag slug is a 404, matching the detail routes.
pub async fn list_posts(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();

    let tag_id = match params.tag.as_deref() {
        Some(slug) => Some(
            state
                .tags
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("tag '{slug}' not found")))?
                .id,
        ),
        None => None,
    };

    let posts = state.posts.list_published(tag_id, params.limit).await?;
    let summaries: Vec<_> = posts.iter().map(summarize).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(summaries)))
}

/// GET /api/posts/{year}/{month}/{day}/{slug} - full post detail: the
/// post, its tags, its active comments, and the related-post ranking.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();

    let post = state
        .posts
        .find_published_by_date_and_slug(year, month, day, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no post at {year}/{month}/{day}/{slug}")))?;

    let comments = state.comments.find_active_by_post(post.id).await?;
    let tags = state.tags.tags_of(post.id).await?;
    let related = state.related.related_to(&post).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail(&post, tags, comments, related))))
}

/// POST /api/posts - create a draft post, attaching its tags by name.
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("body must not be empty".to_string()));
    }

    let post = Post::new(req.author_id, req.title, req.body)?;
    let post = state.posts.save(post).await?;
    let tags = state.tags.attach(post.id, &req.tags).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(detail(&post, tags, Vec::new(), Vec::new()))))
}

/// POST /api/posts/{id}/publish - flip a draft to published. Publishing
/// an already-published post is a no-op.
pub async fn publish_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;

    if !post.is_published() {
        post.publish();
        post = state.posts.save(post).await?;
        tracing::info!(post_id = %id, slug = %post.slug, "Post published");
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(summarize(&post))))
}

fn detail(
    post: &Post,
    tags: Vec<Tag>,
    comments: Vec<Comment>,
    related: Vec<Post>,
) -> PostDetailResponse {
    PostDetailResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        body: post.body.clone(),
        status: post.status.to_string(),
        published_at: post.published_at,
        tags: tags
            .into_iter()
            .map(|t| TagResponse {
                id: t.id,
                name: t.name,
                slug: t.slug,
            })
            .collect(),
        comments: comments
            .into_iter()
            .map(|c| CommentResponse {
                id: c.id,
                name: c.name,
                body: c.body,
                created_at: c.created_at,
            })
            .collect(),
        related: related.iter().map(summarize).collect(),
    }
}
