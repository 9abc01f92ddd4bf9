//! Data Transfer Objects - request/response types for the blog API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a new draft post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    /// Tag names; created on the fly if unknown.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to submit a comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A tag as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// A post in listings and related-post recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
    /// Canonical path of the post, e.g. `/api/posts/2024/1/15/my-post`.
    pub url: String,
}

/// A comment as displayed under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Full post detail: the post, its tags, its active comments, and up to
/// four related posts ranked by shared tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: String,
    pub published_at: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
    pub comments: Vec<CommentResponse>,
    pub related: Vec<PostSummary>,
}

/// One search hit: a post plus its trigram similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub post: PostSummary,
    pub score: f32,
}

/// Search results for a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub hits: Vec<SearchHit>,
}
