use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Publication state of a post. Draft posts are invisible to every
/// public query (listing, detail, related, search).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
        }
    }
}

/// Post entity - a blog post.
///
/// `author_id` is an opaque reference; user management lives outside this
/// system. `slug` is derived from the title and is unique per publish
/// *date*, not globally - the same slug may recur on different days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post with a slug derived from the title. The
    /// title must yield a non-empty slug, since the slug addresses the
    /// post once published.
    pub fn new(author_id: Uuid, title: String, body: String) -> Result<Self, DomainError> {
        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(DomainError::Validation(
                "title must contain at least one alphanumeric character".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            body,
            status: PostStatus::Draft,
            published_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Flip the post to published and stamp the publish time.
    pub fn publish(&mut self) {
        let now = Utc::now();
        self.status = PostStatus::Published;
        self.published_at = now;
        self.updated_at = now;
    }
}

/// Derive a URL-safe slug from a title: lowercase alphanumerics with
/// single hyphens between words, nothing else.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lc in c.to_lowercase() {
                slug.push(lc);
            }
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
