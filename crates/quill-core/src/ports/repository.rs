use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Comment, Post, Tag};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// A post paired with its search ranking score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPost {
    pub post: Post,
    pub score: f32,
}

/// Post repository - the "post store" the ranking components read through.
///
/// All query methods below see published posts only; drafts never leave
/// the store through them.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Published posts, newest first, optionally restricted to posts
    /// carrying the given tag.
    async fn list_published(
        &self,
        tag_id: Option<Uuid>,
        limit: Option<u64>,
    ) -> Result<Vec<Post>, RepoError>;

    /// Look up a published post by its canonical address: publish date
    /// plus slug. Slugs are unique within a publish date.
    async fn find_published_by_date_and_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Published posts sharing at least one of `tag_ids`, excluding
    /// `exclude`, ranked by shared-tag count (desc) then publish time
    /// (desc), capped at `limit`.
    async fn find_related(
        &self,
        exclude: Uuid,
        tag_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Published posts whose title scores strictly above `threshold` on
    /// trigram similarity against `query`, in descending score order.
    /// Ties carry no guaranteed secondary order.
    async fn search_by_title(
        &self,
        query: &str,
        threshold: f32,
    ) -> Result<Vec<ScoredPost>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Active comments on a post, oldest first. Inactive comments are
    /// moderated out of sight and never returned here.
    async fn find_active_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Tag repository - the many-to-many tag index over posts.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    /// All tags attached to a post.
    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Look up a tag by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    /// Every tag known to the system.
    async fn list_all(&self) -> Result<Vec<Tag>, RepoError>;

    /// Find-or-create tags by name and attach them to a post. Returns
    /// the attached tags.
    async fn attach(&self, post_id: Uuid, names: &[String]) -> Result<Vec<Tag>, RepoError>;
}
