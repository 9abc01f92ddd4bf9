use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, Tag, slugify};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CommentRepository, PostRepository, ScoredPost, TagRepository,
};

use super::trigram;

/// Shared backing store for the in-memory repositories. The three
/// repositories hand out views over the same maps so that tag links are
/// visible to post queries, mirroring the relational schema.
#[derive(Default)]
pub struct MemoryStore {
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
    tags: RwLock<HashMap<Uuid, Tag>>,
    /// (post_id, tag_id) pairs - the join table.
    links: RwLock<HashSet<(Uuid, Uuid)>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        // Enforce the slug-per-publish-date unique index.
        let date = post.published_at.date_naive();
        let clash = posts.values().any(|other| {
            other.id != post.id
                && other.slug == post.slug
                && other.published_at.date_naive() == date
        });
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.store.posts.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        self.store.links.write().await.retain(|(pid, _)| *pid != id);
        self.store
            .comments
            .write()
            .await
            .retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(
        &self,
        tag_id: Option<Uuid>,
        limit: Option<u64>,
    ) -> Result<Vec<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        let links = self.store.links.read().await;

        let mut result: Vec<Post> = posts
            .values()
            .filter(|p| p.is_published())
            .filter(|p| match tag_id {
                Some(tag_id) => links.contains(&(p.id, tag_id)),
                None => true,
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        if let Some(limit) = limit {
            result.truncate(limit as usize);
        }
        Ok(result)
    }

    async fn find_published_by_date_and_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let Some(date) = chrono::NaiveDate::from_ymd_opt(year, month, day) else {
            return Ok(None);
        };

        Ok(self
            .store
            .posts
            .read()
            .await
            .values()
            .find(|p| {
                p.is_published() && p.slug == slug && p.published_at.date_naive() == date
            })
            .cloned())
    }

    async fn find_related(
        &self,
        exclude: Uuid,
        tag_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let wanted: HashSet<Uuid> = tag_ids.iter().copied().collect();
        let posts = self.store.posts.read().await;
        let links = self.store.links.read().await;

        let mut ranked: Vec<(usize, Post)> = posts
            .values()
            .filter(|p| p.is_published() && p.id != exclude)
            .filter_map(|p| {
                let shared = links
                    .iter()
                    .filter(|(pid, tid)| *pid == p.id && wanted.contains(tid))
                    .count();
                (shared > 0).then(|| (shared, p.clone()))
            })
            .collect();

        // Most shared tags first, most recent publish breaking ties.
        ranked.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| b.1.published_at.cmp(&a.1.published_at))
        });
        ranked.truncate(limit as usize);

        Ok(ranked.into_iter().map(|(_, post)| post).collect())
    }

    async fn search_by_title(
        &self,
        query: &str,
        threshold: f32,
    ) -> Result<Vec<ScoredPost>, RepoError> {
        let posts = self.store.posts.read().await;

        let mut hits: Vec<ScoredPost> = posts
            .values()
            .filter(|p| p.is_published())
            .filter_map(|p| {
                let score = trigram::similarity(query, &p.title);
                // Strictly above the threshold; a score at it is out.
                (score > threshold).then(|| ScoredPost {
                    post: p.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(hits)
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryCommentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.store.comments.read().await.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.store
            .comments
            .write()
            .await
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.comments.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_active_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let mut result: Vec<Comment> = self
            .store
            .comments
            .read()
            .await
            .values()
            .filter(|c| c.post_id == post_id && c.active)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }
}

/// In-memory tag repository.
pub struct InMemoryTagRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryTagRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for InMemoryTagRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        Ok(self.store.tags.read().await.get(&id).cloned())
    }

    async fn save(&self, tag: Tag) -> Result<Tag, RepoError> {
        self.store.tags.write().await.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.store.tags.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        self.store.links.write().await.retain(|(_, tid)| *tid != id);
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let tags = self.store.tags.read().await;
        let links = self.store.links.read().await;

        Ok(links
            .iter()
            .filter(|(pid, _)| *pid == post_id)
            .filter_map(|(_, tid)| tags.get(tid).cloned())
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        Ok(self
            .store
            .tags
            .read()
            .await
            .values()
            .find(|t| t.slug == slug)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
        let mut result: Vec<Tag> = self.store.tags.read().await.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn attach(&self, post_id: Uuid, names: &[String]) -> Result<Vec<Tag>, RepoError> {
        let mut attached = Vec::with_capacity(names.len());

        for name in names {
            let slug = slugify(name);
            if slug.is_empty() {
                continue;
            }

            let tag = match self.find_by_slug(&slug).await? {
                Some(tag) => tag,
                None => {
                    let tag = Tag::new(name.clone());
                    self.store.tags.write().await.insert(tag.id, tag.clone());
                    tag
                }
            };

            self.store.links.write().await.insert((post_id, tag.id));
            attached.push(tag);
        }

        Ok(attached)
    }
}
