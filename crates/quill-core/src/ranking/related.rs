use std::sync::Arc;

use crate::domain::Post;
use crate::error::RepoError;
use crate::ports::{PostRepository, TagRepository};

/// How many related posts a recommendation returns at most.
pub const RELATED_LIMIT: u64 = 4;

/// Related-post recommender.
///
/// Given a post, ranks other published posts by how many tags they share
/// with it, breaking ties by publish time (most recent first). The
/// counting and ordering run in the post store; this component only
/// decides whether a query is worth running and with which tag set.
pub struct RelatedRanker {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
}

impl RelatedRanker {
    pub fn new(posts: Arc<dyn PostRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { posts, tags }
    }

    /// Up to [`RELATED_LIMIT`] published posts sharing tags with `post`,
    /// never including `post` itself. A tagless post has nothing to rank
    /// against: the result is empty and no post query is made.
    pub async fn related_to(&self, post: &Post) -> Result<Vec<Post>, RepoError> {
        let tags = self.tags.tags_of(post.id).await?;
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let tag_ids: Vec<_> = tags.iter().map(|t| t.id).collect();
        tracing::debug!(post_id = %post.id, tag_count = tag_ids.len(), "Ranking related posts");
        self.posts.find_related(post.id, &tag_ids, RELATED_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::domain::Tag;
    use crate::ports::{BaseRepository, ScoredPost};

    #[derive(Default)]
    struct StubTags {
        tags: Vec<Tag>,
    }

    #[async_trait]
    impl BaseRepository<Tag, Uuid> for StubTags {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Tag>, RepoError> {
            Ok(None)
        }
        async fn save(&self, tag: Tag) -> Result<Tag, RepoError> {
            Ok(tag)
        }
        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl TagRepository for StubTags {
        async fn tags_of(&self, _post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
            Ok(self.tags.clone())
        }
        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Tag>, RepoError> {
            Ok(None)
        }
        async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
            Ok(self.tags.clone())
        }
        async fn attach(&self, _post_id: Uuid, _names: &[String]) -> Result<Vec<Tag>, RepoError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct StubPosts {
        queried: AtomicBool,
        last_args: Mutex<Option<(Uuid, Vec<Uuid>, u64)>>,
        related: Vec<Post>,
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for StubPosts {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }
        async fn save(&self, post: Post) -> Result<Post, RepoError> {
            Ok(post)
        }
        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for StubPosts {
        async fn list_published(
            &self,
            _tag_id: Option<Uuid>,
            _limit: Option<u64>,
        ) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }
        async fn find_published_by_date_and_slug(
            &self,
            _year: i32,
            _month: u32,
            _day: u32,
            _slug: &str,
        ) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }
        async fn find_related(
            &self,
            exclude: Uuid,
            tag_ids: &[Uuid],
            limit: u64,
        ) -> Result<Vec<Post>, RepoError> {
            self.queried.store(true, Ordering::SeqCst);
            *self.last_args.lock().unwrap() = Some((exclude, tag_ids.to_vec(), limit));
            Ok(self.related.clone())
        }
        async fn search_by_title(
            &self,
            _query: &str,
            _threshold: f32,
        ) -> Result<Vec<ScoredPost>, RepoError> {
            Ok(Vec::new())
        }
    }

    fn sample_post() -> Post {
        Post::new(Uuid::new_v4(), "Sample".into(), "body".into()).unwrap()
    }

    #[tokio::test]
    async fn tagless_post_skips_the_store_entirely() {
        let posts = Arc::new(StubPosts::default());
        let ranker = RelatedRanker::new(posts.clone(), Arc::new(StubTags::default()));

        let result = ranker.related_to(&sample_post()).await.unwrap();

        assert!(result.is_empty());
        assert!(!posts.queried.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn queries_with_own_id_excluded_and_limit_four() {
        let posts = Arc::new(StubPosts::default());
        let tags = Arc::new(StubTags {
            tags: vec![Tag::new("python".into()), Tag::new("django".into())],
        });
        let ranker = RelatedRanker::new(posts.clone(), tags);
        let post = sample_post();

        ranker.related_to(&post).await.unwrap();

        let (exclude, tag_ids, limit) = posts.last_args.lock().unwrap().clone().unwrap();
        assert_eq!(exclude, post.id);
        assert_eq!(tag_ids.len(), 2);
        assert_eq!(limit, RELATED_LIMIT);
    }
}
