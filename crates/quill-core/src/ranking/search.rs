use std::sync::Arc;

use crate::error::RepoError;
use crate::ports::{PostRepository, ScoredPost};

/// Minimum trigram similarity a title must score against the query to be
/// retained. The threshold is exclusive: a score of exactly 0.1 is out.
pub const SIMILARITY_THRESHOLD: f32 = 0.1;

/// Free-text title search.
///
/// Scores published posts by trigram similarity between the query and the
/// post title, keeps everything above [`SIMILARITY_THRESHOLD`], and
/// returns descending by score. The scoring itself is a capability of the
/// post store (pg_trgm on Postgres, an in-process trigram scorer in the
/// in-memory adapter).
pub struct SearchRanker {
    posts: Arc<dyn PostRepository>,
}

impl SearchRanker {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Run a search. A blank query means "no query": the result is empty
    /// and no store call is made, which keeps "nothing asked" distinct
    /// from "asked, nothing found".
    pub async fn search(&self, raw_query: &str) -> Result<Vec<ScoredPost>, RepoError> {
        let query = raw_query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(%query, "Searching post titles");
        self.posts.search_by_title(query, SIMILARITY_THRESHOLD).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::domain::Post;
    use crate::ports::BaseRepository;

    #[derive(Default)]
    struct StubPosts {
        queried: AtomicBool,
        last_query: Mutex<Option<(String, f32)>>,
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
            _exclude: Uuid,
            _tag_ids: &[Uuid],
            _limit: u64,
        ) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }
        async fn search_by_title(
            &self,
            query: &str,
            threshold: f32,
        ) -> Result<Vec<ScoredPost>, RepoError> {
            self.queried.store(true, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some((query.to_string(), threshold));
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn blank_query_runs_no_search() {
        let posts = Arc::new(StubPosts::default());
        let ranker = SearchRanker::new(posts.clone());

        assert!(ranker.search("").await.unwrap().is_empty());
        assert!(ranker.search("   \t\n").await.unwrap().is_empty());
        assert!(!posts.queried.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn query_is_trimmed_and_threshold_forwarded() {
        let posts = Arc::new(StubPosts::default());
        let ranker = SearchRanker::new(posts.clone());

        ranker.search("  rust web  ").await.unwrap();

        let (query, threshold) = posts.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query, "rust web");
        assert_eq!(threshold, SIMILARITY_THRESHOLD);
    }
}
