//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CommentRepository, PostRepository, TagRepository};
use quill_core::ranking::{RelatedRanker, SearchRanker};
use quill_infra::database::DatabaseConfig;
use quill_infra::memory::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryTagRepository, MemoryStore,
};

#[cfg(feature = "postgres")]
use quill_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository, connect,
};

/// Shared application state: the three repositories plus the two rankers
/// composed over them.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub related: Arc<RelatedRanker>,
    pub search: Arc<SearchRanker>,
    /// Which store backs the repositories, surfaced by the health check.
    pub backend: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(config) = db_config {
            match connect(config).await {
                Ok(conn) => {
                    let conn = Arc::new(conn);
                    let state = Self::from_repos(
                        Arc::new(PostgresPostRepository::new(conn.clone())),
                        Arc::new(PostgresCommentRepository::new(conn.clone())),
                        Arc::new(PostgresTagRepository::new(conn)),
                        "postgres",
                    );
                    tracing::info!("Application state initialized (postgres)");
                    return state;
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        }

        #[cfg(not(feature = "postgres"))]
        let _ = db_config;

        if db_config.is_none() {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }
        Self::in_memory()
    }

    /// State backed purely by in-memory repositories. Also what the
    /// handler tests run against.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self::from_repos(
            Arc::new(InMemoryPostRepository::new(store.clone())),
            Arc::new(InMemoryCommentRepository::new(store.clone())),
            Arc::new(InMemoryTagRepository::new(store)),
            "memory",
        )
    }

    fn from_repos(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        tags: Arc<dyn TagRepository>,
        backend: &'static str,
    ) -> Self {
        let related = Arc::new(RelatedRanker::new(posts.clone(), tags.clone()));
        let search = Arc::new(SearchRanker::new(posts.clone()));
        Self {
            posts,
            comments,
            tags,
            related,
            search,
            backend,
        }
    }
}
