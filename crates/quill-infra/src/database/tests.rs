#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use crate::database::entity::{comment, post};
    use crate::database::postgres_repo::{
        PostgresCommentRepository, PostgresPostRepository,
    };
    use quill_core::domain::{Post, PostStatus};
    use quill_core::ports::{BaseRepository, CommentRepository, PostRepository};

    fn post_model(title: &str, status: post::PostStatus) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            author_id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            slug: "slug".to_owned(),
            body: "Body".to_owned(),
            status,
            published_at: now.into(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id_maps_status() {
        let model = post_model("Test Post", post::PostStatus::Published);
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();
        let db = std::sync::Arc::new(db);

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn test_find_related_with_no_tags_skips_the_query() {
        // No results are queued: any query hitting the mock would fail.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let db = std::sync::Arc::new(db);
        let repo = PostgresPostRepository::new(db);

        let related = repo
            .find_related(uuid::Uuid::new_v4(), &[], 4)
            .await
            .unwrap();
        assert!(related.is_empty());
    }

    #[tokio::test]
    async fn test_search_maps_scored_rows() {
        let model = post_model("Rust at Work", post::PostStatus::Published);
        let post_id = model.id;

        let mut row = BTreeMap::<&str, Value>::new();
        row.insert("id", model.id.into());
        row.insert("author_id", model.author_id.into());
        row.insert("title", model.title.into());
        row.insert("slug", model.slug.into());
        row.insert("body", model.body.into());
        row.insert("status", "published".into());
        row.insert("published_at", model.published_at.into());
        row.insert("created_at", model.created_at.into());
        row.insert("updated_at", model.updated_at.into());
        row.insert("score", 0.42f32.into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();
        let db = std::sync::Arc::new(db);

        let repo = PostgresPostRepository::new(db);

        let hits = repo.search_by_title("rust", 0.1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].post.id, post_id);
        assert!((hits[0].score - 0.42).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_find_active_comments_maps_models() {
        let now = chrono::Utc::now();
        let post_id = uuid::Uuid::new_v4();
        let model = comment::Model {
            id: uuid::Uuid::new_v4(),
            post_id,
            name: "Ann".to_owned(),
            email: "ann@example.com".to_owned(),
            body: "Nice post".to_owned(),
            active: true,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();
        let db = std::sync::Arc::new(db);

        let repo = PostgresCommentRepository::new(db);

        let comments = repo.find_active_by_post(post_id).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].name, "Ann");
        assert!(comments[0].active);
    }
}
