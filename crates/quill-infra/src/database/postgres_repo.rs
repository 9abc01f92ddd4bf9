//! PostgreSQL repository implementations.
//!
//! The two ranking queries live here: related posts are ranked by a SQL
//! aggregation over the join table, and title search delegates to the
//! `pg_trgm` `similarity()` function backed by a GIN trigram index.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime};
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, Statement,
};
use uuid::Uuid;

use quill_core::domain::{Comment, Post, Tag, slugify};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, ScoredPost, TagRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// Row shape of the trigram search query: all post columns plus the
/// similarity score computed by Postgres.
#[derive(Debug, FromQueryResult)]
struct ScoredRow {
    id: Uuid,
    author_id: Uuid,
    title: String,
    slug: String,
    body: String,
    status: post::PostStatus,
    published_at: DateTimeWithTimeZone,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    score: f32,
}

impl From<ScoredRow> for ScoredPost {
    fn from(row: ScoredRow) -> Self {
        Self {
            post: Post {
                id: row.id,
                author_id: row.author_id,
                title: row.title,
                slug: row.slug,
                body: row.body,
                status: row.status.into(),
                published_at: row.published_at.into(),
                created_at: row.created_at.into(),
                updated_at: row.updated_at.into(),
            },
            score: row.score,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(
        &self,
        tag_id: Option<Uuid>,
        limit: Option<u64>,
    ) -> Result<Vec<Post>, RepoError> {
        let mut query =
            PostEntity::find().filter(post::Column::Status.eq(post::PostStatus::Published));

        if let Some(tag_id) = tag_id {
            query = query
                .join(JoinType::InnerJoin, post::Relation::PostTags.def())
                .filter(post_tag::Column::TagId.eq(tag_id));
        }

        let mut query = query.order_by_desc(post::Column::PublishedAt);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let result = query
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_published_by_date_and_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        // An impossible calendar date cannot address any post.
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            return Ok(None);
        };
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);

        let result = PostEntity::find()
            .filter(post::Column::Status.eq(post::PostStatus::Published))
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::PublishedAt.gte(start))
            .filter(post::Column::PublishedAt.lt(end))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_related(
        &self,
        exclude: Uuid,
        tag_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = PostEntity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                r#"
                SELECT p.*
                FROM posts p
                INNER JOIN post_tags pt ON pt.post_id = p.id
                WHERE p.status = 'published'
                  AND p.id <> $1
                  AND pt.tag_id = ANY($2)
                GROUP BY p.id
                ORDER BY COUNT(pt.tag_id) DESC, p.published_at DESC
                LIMIT $3
                "#,
                [
                    exclude.into(),
                    tag_ids.to_vec().into(),
                    (limit as i64).into(),
                ],
            ))
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search_by_title(
        &self,
        query: &str,
        threshold: f32,
    ) -> Result<Vec<ScoredPost>, RepoError> {
        let rows = ScoredRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT p.*, similarity(p.title, $1) AS score
            FROM posts p
            WHERE p.status = 'published'
              AND similarity(p.title, $1) > $2
            ORDER BY score DESC
            "#,
            [query.into(), threshold.into()],
        ))
        .all(self.db.as_ref())
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_active_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTags.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
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
                    let model: tag::ActiveModel = Tag::new(name.clone()).into();
                    model
                        .insert(self.db.as_ref())
                        .await
                        .map_err(|e| RepoError::Query(e.to_string()))?
                        .into()
                }
            };

            let linked = PostTagEntity::find_by_id((post_id, tag.id))
                .one(self.db.as_ref())
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
            if linked.is_none() {
                let link = post_tag::ActiveModel {
                    post_id: Set(post_id),
                    tag_id: Set(tag.id),
                };
                link.insert(self.db.as_ref())
                    .await
                    .map_err(|e| RepoError::Query(e.to_string()))?;
            }

            attached.push(tag);
        }

        Ok(attached)
    }
}
