use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, PrimaryKeyTrait};

use quill_core::error::RepoError;
use quill_core::ports::BaseRepository;

fn is_unique_violation(err: &DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("duplicate") || msg.contains("unique")
}

/// Generic PostgreSQL repository implementation. The entity-specific
/// repositories (posts, comments, tags) are aliases of this with their
/// domain query methods layered on top.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Clone + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        // Domain entities carry their IDs from birth, so "save" first
        // attempts an insert and falls back to an update when the row is
        // already there. A unique-index violation that is not the primary
        // key (slug-per-date, tag name) surfaces as a constraint error.
        let active_model: E::ActiveModel = entity.into();
        let model = match active_model.clone().insert(self.db.as_ref()).await {
            Ok(model) => model,
            Err(e) if is_unique_violation(&e) => {
                active_model.update(self.db.as_ref()).await.map_err(|e| match e {
                    sea_orm::DbErr::RecordNotUpdated => {
                        RepoError::Constraint("Entity already exists".to_string())
                    }
                    other => RepoError::Query(other.to_string()),
                })?
            }
            Err(e) => return Err(RepoError::Query(e.to_string())),
        };

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
