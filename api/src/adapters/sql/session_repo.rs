//! SQL adapter for SessionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::db_error;
use crate::domain::entities::{NewSession, Session, UserId};
use crate::domain::ports::SessionRepository;
use crate::entity::sessions;
use crate::error::DomainError;

/// SeaORM implementation of SessionRepository
pub struct SqlSessionRepository {
    db: DatabaseConnection,
}

impl SqlSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SqlSessionRepository {
    async fn create(&self, session: &NewSession) -> Result<Session, DomainError> {
        let model = sessions::ActiveModel {
            token_hash: Set(session.token_hash.clone()),
            user_id: Set(session.user_id.0),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError> {
        let result = sessions::Entity::find_by_id(hash.to_string())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn delete(&self, hash: &str) -> Result<(), DomainError> {
        sessions::Entity::delete_by_id(hash.to_string())
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::CreatedAt.lt(cutoff.fixed_offset()))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected)
    }
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Session {
            token_hash: model.token_hash,
            user_id: UserId(model.user_id),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
