//! SQL adapter for NoteRepository
//!
//! Slug uniqueness is enforced by the `notes.slug` unique index; a violation
//! on insert or update is reported as `SlugConflict`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{db_error, is_unique_violation};
use crate::domain::entities::{NewNote, Note, NoteChanges, NoteId, UserId};
use crate::domain::ports::NoteRepository;
use crate::entity::notes;
use crate::error::DomainError;

/// SeaORM implementation of NoteRepository
pub struct SqlNoteRepository {
    db: DatabaseConnection,
}

impl SqlNoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn write_error(err: DbErr, slug: &str) -> DomainError {
    if is_unique_violation(&err) {
        DomainError::SlugConflict(slug.to_string())
    } else {
        db_error(err)
    }
}

#[async_trait]
impl NoteRepository for SqlNoteRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError> {
        let result = notes::Entity::find()
            .filter(notes::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, DomainError> {
        let results = notes::Entity::find()
            .filter(notes::Column::AuthorId.eq(author.0))
            .order_by_asc(notes::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        notes::Entity::find().count(&self.db).await.map_err(db_error)
    }

    async fn create(&self, note: &NewNote) -> Result<Note, DomainError> {
        let model = notes::ActiveModel {
            id: Set(NoteId::new().0),
            title: Set(note.title.clone()),
            text: Set(note.text.clone()),
            slug: Set(note.slug.clone()),
            author_id: Set(note.author_id.0),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &note.slug))?;

        Ok(result.into())
    }

    async fn update(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note, DomainError> {
        let result = notes::ActiveModel {
            id: Set(id.0),
            title: Set(changes.title.clone()),
            text: Set(changes.text.clone()),
            slug: Set(changes.slug.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Note {} not found", id)),
            e => write_error(e, &changes.slug),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), DomainError> {
        let result = notes::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Note {} not found", id)));
        }

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<notes::Model> for Note {
    fn from(model: notes::Model) -> Self {
        Note {
            id: NoteId(model.id),
            title: model.title,
            text: model.text,
            slug: model.slug,
            author_id: UserId(model.author_id),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
