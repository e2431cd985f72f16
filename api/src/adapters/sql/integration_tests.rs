//! SQL adapter tests
//!
//! These run against an in-memory SQLite database with the real schema, so
//! the unique indexes behave as they do in production.

use uuid::Uuid;

use super::*;
use crate::domain::entities::*;
use crate::domain::ports::*;
use crate::error::DomainError;
use crate::test_utils::test_db;

async fn user(db: &sea_orm::DatabaseConnection, username: &str) -> User {
    SqlUserRepository::new(db.clone())
        .create(&NewUser {
            username: username.to_string(),
            password_hash: "!".to_string(),
        })
        .await
        .expect("Failed to create user")
}

fn new_note(author: &User, slug: &str) -> NewNote {
    NewNote {
        title: "Заголовок".to_string(),
        text: "Текст".to_string(),
        slug: slug.to_string(),
        author_id: author.id,
    }
}

// ============================================================================
// User Repository Tests
// ============================================================================

mod user_repo_tests {
    use super::*;

    #[tokio::test]
    async fn create_and_find_user() {
        let db = test_db().await;
        let repo = SqlUserRepository::new(db.clone());

        let created = user(&db, "ЛевТолстой").await;

        let by_id = repo.find_by_id(&created.id).await.unwrap();
        assert_eq!(by_id.unwrap().username, "ЛевТолстой");

        let by_name = repo.find_by_username("ЛевТолстой").await.unwrap();
        assert_eq!(by_name.unwrap().id, created.id);

        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_already_exists() {
        let db = test_db().await;
        let repo = SqlUserRepository::new(db.clone());
        user(&db, "author").await;

        let result = repo
            .create(&NewUser {
                username: "author".to_string(),
                password_hash: "x".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::AlreadyExists(_))));
    }
}

// ============================================================================
// Session Repository Tests
// ============================================================================

mod session_repo_tests {
    use super::*;

    #[tokio::test]
    async fn create_find_delete_session() {
        let db = test_db().await;
        let repo = SqlSessionRepository::new(db.clone());
        let owner = user(&db, "author").await;

        repo.create(&NewSession {
            token_hash: "hash-1".to_string(),
            user_id: owner.id,
        })
        .await
        .unwrap();

        let found = repo.find_by_token_hash("hash-1").await.unwrap();
        assert_eq!(found.unwrap().user_id, owner.id);

        repo.delete("hash-1").await.unwrap();
        assert!(repo.find_by_token_hash("hash-1").await.unwrap().is_none());

        // Deleting twice is fine
        repo.delete("hash-1").await.unwrap();
    }

    #[tokio::test]
    async fn delete_created_before_cutoff() {
        let db = test_db().await;
        let repo = SqlSessionRepository::new(db.clone());
        let owner = user(&db, "author").await;

        repo.create(&NewSession {
            token_hash: "hash-1".to_string(),
            user_id: owner.id,
        })
        .await
        .unwrap();

        let past = chrono::Utc::now() - chrono::Duration::days(1);
        assert_eq!(repo.delete_created_before(past).await.unwrap(), 0);
        assert!(repo.find_by_token_hash("hash-1").await.unwrap().is_some());

        let future = chrono::Utc::now() + chrono::Duration::seconds(1);
        assert_eq!(repo.delete_created_before(future).await.unwrap(), 1);
        assert!(repo.find_by_token_hash("hash-1").await.unwrap().is_none());
    }
}

// ============================================================================
// Note Repository Tests
// ============================================================================

mod note_repo_tests {
    use super::*;

    #[tokio::test]
    async fn create_and_find_note() {
        let db = test_db().await;
        let repo = SqlNoteRepository::new(db.clone());
        let author = user(&db, "author").await;

        let note = repo.create(&new_note(&author, "slug1")).await.unwrap();
        assert_eq!(note.author_id, author.id);

        let found = repo.find_by_slug("slug1").await.unwrap().unwrap();
        assert_eq!(found.id, note.id);
        assert_eq!(found.text, "Текст");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_slug_is_slug_conflict() {
        let db = test_db().await;
        let repo = SqlNoteRepository::new(db.clone());
        let author = user(&db, "author").await;
        let reader = user(&db, "reader").await;

        repo.create(&new_note(&author, "slug1")).await.unwrap();
        let result = repo.create(&new_note(&reader, "slug1")).await;

        match result {
            Err(DomainError::SlugConflict(slug)) => assert_eq!(slug, "slug1"),
            other => panic!("expected slug conflict, got {:?}", other),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_keeps_author() {
        let db = test_db().await;
        let repo = SqlNoteRepository::new(db.clone());
        let author = user(&db, "author").await;
        let note = repo.create(&new_note(&author, "slug1")).await.unwrap();

        let updated = repo
            .update(
                &note.id,
                &NoteChanges {
                    title: "New title".to_string(),
                    text: "New text".to_string(),
                    slug: "slug1-renamed".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.author_id, author.id);
        assert_eq!(updated.text, "New text");
        assert!(repo.find_by_slug("slug1").await.unwrap().is_none());
        assert!(repo.find_by_slug("slug1-renamed").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_onto_taken_slug_is_slug_conflict() {
        let db = test_db().await;
        let repo = SqlNoteRepository::new(db.clone());
        let author = user(&db, "author").await;
        let first = repo.create(&new_note(&author, "first")).await.unwrap();
        repo.create(&new_note(&author, "second")).await.unwrap();

        let result = repo
            .update(
                &first.id,
                &NoteChanges {
                    title: "t".to_string(),
                    text: "t".to_string(),
                    slug: "second".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::SlugConflict(_))));
    }

    #[tokio::test]
    async fn update_missing_note_is_not_found() {
        let db = test_db().await;
        let repo = SqlNoteRepository::new(db);

        let result = repo
            .update(
                &NoteId(Uuid::new_v4()),
                &NoteChanges {
                    title: "t".to_string(),
                    text: "t".to_string(),
                    slug: "t".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_by_author_filters() {
        let db = test_db().await;
        let repo = SqlNoteRepository::new(db.clone());
        let author = user(&db, "author").await;
        let reader = user(&db, "reader").await;

        repo.create(&new_note(&author, "a1")).await.unwrap();
        repo.create(&new_note(&author, "a2")).await.unwrap();
        repo.create(&new_note(&reader, "r1")).await.unwrap();

        let notes = repo.list_by_author(&author.id).await.unwrap();
        let slugs: Vec<_> = notes.iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(slugs.len(), 2);
        assert!(slugs.contains(&"a1") && slugs.contains(&"a2"));
    }

    #[tokio::test]
    async fn delete_note() {
        let db = test_db().await;
        let repo = SqlNoteRepository::new(db.clone());
        let author = user(&db, "author").await;
        let note = repo.create(&new_note(&author, "slug1")).await.unwrap();

        repo.delete(&note.id).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(
            repo.delete(&note.id).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
