// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::Result;
use chrono::Utc;
use common::Todo;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db;

/// Returns every stored todo, verbatim from the data-access layer.
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Todo>> {
    db::find_all(pool).await
}

/// Looks up a single todo, `None` signalling absence.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Todo>> {
    db::find_by_id(pool, id).await
}

/// Builds a new todo with server-assigned fields and persists it.
/// The record starts incomplete, and its creation and update timestamps
/// are identical. Title validation happens upstream in the HTTP layer.
pub async fn create(pool: &SqlitePool, title: String) -> Result<Todo> {
    let now = Utc::now();
    let mut todo = Todo {
        id: 0, // replaced by the generated key on insert
        title,
        completed: false,
        created_at: now,
        updated_at: now,
    };

    db::insert(pool, &mut todo).await?;

    Ok(todo)
}

/// Applies a partial update to an existing todo.
/// Each `None` field is left unchanged; a present field overwrites the
/// stored value, blank titles included. `updated_at` is always refreshed.
/// Returns `Ok(None)` when no todo with the given ID exists.
///
/// The existence check runs before the write even though `db::update`
/// also no-ops on a missing ID; the lookup is what produces the 404.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: Option<String>,
    completed: Option<bool>,
) -> Result<Option<Todo>> {
    let mut existing = match db::find_by_id(pool, id).await? {
        Some(todo) => todo,
        None => {
            debug!("Todo with ID {} not found for update.", id);
            return Ok(None);
        }
    };

    if let Some(title) = title {
        existing.title = title;
    }
    if let Some(completed) = completed {
        existing.completed = completed;
    }
    existing.updated_at = Utc::now();

    db::update(pool, &existing).await?;

    Ok(Some(existing))
}

/// Deletes a todo by ID, reporting whether a row was actually removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
    Ok(db::delete_by_id(pool, id).await? > 0)
}

/// Removes every todo, unconditionally.
pub async fn delete_all(pool: &SqlitePool) -> Result<()> {
    db::delete_all(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper function to set up an in-memory SQLite database for testing.
    async fn setup_test_db() -> Result<SqlitePool> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                completed BOOLEAN NOT NULL,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(pool)
    }

    #[tokio::test]
    async fn test_create_assigns_defaults() {
        let pool = setup_test_db().await.unwrap();

        // Act
        let created = create(&pool, "Buy milk".to_string()).await.unwrap();

        // Assert: Server-assigned fields are populated
        assert!(created.id > 0);
        assert_eq!(created.title, "Buy milk");
        assert!(!created.completed);
        assert_eq!(created.created_at, created.updated_at);

        // Assert: The same record comes back from a lookup
        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Buy milk");
        assert!(!found.completed);
    }

    #[tokio::test]
    async fn test_update_merges_only_present_fields() {
        let pool = setup_test_db().await.unwrap();
        let created = create(&pool, "Buy milk".to_string()).await.unwrap();

        // Act: Only the completed flag is present in the request
        let updated = update(&pool, created.id, None, Some(true))
            .await
            .unwrap()
            .unwrap();

        // Assert: Title untouched, flag flipped, updated_at advanced
        assert_eq!(updated.title, "Buy milk");
        assert!(updated.completed);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_title_only_keeps_completed() {
        let pool = setup_test_db().await.unwrap();
        let created = create(&pool, "Buy milk".to_string()).await.unwrap();
        update(&pool, created.id, None, Some(true)).await.unwrap();

        // Act: Only the title is present in the request
        let updated = update(&pool, created.id, Some("Buy bread".to_string()), None)
            .await
            .unwrap()
            .unwrap();

        // Assert: Completed flag survives the title change
        assert_eq!(updated.title, "Buy bread");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn test_update_allows_blank_title() {
        // Blank titles are rejected at creation only; an update may set one.
        let pool = setup_test_db().await.unwrap();
        let created = create(&pool, "Buy milk".to_string()).await.unwrap();

        let updated = update(&pool, created.id, Some(String::new()), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "");
    }

    #[tokio::test]
    async fn test_update_missing_id_reports_absence() {
        let pool = setup_test_db().await.unwrap();

        let result = update(&pool, 9999, Some("Anything".to_string()), Some(true))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_removal_exactly_once() {
        let pool = setup_test_db().await.unwrap();
        let created = create(&pool, "Doomed".to_string()).await.unwrap();

        // Act: Delete the same ID twice
        let first = delete(&pool, created.id).await.unwrap();
        let second = delete(&pool, created.id).await.unwrap();

        // Assert
        assert!(first);
        assert!(!second);
    }

    #[tokio::test]
    async fn test_delete_all_idempotent() {
        let pool = setup_test_db().await.unwrap();
        create(&pool, "First".to_string()).await.unwrap();
        create(&pool, "Second".to_string()).await.unwrap();

        delete_all(&pool).await.unwrap();
        delete_all(&pool).await.unwrap();

        assert!(find_all(&pool).await.unwrap().is_empty());
    }
}
