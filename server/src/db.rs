// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use common::Todo;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool}; // Added MigrateDatabase for database_exists/create_database
use tracing::{debug, info};

/// Establishes the database connection pool.
/// If the database does not exist, it creates it.
/// It also ensures the `todos` table has the correct schema.
pub async fn establish_connection_pool(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .context("Failed to create database")?;
    } else {
        info!("Database already exists.");
    }

    let pool = SqlitePool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

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
    .await
    .context("Failed to create 'todos' table")?;

    info!("'todos' table is ready.");

    Ok(pool)
}

/// Retrieves every todo row. Rows come back in primary-key order for a
/// stable listing, but callers must not rely on any particular order.
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Todo>> {
    let todos = sqlx::query_as::<_, Todo>("SELECT * FROM todos ORDER BY id ASC;")
        .fetch_all(pool)
        .await
        .context("Failed to retrieve todos from DB")?;

    Ok(todos)
}

/// Looks up a single todo by ID, returning `None` when no row matches.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Todo>> {
    let todo = sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = ?;")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context(format!("Failed to retrieve todo with ID {} from DB", id))?;

    Ok(todo)
}

/// Inserts a new todo into the database and writes the generated ID back
/// onto the given record.
pub async fn insert(pool: &SqlitePool, todo: &mut Todo) -> Result<()> {
    debug!(
        "Insert values: title={}, completed={}, created_at={}, updated_at={}",
        todo.title, todo.completed, todo.created_at, todo.updated_at
    );

    let id = sqlx::query(
        "INSERT INTO todos (title, completed, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&todo.title)
    .bind(todo.completed)
    .bind(todo.created_at)
    .bind(todo.updated_at)
    .execute(pool)
    .await
    .context("Failed to insert todo into DB")?
    .last_insert_rowid();

    todo.id = id;

    Ok(())
}

/// Overwrites the mutable fields of the row matching `todo.id`.
/// Silently a no-op when the ID does not exist; existence checking is the
/// caller's responsibility.
pub async fn update(pool: &SqlitePool, todo: &Todo) -> Result<()> {
    debug!("Attempting to update todo with ID: {}", todo.id);

    sqlx::query("UPDATE todos SET title = ?, completed = ?, updated_at = ? WHERE id = ?")
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(todo.updated_at)
        .bind(todo.id)
        .execute(pool)
        .await
        .context(format!("Failed to update todo with ID: {}", todo.id))?;

    Ok(())
}

/// Deletes a todo from the database by ID.
/// Returns the number of rows removed (0 or 1) so the caller can detect
/// absence.
pub async fn delete_by_id(pool: &SqlitePool, id: i64) -> Result<u64> {
    debug!("Attempting to delete todo with ID: {}", id);

    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context(format!("Failed to delete todo with ID: {}", id))?;

    let rows_affected = result.rows_affected();
    info!("Deleted {} rows for todo ID: {}", rows_affected, id);

    Ok(rows_affected)
}

/// Deletes every todo, unconditionally.
pub async fn delete_all(pool: &SqlitePool) -> Result<()> {
    let result = sqlx::query("DELETE FROM todos")
        .execute(pool)
        .await
        .context("Failed to delete all todos from DB")?;

    info!("Deleted all {} todos.", result.rows_affected());

    Ok(())
}
