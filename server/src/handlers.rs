// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::service;
use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use common::{CreateTodoPayload, Todo, UpdateTodoPayload};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

/// Handler for listing all todos.
pub async fn list_todos(
    State(pool): State<SqlitePool>, // State injection (DB pool)
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = service::find_all(&pool).await?;
    info!("Successfully retrieved {} todos.", todos.len());
    Ok(Json(todos))
}

/// Handler for fetching a single todo by ID.
pub async fn get_todo(
    State(pool): State<SqlitePool>,
    Path(todo_id): Path<i64>, // Extract todo ID from the URL path
) -> Result<Json<Todo>, AppError> {
    debug!("Received request to fetch todo with ID: {}", todo_id);

    match service::find_by_id(&pool, todo_id).await? {
        Some(todo) => Ok(Json(todo)),
        None => {
            error!("Todo with ID {} not found.", todo_id);
            Err(AppError::new(
                StatusCode::NOT_FOUND,
                &format!("Todo with ID {} not found.", todo_id),
            ))
        }
    }
}

/// Handler for creating a new todo.
///
/// The payload is optional at the extractor level so that an absent
/// request body lands in our own validation (400) rather than a
/// framework rejection.
pub async fn create_todo(
    State(pool): State<SqlitePool>,
    payload: Option<Json<CreateTodoPayload>>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Todo>), AppError> {
    debug!("Received request to create todo: {:?}", payload);

    // Validate the payload: the title must be present and non-blank.
    let title = match payload.and_then(|Json(p)| p.title) {
        Some(title) if !title.trim().is_empty() => title,
        _ => {
            error!("Validation failed: Todo title is missing or blank.");
            return Err(AppError::new(
                StatusCode::BAD_REQUEST,
                "Todo title cannot be empty.",
            ));
        }
    };

    let new_todo = service::create(&pool, title).await?;

    info!("Todo created successfully with ID: {}", new_todo.id);

    // Return a 201 Created status with the new todo as JSON and a
    // Location header pointing at the new resource.
    let location = format!("/api/todos/{}", new_todo.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(new_todo),
    ))
}

/// Handler for updating an existing todo.
/// Fields absent from the payload are left unchanged.
pub async fn update_todo(
    State(pool): State<SqlitePool>,
    Path(todo_id): Path<i64>,
    Json(payload): Json<UpdateTodoPayload>,
) -> Result<Json<Todo>, AppError> {
    debug!(
        "Received request to update todo {}: title={:?}, completed={:?}",
        todo_id, payload.title, payload.completed
    );

    match service::update(&pool, todo_id, payload.title, payload.completed).await? {
        Some(todo) => {
            info!("Todo with ID {} updated successfully.", todo_id);
            Ok(Json(todo))
        }
        None => {
            error!("Todo with ID {} not found for update.", todo_id);
            Err(AppError::new(
                StatusCode::NOT_FOUND,
                &format!("Todo with ID {} not found for update.", todo_id),
            ))
        }
    }
}

/// Handler for deleting a todo by ID.
pub async fn delete_todo(
    State(pool): State<SqlitePool>,
    Path(todo_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Attempting to delete todo with ID: {}", todo_id);

    let deleted = service::delete(&pool, todo_id).await?;

    if deleted {
        info!("Todo with ID {} deleted successfully.", todo_id);
        Ok(StatusCode::NO_CONTENT) // 204 No Content for successful deletion
    } else {
        error!("Todo with ID {} not found for deletion.", todo_id);
        Err(AppError::new(
            StatusCode::NOT_FOUND,
            &format!("Todo with ID {} not found for deletion.", todo_id),
        ))
    }
}

/// Handler for deleting every todo, unconditionally.
pub async fn delete_all_todos(State(pool): State<SqlitePool>) -> Result<StatusCode, AppError> {
    debug!("Received request to delete all todos.");

    service::delete_all(&pool).await?;

    info!("All todos deleted.");

    Ok(StatusCode::NO_CONTENT)
}

// --- Custom Error Handling ---
// This is a good practice for transforming our internal errors
// (e.g., from the database) into appropriate HTTP responses.

/// Our custom error type for the application.
/// The message is only logged; error responses carry an empty body.
pub struct AppError {
    code: StatusCode,
    message: String,
}

impl AppError {
    fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}

/// Allows converting an `anyhow::Error` (coming from `db.rs`)
/// into our `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Log the internal error for debugging.
        tracing::error!("Internal server error: {:?}", err);
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred.".to_string(),
        }
    }
}

/// Allows Axum to convert our `AppError` into an HTTP `Response`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            "Responding with error: status_code={}, message={}",
            self.code.as_u16(),
            self.message
        );
        self.code.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;

    // Helper to create a payload for tests
    fn create_test_payload(title: Option<&str>) -> Json<CreateTodoPayload> {
        Json(CreateTodoPayload {
            title: title.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_create_todo_validation_missing_title() {
        // Arrange
        // We can use an empty pool because the validation fails before any DB access.
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = create_test_payload(None);

        // Act
        let result = create_todo(State(pool), Some(payload)).await;

        // Assert
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Todo title cannot be empty.");
    }

    #[tokio::test]
    async fn test_create_todo_validation_blank_title() {
        // Arrange
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = create_test_payload(Some("   "));

        // Act
        let result = create_todo(State(pool), Some(payload)).await;

        // Assert
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_todo_validation_absent_body() {
        // Arrange
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();

        // Act: No payload at all
        let result = create_todo(State(pool), None).await;

        // Assert
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
    }
}
