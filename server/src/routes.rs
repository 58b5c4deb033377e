// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::handlers;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;

/// Creates and configures the application router.
pub fn create_router(pool: SqlitePool) -> Router {
    Router::new()
        // Associates the `GET /api/todos` route with the `list_todos` handler
        .route("/api/todos", get(handlers::list_todos))
        // Associates the `POST /api/todos` route with the `create_todo` handler
        .route("/api/todos", post(handlers::create_todo))
        // Associates the `DELETE /api/todos` route with the `delete_all_todos` handler
        .route("/api/todos", delete(handlers::delete_all_todos))
        // Associates the `GET /api/todos/{id}` route with the `get_todo` handler
        .route("/api/todos/{id}", get(handlers::get_todo))
        // Associates the `PUT /api/todos/{id}` route with the `update_todo` handler
        .route("/api/todos/{id}", put(handlers::update_todo))
        // Associates the `DELETE /api/todos/{id}` route with the `delete_todo` handler
        .route("/api/todos/{id}", delete(handlers::delete_todo))
        // Adds the database pool to the application state
        .with_state(pool)
}
