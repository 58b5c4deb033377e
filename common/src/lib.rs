// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a todo item within the system.
///
/// Derivation attributes (derive):
/// - `Serialize`, `Deserialize`: Allows conversion to/from JSON.
/// - `Debug`: Enables displaying the structure for debugging (e.g., `println!("{:?}", todo)`).
/// - `Clone`: Allows creating copies of the object.
/// - `sqlx::FromRow`: Allows `sqlx` to create a `Todo` instance directly
///    from a database result row.
///
/// JSON field names are camelCase (`createdAt`, `updatedAt`); the database
/// columns stay snake_case, hence the explicit `sqlx` renames.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "title")]
    pub title: String,

    #[sqlx(rename = "completed")]
    pub completed: bool,

    // Set once at creation, never mutated afterwards.
    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    // Refreshed on every successful update.
    #[sqlx(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

/// Structure used to receive todo creation data from the API.
/// It's a good practice to separate database models (`Todo`)
/// from API models (`CreateTodoPayload`), as they may have different fields.
#[derive(Deserialize, Debug)]
pub struct CreateTodoPayload {
    // Optional so that a request without a title reaches the handler's
    // own validation (400) instead of a deserialization rejection.
    pub title: Option<String>,
}

/// Structure used to receive todo update data from the API.
/// Each field is independently optional: a missing field leaves the
/// stored value unchanged, a present field overwrites it.
#[derive(Deserialize, Debug)]
pub struct UpdateTodoPayload {
    pub title: Option<String>,
    pub completed: Option<bool>,
}
