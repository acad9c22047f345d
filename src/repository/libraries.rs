//! Libraries and racks repository for database operations
//!
//! Library/rack CRUD lives elsewhere; the engine reads them to validate
//! copy placement.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::library::{Library, Rack},
};

#[derive(Clone)]
pub struct LibrariesRepository {
    pool: Pool<Postgres>,
}

impl LibrariesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get library by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Library> {
        sqlx::query_as::<_, Library>(
            "SELECT id, name, description, created_at, updated_at FROM libraries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Library with id {} not found", id)))
    }

    /// Get rack by ID
    pub async fn get_rack_by_id(&self, id: i32) -> AppResult<Rack> {
        sqlx::query_as::<_, Rack>(
            "SELECT id, library_id, name, created_at, updated_at FROM racks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rack with id {} not found", id)))
    }
}
