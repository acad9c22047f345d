//! Library and rack models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Library {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A shelf location inside a library. A rack always belongs to exactly one
/// library; copies placed on a rack must sit in the same library.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rack {
    pub id: i32,
    pub library_id: i32,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
