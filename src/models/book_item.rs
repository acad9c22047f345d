//! Book item (physical copy) model and related types
//!
//! The item status is the single source of truth for whether a copy can be
//! reserved or loaned. `Reserved` and `Loaned` are only ever set by the
//! reservation/lending managers; callers of the inventory API may only pick
//! one of the manual statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Physical condition of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "book_item_condition", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookItemCondition {
    LikeNew,
    Good,
    Bad,
}

impl std::fmt::Display for BookItemCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookItemCondition::LikeNew => "like_new",
            BookItemCondition::Good => "good",
            BookItemCondition::Bad => "bad",
        };
        write!(f, "{}", label)
    }
}

/// Full copy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "book_item_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookItemStatus {
    Available,
    Reserved,
    Loaned,
    Lost,
    WrittenOff,
}

impl BookItemStatus {
    /// Lost and written-off copies are out of circulation: releasing a
    /// reservation or a lending must not touch them.
    pub fn is_out_of_circulation(&self) -> bool {
        matches!(self, BookItemStatus::Lost | BookItemStatus::WrittenOff)
    }
}

impl std::fmt::Display for BookItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookItemStatus::Available => "available",
            BookItemStatus::Reserved => "reserved",
            BookItemStatus::Loaned => "loaned",
            BookItemStatus::Lost => "lost",
            BookItemStatus::WrittenOff => "written_off",
        };
        write!(f, "{}", label)
    }
}

/// Subset of statuses settable through the inventory API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookItemManualStatus {
    Available,
    Lost,
    WrittenOff,
}

impl From<BookItemManualStatus> for BookItemStatus {
    fn from(s: BookItemManualStatus) -> Self {
        match s {
            BookItemManualStatus::Available => BookItemStatus::Available,
            BookItemManualStatus::Lost => BookItemStatus::Lost,
            BookItemManualStatus::WrittenOff => BookItemStatus::WrittenOff,
        }
    }
}

/// Book item model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookItem {
    pub id: i32,
    pub barcode: String,
    pub condition: BookItemCondition,
    pub status: BookItemStatus,
    pub book_id: i32,
    pub library_id: Option<i32>,
    pub rack_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookItem {
    pub book_id: i32,
    #[validate(length(min = 1, max = 64))]
    pub barcode: String,
    pub condition: BookItemCondition,
    pub library_id: i32,
    pub rack_id: Option<i32>,
    /// Defaults to `available`
    pub status: Option<BookItemManualStatus>,
}

/// Partial update; unset fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBookItem {
    #[validate(length(min = 1, max = 64))]
    pub barcode: Option<String>,
    pub condition: Option<BookItemCondition>,
    pub status: Option<BookItemManualStatus>,
    pub library_id: Option<i32>,
    pub rack_id: Option<i32>,
}

/// List filters for book items
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookItemQuery {
    pub book_id: Option<i32>,
    pub library_id: Option<i32>,
    pub rack_id: Option<i32>,
    pub status: Option<BookItemStatus>,
    pub condition: Option<BookItemCondition>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Paginated book item listing
#[derive(Debug, Serialize, ToSchema)]
pub struct BookItemList {
    pub book_items: Vec<BookItem>,
    pub book_items_count: i64,
}
