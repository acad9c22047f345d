//! Lending (loan) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Lending model from database.
///
/// `fee` stays null while the lending is outstanding and is frozen at
/// completion time; list/get responses populate a projected fee for overdue
/// outstanding lendings without persisting it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lending {
    pub id: i32,
    pub user_id: i32,
    pub book_item_id: i32,
    pub reservation_id: Option<i32>,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub fee: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create lending request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLending {
    pub user_id: i32,
    pub book_item_id: i32,
}

/// List filters for lendings
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LendingQuery {
    pub user_id: Option<i32>,
    pub book_item_id: Option<i32>,
    pub reservation_id: Option<i32>,
    /// Only lendings due strictly before this date
    pub due_by: Option<NaiveDate>,
    /// true: returned only; false: outstanding only
    pub returned: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Paginated lending listing
#[derive(Debug, Serialize, ToSchema)]
pub struct LendingList {
    pub lendings: Vec<Lending>,
    pub lendings_count: i64,
}
