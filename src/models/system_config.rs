//! System configuration (singleton row)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Process-wide circulation parameters. Exactly one row exists, seeded by
/// the initial migration; read by the lending and reservation managers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SystemConfig {
    pub id: i32,
    /// Days a fulfilled reservation waits to be picked up
    pub reservation_due_day: i32,
    /// Loan duration in days
    pub lending_due_day: i32,
    /// Per-day overdue charge
    #[schema(value_type = f64)]
    pub lending_daily_fee: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full-replacement update, administrator action only
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSystemConfig {
    #[validate(range(min = 1, max = 365))]
    pub reservation_due_day: i32,
    #[validate(range(min = 1, max = 365))]
    pub lending_due_day: i32,
    #[schema(value_type = f64)]
    pub lending_daily_fee: Decimal,
}
