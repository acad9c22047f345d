//! Reservation model and lifecycle status
//!
//! Lifecycle: `pending` (no copy attached) -> `waiting` (copy attached, due
//! date set) -> `completed` (converted into a lending). `cancelled` is
//! reachable from `pending` and `waiting`. Terminal states keep their
//! attached copy and due date as a historical record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Waiting,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Cancelled | ReservationStatus::Completed)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Waiting => "waiting",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        };
        write!(f, "{}", label)
    }
}

/// Reservation model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub book_id: i32,
    pub library_id: i32,
    pub user_id: i32,
    pub status: ReservationStatus,
    pub book_item_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create reservation request. `user_id` defaults to the requesting
/// principal; reserving on someone else's behalf requires librarian rank.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservation {
    pub book_id: i32,
    pub library_id: i32,
    pub user_id: Option<i32>,
}

/// List filters for reservations
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReservationQuery {
    pub book_id: Option<i32>,
    pub book_item_id: Option<i32>,
    pub library_id: Option<i32>,
    pub user_id: Option<i32>,
    pub status: Option<ReservationStatus>,
    /// Only reservations due strictly before this date
    pub due_by: Option<NaiveDate>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Paginated reservation listing
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationList {
    pub reservations: Vec<Reservation>,
    pub reservations_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!ReservationStatus::Pending.is_terminal());
        assert!(!ReservationStatus::Waiting.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(ReservationStatus::Completed.is_terminal());
    }
}
