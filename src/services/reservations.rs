//! Reservation manager service
//!
//! State machine: pending -> waiting -> completed, with cancellation legal
//! from pending and waiting. The repository enforces the transitions inside
//! transactions; this layer validates the actors and referenced entities and
//! drives the expiry sweep.

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        lending::Lending,
        reservation::{CreateReservation, Reservation, ReservationQuery},
        user::UserRole,
    },
    repository::Repository,
};

/// Result of one expiry sweep run
#[derive(Debug, Default, Clone, Copy, Serialize, ToSchema)]
pub struct SweepOutcome {
    pub cancelled: u32,
    pub failed: u32,
}

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get reservation by ID
    pub async fn get_reservation(&self, id: i32) -> AppResult<Reservation> {
        self.repository.reservations.get_by_id(id).await
    }

    /// List reservations with pagination
    pub async fn list_reservations(
        &self,
        query: &ReservationQuery,
    ) -> AppResult<(Vec<Reservation>, i64)> {
        self.repository.reservations.list(query).await
    }

    /// Place a reservation for a book at a library. Reserving on someone
    /// else's behalf requires librarian rank; the target user must exist and
    /// be active either way.
    pub async fn create_reservation(
        &self,
        request: CreateReservation,
        requesting_user_id: i32,
    ) -> AppResult<Reservation> {
        let requesting_user = self.repository.users.get_by_id(requesting_user_id).await?;
        let user_id = request.user_id.unwrap_or(requesting_user_id);

        if user_id != requesting_user_id {
            if !requesting_user.role.at_least(UserRole::Librarian) {
                return Err(AppError::Authorization(
                    "Reserving for another user requires librarian rank".to_string(),
                ));
            }
            let target = self.repository.users.get_by_id(user_id).await?;
            if !target.is_active() {
                return Err(AppError::InvalidState("Given user is not active".to_string()));
            }
        } else if !requesting_user.is_active() {
            return Err(AppError::InvalidState("Given user is not active".to_string()));
        }

        self.repository.libraries.get_by_id(request.library_id).await?;
        self.repository.books.get_by_id(request.book_id).await?;

        self.repository
            .reservations
            .create(request.book_id, request.library_id, user_id)
            .await
    }

    /// Attach an available copy to a pending reservation
    pub async fn fulfill_reservation(&self, id: i32, book_item_id: i32) -> AppResult<Reservation> {
        self.repository.reservations.fulfill(id, book_item_id).await
    }

    /// Cancel a pending or waiting reservation, releasing its copy
    pub async fn cancel_reservation(&self, id: i32) -> AppResult<Reservation> {
        self.repository.reservations.cancel(id).await
    }

    /// Convert a waiting reservation into a lending
    pub async fn complete_reservation(&self, id: i32) -> AppResult<Lending> {
        self.repository.reservations.complete(id).await
    }

    /// Cancel every waiting reservation whose pickup window has lapsed.
    ///
    /// Each cancellation is its own transaction; one failure is logged and
    /// does not abort the rest of the batch.
    pub async fn cancel_due_reservations(&self) -> AppResult<SweepOutcome> {
        let today = Utc::now().date_naive();
        let due = self.repository.reservations.list_due(today).await?;

        let mut outcome = SweepOutcome::default();
        for reservation in due {
            match self.repository.reservations.cancel(reservation.id).await {
                Ok(_) => {
                    tracing::debug!(reservation_id = reservation.id, "Cancelled overdue reservation");
                    outcome.cancelled += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        reservation_id = reservation.id,
                        "Failed to cancel overdue reservation: {}",
                        e
                    );
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }
}
