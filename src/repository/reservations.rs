//! Reservations repository for database operations
//!
//! Lifecycle mutations lock the reservation row (`SELECT ... FOR UPDATE`) and
//! move the attached copy with compare-and-swap status updates, all inside a
//! single transaction. Concurrent fulfillment of the same copy, or a sweep
//! racing an interactive call, resolves to exactly one winner; the loser
//! observes a stale status and fails cleanly.

use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book_item::{BookItem, BookItemStatus},
        lending::Lending,
        reservation::{Reservation, ReservationQuery, ReservationStatus},
    },
    repository::lendings::{insert_lending, swap_item_status},
};

const RESERVATION_COLUMNS: &str =
    "id, book_id, library_id, user_id, status, book_item_id, due_date, created_at, updated_at";

async fn lock_reservation(conn: &mut PgConnection, id: i32) -> AppResult<Reservation> {
    sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {} FROM reservations WHERE id = $1 FOR UPDATE",
        RESERVATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
}

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservations WHERE id = $1",
            RESERVATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Insert a new pending reservation (no copy, no due date)
    pub async fn create(&self, book_id: i32, library_id: i32, user_id: i32) -> AppResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            INSERT INTO reservations (book_id, library_id, user_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(book_id)
        .bind(library_id)
        .bind(user_id)
        .bind(ReservationStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Fulfill a pending reservation with an available copy from the
    /// reservation's library. The copy goes available -> reserved and the
    /// reservation goes waiting with its pickup due date, atomically; a
    /// reader never observes `waiting` without an attached reserved copy.
    pub async fn fulfill(&self, id: i32, book_item_id: i32) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let reservation = lock_reservation(&mut tx, id).await?;

        if reservation.status != ReservationStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "Reservation is already {}",
                reservation.status
            )));
        }
        if reservation.book_item_id.is_some() {
            return Err(AppError::InvalidState("Reservation is already fulfilled".to_string()));
        }

        let book_item = sqlx::query_as::<_, BookItem>(
            "SELECT id, barcode, condition, status, book_id, library_id, rack_id, created_at, updated_at FROM book_items WHERE id = $1",
        )
        .bind(book_item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book item with id {} not found", book_item_id)))?;

        if book_item.status != BookItemStatus::Available {
            return Err(AppError::InvalidState("Given book item is unavailable".to_string()));
        }
        if book_item.library_id != Some(reservation.library_id) {
            return Err(AppError::InvalidState(
                "Given book item does not belong to reservation library".to_string(),
            ));
        }

        let claimed = swap_item_status(
            &mut tx,
            book_item_id,
            BookItemStatus::Available,
            BookItemStatus::Reserved,
        )
        .await?;
        if !claimed {
            return Err(AppError::Conflict(format!(
                "Book item {} was claimed by a concurrent request",
                book_item_id
            )));
        }

        let fulfilled = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            UPDATE reservations
            SET book_item_id = $2,
                status = $3,
                due_date = current_date + (SELECT reservation_due_day FROM system_config)
            WHERE id = $1 AND status = $4
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(id)
        .bind(book_item_id)
        .bind(ReservationStatus::Waiting)
        .bind(ReservationStatus::Pending)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::InvalidState("Reservation is no longer pending".to_string()))?;

        tx.commit().await?;
        Ok(fulfilled)
    }

    /// Cancel a pending or waiting reservation. The attached copy (if any) is
    /// released back to available unless it is lost or written off; the
    /// copy reference and due date stay on the record for history.
    pub async fn cancel(&self, id: i32) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let reservation = lock_reservation(&mut tx, id).await?;

        if reservation.status.is_terminal() {
            return Err(AppError::InvalidState(format!(
                "Reservation is already {}",
                reservation.status
            )));
        }

        if let Some(book_item_id) = reservation.book_item_id {
            sqlx::query(
                "UPDATE book_items SET status = $2 WHERE id = $1 AND status NOT IN ('lost', 'written_off')",
            )
            .bind(book_item_id)
            .bind(BookItemStatus::Available)
            .execute(&mut *tx)
            .await?;
        }

        let cancelled = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            UPDATE reservations
            SET status = $2
            WHERE id = $1 AND status = $3
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(id)
        .bind(ReservationStatus::Cancelled)
        .bind(reservation.status)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::InvalidState("Reservation status changed concurrently".to_string()))?;

        tx.commit().await?;
        Ok(cancelled)
    }

    /// Complete a waiting reservation: the attached copy goes
    /// reserved -> loaned, the reservation is closed and a lending referencing
    /// it is created, all in one transaction. Returns the new lending.
    pub async fn complete(&self, id: i32) -> AppResult<Lending> {
        let mut tx = self.pool.begin().await?;

        let reservation = lock_reservation(&mut tx, id).await?;

        if reservation.status.is_terminal() {
            return Err(AppError::InvalidState(format!(
                "Reservation is already {}",
                reservation.status
            )));
        }

        let book_item_id = reservation
            .book_item_id
            .ok_or_else(|| AppError::InvalidState("Reserved book item is unavailable".to_string()))?;

        let item_status: Option<BookItemStatus> =
            sqlx::query_scalar("SELECT status FROM book_items WHERE id = $1")
                .bind(book_item_id)
                .fetch_optional(&mut *tx)
                .await?;

        match item_status {
            None => {
                return Err(AppError::InvalidState("Reserved book item is unavailable".to_string()))
            }
            Some(status) if status.is_out_of_circulation() => {
                return Err(AppError::InvalidState("Reserved book item is unavailable".to_string()))
            }
            Some(_) => {}
        }

        let claimed = swap_item_status(
            &mut tx,
            book_item_id,
            BookItemStatus::Reserved,
            BookItemStatus::Loaned,
        )
        .await?;
        if !claimed {
            return Err(AppError::Conflict(format!(
                "Book item {} changed status concurrently",
                book_item_id
            )));
        }

        sqlx::query("UPDATE reservations SET status = $2 WHERE id = $1 AND status = $3")
            .bind(id)
            .bind(ReservationStatus::Completed)
            .bind(reservation.status)
            .execute(&mut *tx)
            .await?;

        let lending = insert_lending(&mut tx, reservation.user_id, book_item_id, Some(id)).await?;

        tx.commit().await?;
        Ok(lending)
    }

    /// List reservations with pagination, returning items plus total count
    pub async fn list(&self, query: &ReservationQuery) -> AppResult<(Vec<Reservation>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = vec!["1=1".to_string()];

        if let Some(book_id) = query.book_id {
            conditions.push(format!("book_id = {}", book_id));
        }
        if let Some(book_item_id) = query.book_item_id {
            conditions.push(format!("book_item_id = {}", book_item_id));
        }
        if let Some(library_id) = query.library_id {
            conditions.push(format!("library_id = {}", library_id));
        }
        if let Some(user_id) = query.user_id {
            conditions.push(format!("user_id = {}", user_id));
        }
        if let Some(status) = query.status {
            conditions.push(format!("status = '{}'", status));
        }
        if let Some(due_by) = query.due_by {
            conditions.push(format!("due_date < '{}'", due_by.format("%Y-%m-%d")));
        }

        let sql = format!(
            r#"
            SELECT {}, count(*) OVER() AS query_count
            FROM reservations
            WHERE {}
            ORDER BY id
            LIMIT {} OFFSET {}
            "#,
            RESERVATION_COLUMNS,
            conditions.join(" AND "),
            per_page,
            offset
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let total = rows
            .first()
            .map(|r| r.get::<i64, _>("query_count"))
            .unwrap_or(0);

        let reservations = rows
            .iter()
            .map(|row| Reservation {
                id: row.get("id"),
                book_id: row.get("book_id"),
                library_id: row.get("library_id"),
                user_id: row.get("user_id"),
                status: row.get("status"),
                book_item_id: row.get("book_item_id"),
                due_date: row.get("due_date"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            })
            .collect();

        Ok((reservations, total))
    }

    /// All waiting reservations whose pickup window has lapsed
    pub async fn list_due(&self, as_of: NaiveDate) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservations WHERE status = $1 AND due_date <= $2 ORDER BY id",
            RESERVATION_COLUMNS
        ))
        .bind(ReservationStatus::Waiting)
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }
}
