//! Lendings repository for database operations
//!
//! Every multi-step mutation runs inside one transaction. Copy status
//! transitions are compare-and-swap updates guarded on the expected current
//! status; a swap that touches zero rows means another transaction won the
//! race and the whole operation rolls back.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::lending::{Lending, LendingQuery},
    services::fees,
};

const LENDING_COLUMNS: &str =
    "id, user_id, book_item_id, reservation_id, due_date, return_date, fee, created_at, updated_at";

/// Insert a lending row with `due_date = today + lending_due_day`.
///
/// Shared between direct lending creation and reservation completion, which
/// both call it from inside an already-open transaction.
pub(crate) async fn insert_lending(
    conn: &mut PgConnection,
    user_id: i32,
    book_item_id: i32,
    reservation_id: Option<i32>,
) -> AppResult<Lending> {
    let lending = sqlx::query_as::<_, Lending>(&format!(
        r#"
        INSERT INTO lendings (user_id, book_item_id, reservation_id, due_date)
        VALUES ($1, $2, $3, current_date + (SELECT lending_due_day FROM system_config))
        RETURNING {}
        "#,
        LENDING_COLUMNS
    ))
    .bind(user_id)
    .bind(book_item_id)
    .bind(reservation_id)
    .fetch_one(conn)
    .await?;

    Ok(lending)
}

/// Compare-and-swap a copy status inside a transaction. Returns false when
/// the copy was not in the expected status anymore.
pub(crate) async fn swap_item_status(
    conn: &mut PgConnection,
    book_item_id: i32,
    expected: crate::models::BookItemStatus,
    new: crate::models::BookItemStatus,
) -> AppResult<bool> {
    let result = sqlx::query("UPDATE book_items SET status = $3 WHERE id = $1 AND status = $2")
        .bind(book_item_id)
        .bind(expected)
        .bind(new)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() == 1)
}

#[derive(Clone)]
pub struct LendingsRepository {
    pool: Pool<Postgres>,
}

impl LendingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get lending by ID, with its frozen or projected fee populated
    pub async fn get_by_id(&self, id: i32) -> AppResult<Lending> {
        let lending = sqlx::query_as::<_, Lending>(&format!(
            "SELECT {} FROM lendings WHERE id = $1",
            LENDING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lending with id {} not found", id)))?;

        self.populate_fee(lending).await
    }

    /// Create a lending: the copy goes available -> loaned and the lending
    /// row is inserted, atomically. Eligibility (user active, copy available)
    /// is pre-checked by the service; the swap below is what holds under
    /// concurrent requests.
    pub async fn create(
        &self,
        user_id: i32,
        book_item_id: i32,
        reservation_id: Option<i32>,
    ) -> AppResult<Lending> {
        let mut tx = self.pool.begin().await?;

        let claimed = swap_item_status(
            &mut tx,
            book_item_id,
            crate::models::BookItemStatus::Available,
            crate::models::BookItemStatus::Loaned,
        )
        .await?;
        if !claimed {
            return Err(AppError::Conflict(format!(
                "Book item {} is no longer available",
                book_item_id
            )));
        }

        let lending = insert_lending(&mut tx, user_id, book_item_id, reservation_id).await?;

        tx.commit().await?;
        Ok(lending)
    }

    /// Complete a lending: freeze the fee, stamp the return date and release
    /// the copy, all in one transaction. Completing twice fails and leaves
    /// the frozen fee untouched.
    pub async fn complete(&self, id: i32) -> AppResult<Lending> {
        let mut tx = self.pool.begin().await?;

        let lending = sqlx::query_as::<_, Lending>(&format!(
            "SELECT {} FROM lendings WHERE id = $1 FOR UPDATE",
            LENDING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lending with id {} not found", id)))?;

        if lending.return_date.is_some() {
            return Err(AppError::InvalidState("Lending is already completed".to_string()));
        }

        let today = Utc::now().date_naive();

        // A fee already recorded is never recomputed or decreased.
        let fee = match lending.fee {
            Some(fee) => fee,
            None => {
                let daily_fee: Decimal =
                    sqlx::query_scalar("SELECT lending_daily_fee FROM system_config")
                        .fetch_one(&mut *tx)
                        .await?;
                fees::overdue_fee(lending.due_date, today, daily_fee)
            }
        };

        let completed = sqlx::query_as::<_, Lending>(&format!(
            r#"
            UPDATE lendings
            SET return_date = $2, fee = $3
            WHERE id = $1 AND return_date IS NULL
            RETURNING {}
            "#,
            LENDING_COLUMNS
        ))
        .bind(id)
        .bind(today)
        .bind(fee)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::InvalidState("Lending is already completed".to_string()))?;

        // Lost or written-off copies stay out of circulation on return.
        swap_item_status(
            &mut tx,
            lending.book_item_id,
            crate::models::BookItemStatus::Loaned,
            crate::models::BookItemStatus::Available,
        )
        .await?;

        tx.commit().await?;
        Ok(completed)
    }

    /// List lendings with pagination, fees populated, plus total count
    pub async fn list(&self, query: &LendingQuery) -> AppResult<(Vec<Lending>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = vec!["1=1".to_string()];

        if let Some(user_id) = query.user_id {
            conditions.push(format!("user_id = {}", user_id));
        }
        if let Some(book_item_id) = query.book_item_id {
            conditions.push(format!("book_item_id = {}", book_item_id));
        }
        if let Some(reservation_id) = query.reservation_id {
            conditions.push(format!("reservation_id = {}", reservation_id));
        }
        if let Some(due_by) = query.due_by {
            conditions.push(format!("due_date < '{}'", due_by.format("%Y-%m-%d")));
        }
        if let Some(returned) = query.returned {
            conditions.push(format!(
                "return_date IS {} NULL",
                if returned { "NOT" } else { "" }
            ));
        }

        let sql = format!(
            r#"
            SELECT {}, count(*) OVER() AS query_count
            FROM lendings
            WHERE {}
            ORDER BY id
            LIMIT {} OFFSET {}
            "#,
            LENDING_COLUMNS,
            conditions.join(" AND "),
            per_page,
            offset
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let total = rows
            .first()
            .map(|r| r.get::<i64, _>("query_count"))
            .unwrap_or(0);

        let mut lendings = Vec::with_capacity(rows.len());
        for row in &rows {
            let lending = Lending {
                id: row.get("id"),
                user_id: row.get("user_id"),
                book_item_id: row.get("book_item_id"),
                reservation_id: row.get("reservation_id"),
                due_date: row.get("due_date"),
                return_date: row.get("return_date"),
                fee: row.get("fee"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            };
            lendings.push(self.populate_fee(lending).await?);
        }

        Ok((lendings, total))
    }

    /// Populate the fee for display: frozen fees pass through unchanged,
    /// outstanding overdue lendings get a projection that is not persisted.
    async fn populate_fee(&self, mut lending: Lending) -> AppResult<Lending> {
        if lending.fee.is_some() {
            return Ok(lending);
        }

        let today = Utc::now().date_naive();
        if today > lending.due_date {
            let daily_fee: Decimal =
                sqlx::query_scalar("SELECT lending_daily_fee FROM system_config")
                    .fetch_one(&self.pool)
                    .await?;
            lending.fee = Some(fees::overdue_fee(lending.due_date, today, daily_fee));
        }

        Ok(lending)
    }
}
