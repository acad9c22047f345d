//! Book items repository for database operations
//!
//! Every mutation is a single atomic statement; lifecycle transitions issued
//! by the lending/reservation repositories run as compare-and-swap updates
//! inside their own transactions.

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::book_item::{BookItem, BookItemQuery},
};

const BOOK_ITEM_COLUMNS: &str =
    "id, barcode, condition, status, book_id, library_id, rack_id, created_at, updated_at";

#[derive(Clone)]
pub struct BookItemsRepository {
    pool: Pool<Postgres>,
}

impl BookItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book item by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookItem> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book item with id {} not found", id)))
    }

    /// Get book item by ID, None on miss
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<BookItem>> {
        let item = sqlx::query_as::<_, BookItem>(&format!(
            "SELECT {} FROM book_items WHERE id = $1",
            BOOK_ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Get book item by barcode
    pub async fn get_by_barcode(&self, barcode: &str) -> AppResult<BookItem> {
        sqlx::query_as::<_, BookItem>(&format!(
            "SELECT {} FROM book_items WHERE barcode = $1",
            BOOK_ITEM_COLUMNS
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book item with barcode {} not found", barcode)))
    }

    /// Check if a barcode is already taken by another item
    pub async fn barcode_exists(&self, barcode: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book_items WHERE barcode = $1 AND id != $2)")
                .bind(barcode)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book_items WHERE barcode = $1)")
                .bind(barcode)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Insert a new book item
    pub async fn create(&self, item: &BookItem) -> AppResult<BookItem> {
        let created = sqlx::query_as::<_, BookItem>(&format!(
            r#"
            INSERT INTO book_items (barcode, condition, status, book_id, library_id, rack_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_ITEM_COLUMNS
        ))
        .bind(&item.barcode)
        .bind(item.condition)
        .bind(item.status)
        .bind(item.book_id)
        .bind(item.library_id)
        .bind(item.rack_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Write back a merged record in a single atomic update
    pub async fn update(&self, item: &BookItem) -> AppResult<BookItem> {
        let updated = sqlx::query_as::<_, BookItem>(&format!(
            r#"
            UPDATE book_items
            SET barcode = $2, condition = $3, status = $4, library_id = $5, rack_id = $6
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_ITEM_COLUMNS
        ))
        .bind(item.id)
        .bind(&item.barcode)
        .bind(item.condition)
        .bind(item.status)
        .bind(item.library_id)
        .bind(item.rack_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book item with id {} not found", item.id)))?;

        Ok(updated)
    }

    /// List book items with pagination, returning items plus total count
    pub async fn list(&self, query: &BookItemQuery) -> AppResult<(Vec<BookItem>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = vec!["1=1".to_string()];

        if let Some(book_id) = query.book_id {
            conditions.push(format!("book_id = {}", book_id));
        }
        if let Some(library_id) = query.library_id {
            conditions.push(format!("library_id = {}", library_id));
        }
        if let Some(rack_id) = query.rack_id {
            conditions.push(format!("rack_id = {}", rack_id));
        }
        if let Some(status) = query.status {
            conditions.push(format!("status = '{}'", status));
        }
        if let Some(condition) = query.condition {
            conditions.push(format!("condition = '{}'", condition));
        }

        let sql = format!(
            r#"
            SELECT {}, count(*) OVER() AS query_count
            FROM book_items
            WHERE {}
            ORDER BY id
            LIMIT {} OFFSET {}
            "#,
            BOOK_ITEM_COLUMNS,
            conditions.join(" AND "),
            per_page,
            offset
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let total = rows
            .first()
            .map(|r| r.get::<i64, _>("query_count"))
            .unwrap_or(0);

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(BookItem {
                id: row.get("id"),
                barcode: row.get("barcode"),
                condition: row.get("condition"),
                status: row.get("status"),
                book_id: row.get("book_id"),
                library_id: row.get("library_id"),
                rack_id: row.get("rack_id"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            });
        }

        Ok((items, total))
    }

    /// True when an open reservation or outstanding lending references the copy
    pub async fn has_open_references(&self, id: i32) -> AppResult<bool> {
        let referenced: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE book_item_id = $1 AND status IN ('pending', 'waiting')
            ) OR EXISTS(
                SELECT 1 FROM lendings
                WHERE book_item_id = $1 AND return_date IS NULL
            )
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(referenced)
    }

    /// Delete a book item
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book item with id {} not found", id)));
        }
        Ok(())
    }
}
