//! Inventory ledger service
//!
//! Owns creation and field updates of book items. Lifecycle transitions to
//! `reserved`/`loaned` are not validated here; the lending and reservation
//! managers enforce which transitions are legal and issue them atomically.

use crate::{
    error::{AppError, AppResult},
    models::book_item::{
        BookItem, BookItemQuery, BookItemStatus, CreateBookItem, UpdateBookItem,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get book item by ID
    pub async fn get_book_item(&self, id: i32) -> AppResult<BookItem> {
        self.repository.book_items.get_by_id(id).await
    }

    /// Get book item by barcode
    pub async fn get_book_item_by_barcode(&self, barcode: &str) -> AppResult<BookItem> {
        self.repository.book_items.get_by_barcode(barcode).await
    }

    /// List book items with pagination
    pub async fn list_book_items(&self, query: &BookItemQuery) -> AppResult<(Vec<BookItem>, i64)> {
        self.repository.book_items.list(query).await
    }

    /// Create a copy bound to a book and a library
    pub async fn create_book_item(&self, request: CreateBookItem) -> AppResult<BookItem> {
        self.repository.books.get_by_id(request.book_id).await?;

        if self.repository.book_items.barcode_exists(&request.barcode, None).await? {
            return Err(AppError::Conflict(format!(
                "Barcode {} already exists",
                request.barcode
            )));
        }

        self.repository.libraries.get_by_id(request.library_id).await?;
        if let Some(rack_id) = request.rack_id {
            self.check_rack_placement(rack_id, Some(request.library_id)).await?;
        }

        let item = BookItem {
            id: 0,
            barcode: request.barcode,
            condition: request.condition,
            status: request.status.map(Into::into).unwrap_or(BookItemStatus::Available),
            book_id: request.book_id,
            library_id: Some(request.library_id),
            rack_id: request.rack_id,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        self.repository.book_items.create(&item).await
    }

    /// Update any subset of {barcode, condition, status, library, rack} as a
    /// single atomic write. Only manual statuses come through this path.
    pub async fn update_book_item(&self, id: i32, update: UpdateBookItem) -> AppResult<BookItem> {
        let mut item = self.repository.book_items.get_by_id(id).await?;

        if let Some(ref barcode) = update.barcode {
            if *barcode != item.barcode
                && self.repository.book_items.barcode_exists(barcode, Some(id)).await?
            {
                return Err(AppError::Conflict(format!("Barcode {} already exists", barcode)));
            }
            item.barcode = barcode.clone();
        }
        if let Some(library_id) = update.library_id {
            if item.library_id != Some(library_id) {
                self.repository.libraries.get_by_id(library_id).await?;
            }
            item.library_id = Some(library_id);
        }
        if let Some(rack_id) = update.rack_id {
            self.check_rack_placement(rack_id, item.library_id).await?;
            item.rack_id = Some(rack_id);
        }
        if let Some(condition) = update.condition {
            item.condition = condition;
        }
        if let Some(status) = update.status {
            item.status = status.into();
        }

        self.repository.book_items.update(&item).await
    }

    /// Delete a copy; refused while an open reservation or outstanding
    /// lending still references it.
    pub async fn delete_book_item(&self, id: i32) -> AppResult<()> {
        self.repository.book_items.get_by_id(id).await?;

        if self.repository.book_items.has_open_references(id).await? {
            return Err(AppError::InvalidState(
                "Book item is referenced by an open reservation or lending".to_string(),
            ));
        }

        self.repository.book_items.delete(id).await
    }

    /// A rack must exist and must sit in the same library as the copy.
    async fn check_rack_placement(&self, rack_id: i32, library_id: Option<i32>) -> AppResult<()> {
        let rack = self.repository.libraries.get_rack_by_id(rack_id).await?;
        if Some(rack.library_id) != library_id {
            return Err(AppError::Conflict(
                "Given rack does not belong to book item library".to_string(),
            ));
        }
        Ok(())
    }
}
