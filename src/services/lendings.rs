//! Lending manager service

use crate::{
    error::{AppError, AppResult},
    models::{
        book_item::BookItemStatus,
        lending::{CreateLending, Lending, LendingQuery},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingsService {
    repository: Repository,
}

impl LendingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend an available copy directly to an active user. The final
    /// available -> loaned claim is a compare-and-swap inside the repository
    /// transaction; the checks here give precise errors on the common paths.
    pub async fn create_lending(&self, request: CreateLending) -> AppResult<Lending> {
        let user = self.repository.users.get_by_id(request.user_id).await?;
        if !user.is_active() {
            return Err(AppError::InvalidState("Given user is not active".to_string()));
        }

        let book_item = self.repository.book_items.get_by_id(request.book_item_id).await?;
        if book_item.status != BookItemStatus::Available {
            return Err(AppError::InvalidState("Given book item is unavailable".to_string()));
        }

        self.repository
            .lendings
            .create(request.user_id, request.book_item_id, None)
            .await
    }

    /// Close a lending: freezes the fee and stamps the return date
    pub async fn complete_lending(&self, id: i32) -> AppResult<Lending> {
        self.repository.lendings.complete(id).await
    }

    /// Get lending by ID, fee populated
    pub async fn get_lending(&self, id: i32) -> AppResult<Lending> {
        self.repository.lendings.get_by_id(id).await
    }

    /// List lendings with pagination, fees populated
    pub async fn list_lendings(&self, query: &LendingQuery) -> AppResult<(Vec<Lending>, i64)> {
        self.repository.lendings.list(query).await
    }
}
