//! Inventory (book item) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::book_item::{BookItem, BookItemList, BookItemQuery, CreateBookItem, UpdateBookItem},
    AppState,
};

use super::Principal;

/// List book items
#[utoipa::path(
    get,
    path = "/book-items",
    tag = "book-items",
    params(BookItemQuery),
    responses(
        (status = 200, description = "Paginated book items", body = BookItemList)
    )
)]
pub async fn list_book_items(
    State(state): State<AppState>,
    Query(query): Query<BookItemQuery>,
) -> AppResult<Json<BookItemList>> {
    let (book_items, book_items_count) = state.services.inventory.list_book_items(&query).await?;
    Ok(Json(BookItemList {
        book_items,
        book_items_count,
    }))
}

/// Get a book item by ID
#[utoipa::path(
    get,
    path = "/book-items/{id}",
    tag = "book-items",
    params(("id" = i32, Path, description = "Book item ID")),
    responses(
        (status = 200, description = "Book item", body = BookItem),
        (status = 404, description = "Book item not found")
    )
)]
pub async fn get_book_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookItem>> {
    Ok(Json(state.services.inventory.get_book_item(id).await?))
}

/// Create a book item
#[utoipa::path(
    post,
    path = "/book-items",
    tag = "book-items",
    request_body = CreateBookItem,
    responses(
        (status = 201, description = "Book item created", body = BookItem),
        (status = 404, description = "Book, library or rack not found"),
        (status = 409, description = "Duplicate barcode or rack/library mismatch")
    )
)]
pub async fn create_book_item(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
    Json(request): Json<CreateBookItem>,
) -> AppResult<(StatusCode, Json<BookItem>)> {
    request.validate()?;
    let item = state.services.inventory.create_book_item(request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update a book item
#[utoipa::path(
    put,
    path = "/book-items/{id}",
    tag = "book-items",
    params(("id" = i32, Path, description = "Book item ID")),
    request_body = UpdateBookItem,
    responses(
        (status = 200, description = "Book item updated", body = BookItem),
        (status = 404, description = "Book item, library or rack not found"),
        (status = 409, description = "Duplicate barcode or rack/library mismatch")
    )
)]
pub async fn update_book_item(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBookItem>,
) -> AppResult<Json<BookItem>> {
    request.validate()?;
    Ok(Json(state.services.inventory.update_book_item(id, request).await?))
}

/// Delete a book item
#[utoipa::path(
    delete,
    path = "/book-items/{id}",
    tag = "book-items",
    params(("id" = i32, Path, description = "Book item ID")),
    responses(
        (status = 204, description = "Book item deleted"),
        (status = 404, description = "Book item not found"),
        (status = 422, description = "Open reservation or lending references the copy")
    )
)]
pub async fn delete_book_item(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.inventory.delete_book_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
