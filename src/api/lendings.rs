//! Lending endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::lending::{CreateLending, Lending, LendingList, LendingQuery},
    AppState,
};

use super::Principal;

/// List lendings
#[utoipa::path(
    get,
    path = "/lendings",
    tag = "lendings",
    params(LendingQuery),
    responses(
        (status = 200, description = "Paginated lendings with fees populated", body = LendingList)
    )
)]
pub async fn list_lendings(
    State(state): State<AppState>,
    Query(query): Query<LendingQuery>,
) -> AppResult<Json<LendingList>> {
    let (lendings, lendings_count) = state.services.lendings.list_lendings(&query).await?;
    Ok(Json(LendingList {
        lendings,
        lendings_count,
    }))
}

/// Get a lending by ID
#[utoipa::path(
    get,
    path = "/lendings/{id}",
    tag = "lendings",
    params(("id" = i32, Path, description = "Lending ID")),
    responses(
        (status = 200, description = "Lending with fee populated", body = Lending),
        (status = 404, description = "Lending not found")
    )
)]
pub async fn get_lending(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Lending>> {
    Ok(Json(state.services.lendings.get_lending(id).await?))
}

/// Lend a copy directly to a user
#[utoipa::path(
    post,
    path = "/lendings",
    tag = "lendings",
    request_body = CreateLending,
    responses(
        (status = 201, description = "Lending created", body = Lending),
        (status = 404, description = "User or book item not found"),
        (status = 409, description = "Copy claimed by a concurrent request"),
        (status = 422, description = "User inactive or copy unavailable")
    )
)]
pub async fn create_lending(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
    Json(request): Json<CreateLending>,
) -> AppResult<(StatusCode, Json<Lending>)> {
    let lending = state.services.lendings.create_lending(request).await?;
    Ok((StatusCode::CREATED, Json(lending)))
}

/// Complete (return) a lending
#[utoipa::path(
    put,
    path = "/lendings/{id}/complete",
    tag = "lendings",
    params(("id" = i32, Path, description = "Lending ID")),
    responses(
        (status = 200, description = "Lending completed, fee frozen", body = Lending),
        (status = 404, description = "Lending not found"),
        (status = 422, description = "Lending already completed")
    )
)]
pub async fn complete_lending(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
    Path(id): Path<i32>,
) -> AppResult<Json<Lending>> {
    Ok(Json(state.services.lendings.complete_lending(id).await?))
}
