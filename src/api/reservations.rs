//! Reservation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{
        lending::Lending,
        reservation::{CreateReservation, Reservation, ReservationList, ReservationQuery},
    },
    services::reservations::SweepOutcome,
    AppState,
};

use super::Principal;

#[derive(Deserialize, IntoParams)]
pub struct FulfillParams {
    /// Copy to attach to the reservation
    pub book_item_id: i32,
}

/// List reservations
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    params(ReservationQuery),
    responses(
        (status = 200, description = "Paginated reservations", body = ReservationList)
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<ReservationList>> {
    let (reservations, reservations_count) =
        state.services.reservations.list_reservations(&query).await?;
    Ok(Json(ReservationList {
        reservations,
        reservations_count,
    }))
}

/// Get a reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.services.reservations.get_reservation(id).await?))
}

/// Create a reservation
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created as pending", body = Reservation),
        (status = 403, description = "On-behalf reservation without librarian rank"),
        (status = 404, description = "User, book or library not found"),
        (status = 422, description = "Target user inactive")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    Json(request): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state
        .services
        .reservations
        .create_reservation(request, user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Fulfill a reservation with an available copy
#[utoipa::path(
    put,
    path = "/reservations/{id}/fulfill",
    tag = "reservations",
    params(
        ("id" = i32, Path, description = "Reservation ID"),
        FulfillParams
    ),
    responses(
        (status = 200, description = "Reservation now waiting for pickup", body = Reservation),
        (status = 404, description = "Reservation or book item not found"),
        (status = 409, description = "Copy claimed by a concurrent request"),
        (status = 422, description = "Reservation not pending, copy unavailable or wrong library")
    )
)]
pub async fn fulfill_reservation(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
    Path(id): Path<i32>,
    Query(params): Query<FulfillParams>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(
        state
            .services
            .reservations
            .fulfill_reservation(id, params.book_item_id)
            .await?,
    ))
}

/// Cancel a reservation
#[utoipa::path(
    put,
    path = "/reservations/{id}/cancel",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled, copy released", body = Reservation),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Reservation already cancelled or completed")
    )
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.services.reservations.cancel_reservation(id).await?))
}

/// Complete a reservation, converting it into a lending
#[utoipa::path(
    put,
    path = "/reservations/{id}/complete",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Created lending", body = Lending),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Copy changed status concurrently"),
        (status = 422, description = "Reservation terminal or copy out of circulation")
    )
)]
pub async fn complete_reservation(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
    Path(id): Path<i32>,
) -> AppResult<Json<Lending>> {
    Ok(Json(state.services.reservations.complete_reservation(id).await?))
}

/// Run the expiry sweep immediately instead of waiting for the scheduler
#[utoipa::path(
    post,
    path = "/reservations/sweep",
    tag = "reservations",
    responses(
        (status = 200, description = "Sweep finished", body = SweepOutcome)
    )
)]
pub async fn run_expiry_sweep(
    State(state): State<AppState>,
    Principal(_user_id): Principal,
) -> AppResult<Json<SweepOutcome>> {
    Ok(Json(state.services.reservations.cancel_due_reservations().await?))
}
