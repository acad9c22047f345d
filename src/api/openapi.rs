//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{book_items, health, lendings, reservations, system_config};
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Circulation API",
        version = "0.3.0",
        description = "Library circulation backend - lending and reservation lifecycle engine",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Book items
        book_items::list_book_items,
        book_items::get_book_item,
        book_items::create_book_item,
        book_items::update_book_item,
        book_items::delete_book_item,
        // Lendings
        lendings::list_lendings,
        lendings::get_lending,
        lendings::create_lending,
        lendings::complete_lending,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
        reservations::fulfill_reservation,
        reservations::cancel_reservation,
        reservations::complete_reservation,
        reservations::run_expiry_sweep,
        // System config
        system_config::get_config,
        system_config::update_config,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        health::HealthResponse,
        models::book_item::BookItem,
        models::book_item::BookItemCondition,
        models::book_item::BookItemStatus,
        models::book_item::BookItemManualStatus,
        models::book_item::BookItemList,
        models::book_item::CreateBookItem,
        models::book_item::UpdateBookItem,
        models::lending::Lending,
        models::lending::LendingList,
        models::lending::CreateLending,
        models::reservation::Reservation,
        models::reservation::ReservationStatus,
        models::reservation::ReservationList,
        models::reservation::CreateReservation,
        models::system_config::SystemConfig,
        models::system_config::UpdateSystemConfig,
        crate::services::reservations::SweepOutcome,
    ))
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
