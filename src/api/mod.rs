//! API handlers for the circulation REST endpoints

pub mod book_items;
pub mod health;
pub mod lendings;
pub mod openapi;
pub mod reservations;
pub mod system_config;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, AppState};

/// Acting principal for mutating calls.
///
/// Authentication and role checks happen in the upstream gateway, which
/// forwards the authenticated user id in the `x-user-id` header. The engine
/// still re-validates whatever eligibility it owns (target user active,
/// librarian rank for on-behalf reservations).
pub struct Principal(pub i32);

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing x-user-id header".to_string()))?;

        let user_id = header
            .parse::<i32>()
            .map_err(|_| AppError::Authentication("Invalid x-user-id header".to_string()))?;

        Ok(Principal(user_id))
    }
}
