//! System configuration endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::system_config::{SystemConfig, UpdateSystemConfig},
    AppState,
};

use super::Principal;

/// Get circulation parameters
#[utoipa::path(
    get,
    path = "/system-config",
    tag = "system-config",
    responses(
        (status = 200, description = "Current configuration", body = SystemConfig)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> AppResult<Json<SystemConfig>> {
    Ok(Json(state.services.system_config.get_config().await?))
}

/// Update circulation parameters (admin only)
#[utoipa::path(
    put,
    path = "/system-config",
    tag = "system-config",
    request_body = UpdateSystemConfig,
    responses(
        (status = 200, description = "Updated configuration", body = SystemConfig),
        (status = 400, description = "Out-of-range values"),
        (status = 403, description = "Caller is not an administrator")
    )
)]
pub async fn update_config(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    Json(request): Json<UpdateSystemConfig>,
) -> AppResult<Json<SystemConfig>> {
    request.validate()?;
    Ok(Json(
        state
            .services
            .system_config
            .update_config(request, user_id)
            .await?,
    ))
}
