//! System configuration service

use crate::{
    error::{AppError, AppResult},
    models::{
        system_config::{SystemConfig, UpdateSystemConfig},
        user::UserRole,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SystemConfigService {
    repository: Repository,
}

impl SystemConfigService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get current circulation parameters
    pub async fn get_config(&self) -> AppResult<SystemConfig> {
        self.repository.system_config.get().await
    }

    /// Replace circulation parameters. Config mutation is the one operation
    /// the engine gates on rank itself rather than trusting the gateway.
    pub async fn update_config(
        &self,
        update: UpdateSystemConfig,
        acting_user_id: i32,
    ) -> AppResult<SystemConfig> {
        let user = self.repository.users.get_by_id(acting_user_id).await?;
        if !user.role.at_least(UserRole::Admin) {
            return Err(AppError::Authorization(
                "Updating system configuration requires admin rank".to_string(),
            ));
        }

        self.repository.system_config.update(&update).await
    }
}
