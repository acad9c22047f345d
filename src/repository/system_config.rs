//! System configuration repository
//!
//! The table holds exactly one row, seeded by the initial migration.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::system_config::{SystemConfig, UpdateSystemConfig},
};

const CONFIG_COLUMNS: &str =
    "id, reservation_due_day, lending_due_day, lending_daily_fee, created_at, updated_at";

#[derive(Clone)]
pub struct SystemConfigRepository {
    pool: Pool<Postgres>,
}

impl SystemConfigRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the singleton configuration row
    pub async fn get(&self) -> AppResult<SystemConfig> {
        sqlx::query_as::<_, SystemConfig>(&format!(
            "SELECT {} FROM system_config",
            CONFIG_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Internal("System configuration row is missing".to_string()))
    }

    /// Replace the configuration values
    pub async fn update(&self, update: &UpdateSystemConfig) -> AppResult<SystemConfig> {
        let config = sqlx::query_as::<_, SystemConfig>(&format!(
            r#"
            UPDATE system_config
            SET reservation_due_day = $1,
                lending_due_day = $2,
                lending_daily_fee = $3
            RETURNING {}
            "#,
            CONFIG_COLUMNS
        ))
        .bind(update.reservation_due_day)
        .bind(update.lending_due_day)
        .bind(update.lending_daily_fee)
        .fetch_one(&self.pool)
        .await?;

        Ok(config)
    }
}
