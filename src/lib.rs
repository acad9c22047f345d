//! Library Circulation Engine
//!
//! Backend for the lending/reservation lifecycle of physical book copies
//! across library branches: copy inventory, reservations (pending -> waiting
//! -> completed/cancelled), lendings with overdue fees, and the scheduled
//! expiry sweep. Exposed as a REST JSON API behind an authenticating gateway.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
