//! Business logic services

pub mod fees;
pub mod inventory;
pub mod lendings;
pub mod reservations;
pub mod sweep;
pub mod system_config;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub inventory: inventory::InventoryService,
    pub lendings: lendings::LendingsService,
    pub reservations: reservations::ReservationsService,
    pub system_config: system_config::SystemConfigService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            inventory: inventory::InventoryService::new(repository.clone()),
            lendings: lendings::LendingsService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone()),
            system_config: system_config::SystemConfigService::new(repository),
        }
    }
}
