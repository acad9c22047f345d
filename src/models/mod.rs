//! Data models for the circulation engine

pub mod book;
pub mod book_item;
pub mod lending;
pub mod library;
pub mod reservation;
pub mod system_config;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use book_item::{BookItem, BookItemCondition, BookItemStatus};
pub use lending::Lending;
pub use library::{Library, Rack};
pub use reservation::{Reservation, ReservationStatus};
pub use system_config::SystemConfig;
pub use user::{User, UserRole, UserStatus};
