//! Repository layer for database operations

pub mod book_items;
pub mod books;
pub mod lendings;
pub mod libraries;
pub mod reservations;
pub mod system_config;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub book_items: book_items::BookItemsRepository,
    pub books: books::BooksRepository,
    pub lendings: lendings::LendingsRepository,
    pub libraries: libraries::LibrariesRepository,
    pub reservations: reservations::ReservationsRepository,
    pub system_config: system_config::SystemConfigRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            book_items: book_items::BookItemsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            lendings: lendings::LendingsRepository::new(pool.clone()),
            libraries: libraries::LibrariesRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            system_config: system_config::SystemConfigRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
