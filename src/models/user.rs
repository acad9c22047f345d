//! User model and role/status enums
//!
//! Authentication lives in the upstream gateway; the engine only needs the
//! user's identity, activity status and role rank for eligibility checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// User role, ordered by privilege rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Default,
    Librarian,
    Admin,
}

impl UserRole {
    /// Numeric privilege rank. Comparisons between roles must go through
    /// this value, never through the textual representation.
    pub fn rank(&self) -> i32 {
        match self {
            UserRole::Default => 0,
            UserRole::Librarian => 99,
            UserRole::Admin => 999,
        }
    }

    pub fn at_least(&self, other: UserRole) -> bool {
        self.rank() >= other.rank()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::Default => "default",
            UserRole::Librarian => "librarian",
            UserRole::Admin => "admin",
        };
        write!(f, "{}", label)
    }
}

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Deactivated,
    Blacklisted,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserStatus::Active => "active",
            UserStatus::Deactivated => "deactivated",
            UserStatus::Blacklisted => "blacklisted",
        };
        write!(f, "{}", label)
    }
}

/// User model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub library_card_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_rank_is_ordered() {
        assert!(UserRole::Admin.rank() > UserRole::Librarian.rank());
        assert!(UserRole::Librarian.rank() > UserRole::Default.rank());
    }

    #[test]
    fn at_least_compares_ranks() {
        assert!(UserRole::Admin.at_least(UserRole::Librarian));
        assert!(UserRole::Librarian.at_least(UserRole::Librarian));
        assert!(!UserRole::Default.at_least(UserRole::Librarian));
    }
}
