//! User domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::DomainError;

/// User role. Parsed case-sensitively from `"USER"` / `"ADMIN"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    User,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// Postal address as submitted by the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub province: String,
    pub municipality: String,
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: UserRole,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The only projection of a user that ever leaves the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUserView {
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for PublicUserView {
    fn from(u: &User) -> Self {
        Self {
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role,
        }
    }
}

impl From<User> for PublicUserView {
    fn from(u: User) -> Self {
        Self {
            username: u.username,
            email: u.email,
            role: u.role,
        }
    }
}
