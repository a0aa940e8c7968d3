use std::fmt;

use thiserror::Error;

/// Which half of an address failed to resolve against the reference catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressPart {
    Province,
    Municipality,
}

impl fmt::Display for AddressPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Province => write!(f, "Province"),
            Self::Municipality => write!(f, "Municipality"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("{part} {name} not found")]
    AddressNotFound { part: AddressPart, name: String },

    #[error("Address reference unavailable: {0}")]
    AddressUnavailable(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn user_not_found(username: &str) -> Self {
        Self::NotFound {
            entity: "User",
            field: "username",
            value: username.to_string(),
        }
    }

    /// Whether the failure was caused by the caller's input rather than
    /// by a collaborator.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_) | Self::AddressUnavailable(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
