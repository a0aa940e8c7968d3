//! Credential ports: hashing, authentication and token issuance
//!
//! The identity service only sees these traits; bcrypt and JWT live in
//! `infrastructure::crypto`.

use async_trait::async_trait;

use crate::domain::{DomainResult, UserRole};

// ── PasswordHasher ─────────────────────────────────────────────

/// One-way password encoding.
pub trait PasswordHasher: Send + Sync {
    fn encode(&self, plaintext: &str) -> DomainResult<String>;

    /// `false` on mismatch and on malformed hashes alike.
    fn matches(&self, plaintext: &str, hash: &str) -> bool;
}

// ── Authenticator ──────────────────────────────────────────────

/// Identity established by a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

/// Verifies a username/password pair.
///
/// Any rejection is reported as
/// [`DomainError::Unauthorized`](crate::domain::DomainError::Unauthorized).
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> DomainResult<AuthenticatedPrincipal>;
}

// ── TokenIssuer ────────────────────────────────────────────────

/// Bearer token handed back to the caller after login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, principal: &AuthenticatedPrincipal) -> DomainResult<IssuedToken>;
}
