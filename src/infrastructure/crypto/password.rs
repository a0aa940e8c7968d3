//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::domain::{DomainResult, PasswordHasher};
use crate::shared::InfraError;

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// bcrypt-backed [`PasswordHasher`]
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn encode(&self, plaintext: &str) -> DomainResult<String> {
        hash_password(plaintext, self.cost)
            .map_err(|e| InfraError::Crypto(format!("Failed to hash password: {}", e)).into())
    }

    fn matches(&self, plaintext: &str, hash: &str) -> bool {
        verify_password(plaintext, hash).unwrap_or(false)
    }
}
