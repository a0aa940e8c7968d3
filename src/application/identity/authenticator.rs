//! Username/password authentication against the user store

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    AuthenticatedPrincipal, Authenticator, DomainError, DomainResult, PasswordHasher,
    UserRepositoryInterface,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// [`Authenticator`] backed by the user repository and a password hasher.
///
/// Unknown users and wrong passwords produce the same error.
pub struct RepositoryAuthenticator {
    repo: Arc<dyn UserRepositoryInterface>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RepositoryAuthenticator {
    pub fn new(repo: Arc<dyn UserRepositoryInterface>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repo, hasher }
    }
}

#[async_trait]
impl Authenticator for RepositoryAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> DomainResult<AuthenticatedPrincipal> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !self.hasher.matches(password, &user.password_hash) {
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        Ok(AuthenticatedPrincipal {
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}
