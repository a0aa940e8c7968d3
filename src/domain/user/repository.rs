use async_trait::async_trait;

use super::User;
use crate::domain::DomainResult;

/// Persistence port for user records, keyed by username.
///
/// Implementations enforce username uniqueness themselves: `insert` and
/// `save` report a clash as [`DomainError::Conflict`](crate::domain::DomainError::Conflict).
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// All records in insertion order.
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    async fn insert(&self, user: User) -> DomainResult<()>;

    /// Replace the stored record with the same `id`.
    async fn save(&self, user: User) -> DomainResult<()>;

    async fn delete(&self, user: &User) -> DomainResult<()>;
}
