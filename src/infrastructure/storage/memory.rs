//! In-memory user storage for development and testing

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{DomainError, DomainResult, User, UserRepositoryInterface};

/// Users keyed by id, tagged with an insertion sequence so that
/// `find_all` returns them in insertion order.
pub struct InMemoryUserRepository {
    users: DashMap<String, (u64, User)>,
    sequence: AtomicU64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            sequence: AtomicU64::new(1),
        }
    }

    fn username_taken_by_other(&self, username: &str, id: &str) -> bool {
        self.users
            .iter()
            .any(|e| e.value().1.username == username && e.key() != id)
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|e| e.value().1.username == username)
            .map(|e| e.value().1.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut entries: Vec<(u64, User)> =
            self.users.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, u)| u).collect())
    }

    async fn insert(&self, user: User) -> DomainResult<()> {
        if self.username_taken_by_other(&user.username, &user.id) || self.users.contains_key(&user.id)
        {
            return Err(DomainError::Conflict(format!(
                "User {} is already registered",
                user.username
            )));
        }
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.users.insert(user.id.clone(), (seq, user));
        Ok(())
    }

    async fn save(&self, user: User) -> DomainResult<()> {
        if self.username_taken_by_other(&user.username, &user.id) {
            return Err(DomainError::Conflict(format!(
                "User {} is already registered",
                user.username
            )));
        }
        match self.users.get_mut(&user.id) {
            Some(mut entry) => {
                entry.value_mut().1 = user;
                Ok(())
            }
            None => Err(DomainError::user_not_found(&user.username)),
        }
    }

    async fn delete(&self, user: &User) -> DomainResult<()> {
        self.users
            .remove(&user.id)
            .map(|_| ())
            .ok_or_else(|| DomainError::user_not_found(&user.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_user;

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let repo = InMemoryUserRepository::new();
        for name in ["zoe", "adam", "mia"] {
            repo.insert(sample_user(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["zoe", "adam", "mia"]);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample_user("ana")).await.unwrap();

        let mut clash = sample_user("ana");
        clash.id = "another-id".into();
        let err = repo.insert(clash).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_replaces_in_place_and_keeps_position() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample_user("ana")).await.unwrap();
        repo.insert(sample_user("bob")).await.unwrap();

        let mut renamed = sample_user("ana");
        renamed.username = "anna".into();
        repo.save(renamed).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all[0].username, "anna");
        assert_eq!(all[0].id, "id-ana");
        assert!(repo.find_by_username("ana").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_rejects_taking_another_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample_user("ana")).await.unwrap();
        repo.insert(sample_user("bob")).await.unwrap();

        let mut clash = sample_user("ana");
        clash.username = "bob".into();

        assert!(matches!(repo.save(clash).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.delete(&sample_user("ghost")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
