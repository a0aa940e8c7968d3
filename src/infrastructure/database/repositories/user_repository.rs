use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{
    Address, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;
use crate::shared::InfraError;

/// [`UserRepositoryInterface`] backed by the `users` table.
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::User => UserRole::User,
        user::UserRole::Admin => UserRole::Admin,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::User => user::UserRole::User,
        UserRole::Admin => user::UserRole::Admin,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        email: model.email,
        role: entity_role_to_domain(model.role),
        address: Address {
            province: model.province,
            municipality: model.municipality,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: DbErr) -> DomainError {
    InfraError::Database(e).into()
}

/// UNIQUE violations become conflicts on the username, everything else
/// is an internal failure.
fn write_err(username: &str, e: DbErr) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        DomainError::Conflict(format!("User {} is already registered", username))
    } else {
        db_err(e)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn insert(&self, u: User) -> DomainResult<()> {
        let username = u.username.clone();
        let new_user = user::ActiveModel {
            id: Set(u.id),
            username: Set(u.username),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            role: Set(domain_role_to_entity(u.role)),
            province: Set(u.address.province),
            municipality: Set(u.address.municipality),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
        };

        new_user
            .insert(&self.db)
            .await
            .map_err(|e| write_err(&username, e))?;

        Ok(())
    }

    async fn save(&self, u: User) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(u.id.clone())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::user_not_found(&u.username));
        };

        let username = u.username.clone();
        let mut active: user::ActiveModel = existing.into();
        active.username = Set(u.username);
        active.email = Set(u.email);
        active.password_hash = Set(u.password_hash);
        active.role = Set(domain_role_to_entity(u.role));
        active.province = Set(u.address.province);
        active.municipality = Set(u.address.municipality);
        active.updated_at = Set(u.updated_at);

        active
            .update(&self.db)
            .await
            .map_err(|e| write_err(&username, e))?;

        Ok(())
    }

    async fn delete(&self, u: &User) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(u.id.clone())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::user_not_found(&u.username));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use crate::test_support::sample_user;

    async fn repository() -> SeaOrmUserRepository {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmUserRepository::new(db)
    }

    #[tokio::test]
    async fn insert_then_find_by_username() {
        let repo = repository().await;
        let mut ana = sample_user("ana");
        ana.role = UserRole::Admin;
        ana.address.municipality = "Getafe".into();
        repo.insert(ana).await.unwrap();

        let found = repo.find_by_username("ana").await.unwrap().unwrap();
        assert_eq!(found.id, "id-ana");
        assert_eq!(found.role, UserRole::Admin);
        assert_eq!(found.address.municipality, "Getafe");
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = repository().await;
        repo.insert(sample_user("ana")).await.unwrap();

        let mut clash = sample_user("ana");
        clash.id = "another-id".into();

        let err = repo.insert(clash).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_all_follows_registration_order() {
        let repo = repository().await;
        let base = Utc::now();
        for (i, name) in ["zoe", "adam", "mia"].into_iter().enumerate() {
            let mut u = sample_user(name);
            u.created_at = base + Duration::seconds(i as i64);
            repo.insert(u).await.unwrap();
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
    async fn save_can_rename_but_not_onto_another_user() {
        let repo = repository().await;
        repo.insert(sample_user("ana")).await.unwrap();
        repo.insert(sample_user("bob")).await.unwrap();

        let mut renamed = sample_user("ana");
        renamed.username = "anna".into();
        repo.save(renamed).await.unwrap();
        assert!(repo.find_by_username("ana").await.unwrap().is_none());
        assert_eq!(
            repo.find_by_username("anna").await.unwrap().unwrap().id,
            "id-ana"
        );

        let mut clash = sample_user("ana");
        clash.username = "bob".into();
        assert!(matches!(
            repo.save(clash).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn save_and_delete_unknown_user_are_not_found() {
        let repo = repository().await;
        let ghost = sample_user("ghost");

        assert!(matches!(
            repo.save(ghost.clone()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(&ghost).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let repo = repository().await;
        let ana = sample_user("ana");
        repo.insert(ana.clone()).await.unwrap();

        repo.delete(&ana).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
