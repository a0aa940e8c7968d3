//! Registration validation pipeline
//!
//! Checks run in a fixed order and stop at the first failure:
//! presence → uniqueness → password confirmation → role → province →
//! municipality. Only when every check passes is the password hashed and
//! a [`User`] built. Nothing is written to the store here.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::address::AddressResolver;
use crate::domain::{
    DomainError, DomainResult, PasswordHasher, RegisterUserDto, User, UserRepositoryInterface,
    UserRole,
};

pub struct RegistrationValidator {
    repo: Arc<dyn UserRepositoryInterface>,
    hasher: Arc<dyn PasswordHasher>,
    resolver: AddressResolver,
}

impl RegistrationValidator {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        hasher: Arc<dyn PasswordHasher>,
        resolver: AddressResolver,
    ) -> Self {
        Self {
            repo,
            hasher,
            resolver,
        }
    }

    /// Validate a registration and build the record to insert.
    pub async fn validate_and_build(&self, dto: &RegisterUserDto) -> DomainResult<User> {
        self.run(dto, None).await
    }

    /// Validate a full replacement of `current`.
    ///
    /// Same pipeline as registration, except that the uniqueness check only
    /// applies when the username changes. The record keeps its id and
    /// creation time.
    pub async fn validate_replacement(
        &self,
        current: &User,
        dto: &RegisterUserDto,
    ) -> DomainResult<User> {
        self.run(dto, Some(current)).await
    }

    async fn run(&self, dto: &RegisterUserDto, current: Option<&User>) -> DomainResult<User> {
        check_presence(dto)?;
        self.check_unique(&dto.username, current).await?;
        check_passwords(dto)?;
        let role = parse_role(dto.role.as_deref())?;

        let resolved = self.resolver.resolve(&dto.address).await?;
        debug!(
            username = %dto.username,
            province_code = ?resolved.province_code,
            municipality_checked = resolved.municipality_checked,
            "Address accepted"
        );

        let password_hash = self.hasher.encode(&dto.password)?;
        let now = Utc::now();

        Ok(User {
            id: current
                .map(|u| u.id.clone())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            username: dto.username.clone(),
            password_hash,
            email: dto.email.clone(),
            role,
            address: dto.address.clone(),
            created_at: current.map_or(now, |u| u.created_at),
            updated_at: now,
        })
    }

    async fn check_unique(&self, username: &str, current: Option<&User>) -> DomainResult<()> {
        if current.is_some_and(|u| u.username == username) {
            return Ok(());
        }
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "User {} is already registered",
                username
            )));
        }
        Ok(())
    }
}

fn check_presence(dto: &RegisterUserDto) -> DomainResult<()> {
    let fields = [
        ("username", &dto.username),
        ("email", &dto.email),
        ("password", &dto.password),
        ("passwordConfirmation", &dto.password_confirmation),
    ];
    match fields.into_iter().find(|(_, v)| v.trim().is_empty()) {
        Some((name, _)) => Err(DomainError::MissingField(name)),
        None => Ok(()),
    }
}

fn check_passwords(dto: &RegisterUserDto) -> DomainResult<()> {
    if dto.password != dto.password_confirmation {
        return Err(DomainError::PasswordMismatch);
    }
    Ok(())
}

/// Absent role defaults to `USER`.
fn parse_role(role: Option<&str>) -> DomainResult<UserRole> {
    role.map_or(Ok(UserRole::default()), |r| r.parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::address::UnavailablePolicy;
    use crate::domain::{Address, AddressPart};
    use crate::infrastructure::storage::InMemoryUserRepository;
    use crate::test_support::{ana_request, sample_user, PlainHasher, StaticAddressProvider};

    fn validator_with(
        repo: Arc<InMemoryUserRepository>,
        provider: StaticAddressProvider,
        policy: UnavailablePolicy,
    ) -> RegistrationValidator {
        RegistrationValidator::new(
            repo,
            Arc::new(PlainHasher),
            AddressResolver::new(Arc::new(provider), policy),
        )
    }

    fn validator(repo: Arc<InMemoryUserRepository>) -> RegistrationValidator {
        validator_with(
            repo,
            StaticAddressProvider::spain_sample(),
            UnavailablePolicy::Reject,
        )
    }

    #[tokio::test]
    async fn builds_user_for_valid_request() {
        let v = validator(Arc::new(InMemoryUserRepository::new()));

        let user = v.validate_and_build(&ana_request()).await.unwrap();

        assert_eq!(user.username, "ana");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.password_hash, "plain:p1");
        assert!(!user.id.is_empty());
    }

    #[tokio::test]
    async fn every_blank_field_is_reported() {
        let v = validator(Arc::new(InMemoryUserRepository::new()));
        let cases: [(&str, fn(&mut RegisterUserDto)); 4] = [
            ("username", |d| d.username = "  ".into()),
            ("email", |d| d.email.clear()),
            ("password", |d| d.password = "\t".into()),
            ("passwordConfirmation", |d| d.password_confirmation.clear()),
        ];

        for (field, blank) in cases {
            let mut dto = ana_request();
            blank(&mut dto);
            let err = v.validate_and_build(&dto).await.unwrap_err();
            assert!(
                matches!(err, DomainError::MissingField(f) if f == field),
                "expected MissingField({}), got {:?}",
                field,
                err
            );
        }
    }

    #[tokio::test]
    async fn existing_username_conflicts() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.insert(sample_user("ana")).await.unwrap();
        let v = validator(repo.clone());

        let err = v.validate_and_build(&ana_request()).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn uniqueness_is_checked_before_password_match() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.insert(sample_user("ana")).await.unwrap();
        let v = validator(repo);
        let mut dto = ana_request();
        dto.password_confirmation = "p2".into();

        let err = v.validate_and_build(&dto).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn password_confirmation_is_case_sensitive() {
        let v = validator(Arc::new(InMemoryUserRepository::new()));
        let mut dto = ana_request();
        dto.password = "Secret".into();
        dto.password_confirmation = "secret".into();

        let err = v.validate_and_build(&dto).await.unwrap_err();
        assert!(matches!(err, DomainError::PasswordMismatch));
    }

    #[tokio::test]
    async fn roles_outside_whitelist_are_rejected() {
        let v = validator(Arc::new(InMemoryUserRepository::new()));

        for bad in ["admin", "SUPERUSER", ""] {
            let mut dto = ana_request();
            dto.role = Some(bad.into());
            let err = v.validate_and_build(&dto).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidRole(r) if r == bad));
        }
    }

    #[tokio::test]
    async fn absent_role_defaults_to_user_and_admin_is_kept() {
        let v = validator(Arc::new(InMemoryUserRepository::new()));

        let mut dto = ana_request();
        dto.role = None;
        assert_eq!(v.validate_and_build(&dto).await.unwrap().role, UserRole::User);

        dto.role = Some("ADMIN".into());
        assert_eq!(v.validate_and_build(&dto).await.unwrap().role, UserRole::Admin);
    }

    #[tokio::test]
    async fn role_is_checked_before_address() {
        let v = validator(Arc::new(InMemoryUserRepository::new()));
        let mut dto = ana_request();
        dto.role = Some("GUEST".into());
        dto.address.province = "Narnia".into();

        let err = v.validate_and_build(&dto).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidRole(_)));
    }

    #[tokio::test]
    async fn unknown_province_is_rejected() {
        let v = validator(Arc::new(InMemoryUserRepository::new()));
        let mut dto = ana_request();
        dto.address = Address {
            province: "Gondor".into(),
            municipality: "Minas Tirith".into(),
        };

        let err = v.validate_and_build(&dto).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::AddressNotFound { part: AddressPart::Province, .. }
        ));
    }

    #[tokio::test]
    async fn skip_policy_accepts_address_when_catalogue_is_down() {
        let v = validator_with(
            Arc::new(InMemoryUserRepository::new()),
            StaticAddressProvider::unavailable(),
            UnavailablePolicy::Skip,
        );
        let mut dto = ana_request();
        dto.address.province = "Anywhere".into();

        assert!(v.validate_and_build(&dto).await.is_ok());
    }

    #[tokio::test]
    async fn replacement_keeps_identity_and_allows_same_username() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let current = sample_user("ana");
        repo.insert(current.clone()).await.unwrap();
        let v = validator(repo);

        let mut dto = ana_request();
        dto.email = "new@x.com".into();
        let replaced = v.validate_replacement(&current, &dto).await.unwrap();

        assert_eq!(replaced.id, current.id);
        assert_eq!(replaced.created_at, current.created_at);
        assert_eq!(replaced.email, "new@x.com");
    }

    #[tokio::test]
    async fn replacement_cannot_take_another_users_name() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let current = sample_user("ana");
        repo.insert(current.clone()).await.unwrap();
        repo.insert(sample_user("bob")).await.unwrap();
        let v = validator(repo);

        let mut dto = ana_request();
        dto.username = "bob".into();

        let err = v.validate_replacement(&current, &dto).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
