//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use super::validator::RegistrationValidator;
use crate::domain::{
    Authenticator, DomainError, DomainResult, IssuedToken, PublicUserView, RegisterUserDto,
    TokenIssuer, User, UserRepositoryInterface,
};

/// User service: orchestrates all identity / user-management use-cases.
///
/// Every collaborator is injected through [`UserService::new`].
pub struct UserService {
    repo: Arc<dyn UserRepositoryInterface>,
    validator: RegistrationValidator,
    authenticator: Arc<dyn Authenticator>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        validator: RegistrationValidator,
        authenticator: Arc<dyn Authenticator>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repo,
            validator,
            authenticator,
            tokens,
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Validate and store a new user.
    ///
    /// On any error the store is left untouched.
    pub async fn register(&self, dto: RegisterUserDto) -> DomainResult<PublicUserView> {
        let user = self.validator.validate_and_build(&dto).await?;
        let view = PublicUserView::from(&user);
        let user_id = user.id.clone();

        self.repo.insert(user).await?;

        info!(user_id = %user_id, username = %view.username, role = %view.role, "New user registered");
        Ok(view)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate and issue a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<IssuedToken> {
        let principal = match self.authenticator.authenticate(username, password).await {
            Ok(principal) => principal,
            Err(e @ DomainError::Unauthorized(_)) => {
                warn!(username, "Login rejected");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let token = self.tokens.issue(&principal)?;
        info!(user_id = %principal.user_id, username = %principal.username, "User logged in");
        Ok(token)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Every user in store order.
    pub async fn get_all(&self) -> DomainResult<Vec<PublicUserView>> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(PublicUserView::from).collect())
    }

    pub async fn get_by_username(&self, username: &str) -> DomainResult<PublicUserView> {
        self.require(username).await.map(PublicUserView::from)
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Replace every mutable field of `username` with the request's values.
    ///
    /// The request goes through the registration checks; see
    /// [`RegistrationValidator::validate_replacement`].
    pub async fn update(
        &self,
        username: &str,
        dto: RegisterUserDto,
    ) -> DomainResult<PublicUserView> {
        let current = self.require(username).await?;
        let updated = self.validator.validate_replacement(&current, &dto).await?;
        let view = PublicUserView::from(&updated);

        self.repo.save(updated).await?;

        info!(user_id = %current.id, previous = username, username = %view.username, "User updated");
        Ok(view)
    }

    pub async fn delete(&self, username: &str) -> DomainResult<()> {
        let user = self.require(username).await?;
        self.repo.delete(&user).await?;

        info!(user_id = %user.id, username, "User deleted");
        Ok(())
    }

    async fn require(&self, username: &str) -> DomainResult<User> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::user_not_found(username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::address::{AddressResolver, UnavailablePolicy};
    use crate::application::identity::authenticator::RepositoryAuthenticator;
    use crate::domain::{AddressPart, UserRole};
    use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, JwtTokenIssuer};
    use crate::infrastructure::storage::InMemoryUserRepository;
    use crate::test_support::{ana_request, PlainHasher, StaticAddressProvider};

    struct Fixture {
        repo: Arc<InMemoryUserRepository>,
        service: UserService,
        jwt: JwtConfig,
    }

    fn fixture() -> Fixture {
        fixture_with(StaticAddressProvider::spain_sample())
    }

    fn fixture_with(provider: StaticAddressProvider) -> Fixture {
        let repo = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(PlainHasher);
        let jwt = JwtConfig::for_tests();
        let validator = RegistrationValidator::new(
            repo.clone(),
            hasher.clone(),
            AddressResolver::new(Arc::new(provider), UnavailablePolicy::Reject),
        );
        let service = UserService::new(
            repo.clone(),
            validator,
            Arc::new(RepositoryAuthenticator::new(repo.clone(), hasher)),
            Arc::new(JwtTokenIssuer::new(jwt.clone())),
        );
        Fixture { repo, service, jwt }
    }

    #[tokio::test]
    async fn register_ana_in_madrid() {
        let f = fixture();

        let view = f.service.register(ana_request()).await.unwrap();

        assert_eq!(
            view,
            PublicUserView {
                username: "ana".into(),
                email: "a@x.com".into(),
                role: UserRole::User,
            }
        );
        let stored = f.repo.find_by_username("ana").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "p1");
    }

    #[tokio::test]
    async fn mismatched_confirmation_leaves_store_empty() {
        let f = fixture();
        let mut dto = ana_request();
        dto.password_confirmation = "p2".into();

        let err = f.service.register(dto).await.unwrap_err();

        assert!(matches!(err, DomainError::PasswordMismatch));
        assert!(f.repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts_and_keeps_original() {
        let f = fixture();
        f.service.register(ana_request()).await.unwrap();

        let mut dto = ana_request();
        dto.email = "other@x.com".into();
        let err = f.service.register(dto).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        let all = f.service.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email, "a@x.com");
    }

    #[tokio::test]
    async fn unavailable_catalogue_blocks_registration_by_default() {
        let f = fixture_with(StaticAddressProvider::unavailable());

        let err = f.service.register(ana_request()).await.unwrap_err();

        assert!(matches!(err, DomainError::AddressUnavailable(_)));
        assert!(f.repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_username_matches_what_was_registered() {
        let f = fixture();
        let mut dto = ana_request();
        dto.role = Some("ADMIN".into());
        f.service.register(dto).await.unwrap();

        let view = f.service.get_by_username("ana").await.unwrap();

        assert_eq!(view.username, "ana");
        assert_eq!(view.email, "a@x.com");
        assert_eq!(view.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn get_all_preserves_registration_order() {
        let f = fixture();
        for name in ["carla", "ana", "bruno"] {
            let mut dto = ana_request();
            dto.username = name.into();
            f.service.register(dto).await.unwrap();
        }

        let names: Vec<String> = f
            .service
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.username)
            .collect();
        assert_eq!(names, ["carla", "ana", "bruno"]);
    }

    #[tokio::test]
    async fn missing_user_operations_report_not_found() {
        let f = fixture();

        assert!(matches!(
            f.service.get_by_username("ghost").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            f.service.update("ghost", ana_request()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            f.service.delete("ghost").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn update_replaces_fields_and_rekeys_username() {
        let f = fixture();
        f.service.register(ana_request()).await.unwrap();
        let original = f.repo.find_by_username("ana").await.unwrap().unwrap();

        let mut dto = ana_request();
        dto.username = "ana.maria".into();
        dto.email = "am@x.com".into();
        dto.password = "p9".into();
        dto.password_confirmation = "p9".into();
        dto.role = Some("ADMIN".into());
        dto.address.municipality = "getafe".into();

        let view = f.service.update("ana", dto).await.unwrap();

        assert_eq!(view.username, "ana.maria");
        assert_eq!(view.role, UserRole::Admin);
        assert!(f.repo.find_by_username("ana").await.unwrap().is_none());
        let stored = f.repo.find_by_username("ana.maria").await.unwrap().unwrap();
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.address.municipality, "getafe");
        assert_ne!(stored.password_hash, original.password_hash);
    }

    #[tokio::test]
    async fn update_runs_address_checks() {
        let f = fixture();
        f.service.register(ana_request()).await.unwrap();
        let mut dto = ana_request();
        dto.address.municipality = "Springfield".into();

        let err = f.service.update("ana", dto).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::AddressNotFound { part: AddressPart::Municipality, .. }
        ));
        let stored = f.repo.find_by_username("ana").await.unwrap().unwrap();
        assert_eq!(stored.address.municipality, "Madrid");
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let f = fixture();
        f.service.register(ana_request()).await.unwrap();

        f.service.delete("ana").await.unwrap();

        assert!(matches!(
            f.service.get_by_username("ana").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let f = fixture();
        f.service.register(ana_request()).await.unwrap();

        let issued = f.service.login("ana", "p1").await.unwrap();

        assert_eq!(issued.token_type, "Bearer");
        let claims = verify_token(&issued.token, &f.jwt).unwrap();
        assert_eq!(claims.username, "ana");
        assert_eq!(claims.role, "USER");
    }

    #[tokio::test]
    async fn login_with_bad_password_is_unauthorized() {
        let f = fixture();
        f.service.register(ana_request()).await.unwrap();

        let err = f.service.login("ana", "P1").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
