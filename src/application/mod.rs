pub mod identity;

// Re-export key types for convenience
pub use identity::{
    AddressResolver, RegistrationValidator, RepositoryAuthenticator, UnavailablePolicy,
    UserService,
};
