pub mod address;
pub mod ports;
pub mod user;

// Re-export commonly used types
pub use address::{AddressProvider, Municipality, Province, ReferenceUnavailable};
pub use ports::{AuthenticatedPrincipal, Authenticator, IssuedToken, PasswordHasher, TokenIssuer};
pub use user::{
    Address, PublicUserView, RegisterUserDto, User, UserRepositoryInterface, UserRole,
};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{AddressPart, DomainError, DomainResult};
