//! Identity module: user management & authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases (registration, login, lookup, update, deletion) and the
//! registration validation pipeline it is built on.

pub mod address;
pub mod authenticator;
pub mod service;
pub mod validator;

pub use address::{AddressResolver, ResolvedAddress, UnavailablePolicy};
pub use authenticator::RepositoryAuthenticator;
pub use service::UserService;
pub use validator::RegistrationValidator;
