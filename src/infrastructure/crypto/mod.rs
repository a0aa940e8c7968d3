//! Password hashing and token signing adapters

pub mod jwt;
pub mod password;

pub use jwt::{JwtConfig, JwtTokenIssuer, TokenClaims};
pub use password::BcryptPasswordHasher;
