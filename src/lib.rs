//! # Account Service
//!
//! User account backend: registration, login with bearer tokens, lookup,
//! replacement and deletion of users whose postal address is checked
//! against the Spanish province/municipality catalogue (geoapi.es).
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, value types and the ports collaborators implement
//! - **application**: The registration pipeline and the user service
//! - **infrastructure**: SeaORM storage, bcrypt, JWT and the catalogue client
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
