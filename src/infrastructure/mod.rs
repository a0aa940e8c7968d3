//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod geoapi;
pub mod storage;

pub use crypto::{BcryptPasswordHasher, JwtConfig, JwtTokenIssuer};
pub use database::{init_database, DatabaseConfig, SeaOrmUserRepository};
pub use geoapi::GeoApiClient;
pub use storage::InMemoryUserRepository;
