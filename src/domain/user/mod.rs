//! User aggregate
//!
//! Contains the User entity, the registration DTO, and the repository interface.

pub mod model;
pub mod repository;

mod dto_register;

pub use model::{Address, PublicUserView, User, UserRole};

pub use dto_register::RegisterUserDto;

pub use repository::UserRepositoryInterface;
