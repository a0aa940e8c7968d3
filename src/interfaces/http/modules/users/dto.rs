//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Address, PublicUserView, RegisterUserDto};

/// Public user representation. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub username: String,
    pub email: String,
    /// `USER` or `ADMIN`
    pub role: String,
}

impl From<PublicUserView> for UserDto {
    fn from(v: PublicUserView) -> Self {
        Self {
            username: v.username,
            email: v.email,
            role: v.role.to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct AddressDto {
    #[validate(length(max = 100, message = "province must be at most 100 characters"))]
    pub province: String,
    #[validate(length(max = 100, message = "municipality must be at most 100 characters"))]
    pub municipality: String,
}

/// Registration / replacement body.
///
/// Absent fields deserialize as blank so that the registration checks can
/// report which one is missing.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(length(max = 50, message = "username must be at most 50 characters"))]
    pub username: String,
    #[validate(length(max = 254, message = "email must be at most 254 characters"))]
    pub email: String,
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: String,
    #[validate(length(max = 128, message = "passwordConfirmation must be at most 128 characters"))]
    pub password_confirmation: String,
    /// `USER` (default) or `ADMIN`
    pub role: Option<String>,
    #[validate(nested)]
    pub address: AddressDto,
}

impl From<RegisterUserRequest> for RegisterUserDto {
    fn from(r: RegisterUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            password: r.password,
            password_confirmation: r.password_confirmation,
            role: r.role,
            address: Address {
                province: r.address.province,
                municipality: r.address.municipality,
            },
        }
    }
}
