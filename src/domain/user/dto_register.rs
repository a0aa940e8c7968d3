use super::Address;

/// Registration (and full-replacement update) payload.
///
/// `role` stays a raw string so the validator can reject unknown values
/// with a typed error instead of failing at deserialization.
#[derive(Debug, Clone, Default)]
pub struct RegisterUserDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: Option<String>,
    pub address: Address,
}
