//! Shared test doubles and fixtures.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Address, AddressProvider, DomainResult, Municipality, PasswordHasher, Province,
    ReferenceUnavailable, RegisterUserDto, User, UserRole,
};

/// Catalogue double serving fixed lists, optionally "down".
pub struct StaticAddressProvider {
    provinces: Option<Vec<Province>>,
    /// `(province_code, municipality)`
    municipalities: Option<Vec<(String, Municipality)>>,
    municipality_requests: Mutex<Vec<String>>,
}

impl StaticAddressProvider {
    pub fn new(provinces: Vec<Province>, municipalities: Vec<(String, Municipality)>) -> Self {
        Self {
            provinces: Some(provinces),
            municipalities: Some(municipalities),
            municipality_requests: Mutex::new(Vec::new()),
        }
    }

    /// Madrid (28) and Barcelona (08) with a couple of municipalities each.
    pub fn spain_sample() -> Self {
        let province = |name: &str, code: &str| Province {
            name: name.into(),
            code: code.into(),
        };
        let municipality = |cpro: &str, name: &str, code: &str| {
            (
                cpro.to_string(),
                Municipality {
                    name: name.into(),
                    code: code.into(),
                },
            )
        };
        Self::new(
            vec![province("MADRID", "28"), province("BARCELONA", "08")],
            vec![
                municipality("28", "MADRID", "079"),
                municipality("28", "GETAFE", "065"),
                municipality("08", "BARCELONA", "019"),
                municipality("08", "BADALONA", "015"),
            ],
        )
    }

    /// Both lists unavailable.
    pub fn unavailable() -> Self {
        Self {
            provinces: None,
            municipalities: None,
            municipality_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_provinces_unavailable(mut self) -> Self {
        self.provinces = None;
        self
    }

    pub fn with_municipalities_unavailable(mut self) -> Self {
        self.municipalities = None;
        self
    }

    /// Province codes the municipality list was requested for, in order.
    pub fn municipality_requests(&self) -> Vec<String> {
        self.municipality_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AddressProvider for StaticAddressProvider {
    async fn fetch_provinces(&self) -> Result<Vec<Province>, ReferenceUnavailable> {
        self.provinces
            .clone()
            .ok_or_else(|| ReferenceUnavailable("no province payload".into()))
    }

    async fn fetch_municipalities(
        &self,
        province_code: &str,
    ) -> Result<Vec<Municipality>, ReferenceUnavailable> {
        self.municipality_requests
            .lock()
            .unwrap()
            .push(province_code.to_string());

        let all = self
            .municipalities
            .as_ref()
            .ok_or_else(|| ReferenceUnavailable("no municipality payload".into()))?;
        Ok(all
            .iter()
            .filter(|(code, _)| code == province_code)
            .map(|(_, m)| m.clone())
            .collect())
    }
}

/// Reversible "hash" so tests do not pay for bcrypt.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn encode(&self, plaintext: &str) -> DomainResult<String> {
        Ok(format!("plain:{}", plaintext))
    }

    fn matches(&self, plaintext: &str, hash: &str) -> bool {
        hash.strip_prefix("plain:") == Some(plaintext)
    }
}

/// The "ana" registration used throughout the tests.
pub fn ana_request() -> RegisterUserDto {
    RegisterUserDto {
        username: "ana".into(),
        email: "a@x.com".into(),
        password: "p1".into(),
        password_confirmation: "p1".into(),
        role: Some("USER".into()),
        address: Address {
            province: "Madrid".into(),
            municipality: "Madrid".into(),
        },
    }
}

/// A stored user with id `id-<username>`.
pub fn sample_user(username: &str) -> User {
    let now = Utc::now();
    User {
        id: format!("id-{}", username),
        username: username.into(),
        password_hash: "plain:secret".into(),
        email: format!("{}@example.com", username),
        role: UserRole::User,
        address: Address {
            province: "Madrid".into(),
            municipality: "Madrid".into(),
        },
        created_at: now,
        updated_at: now,
    }
}
