//! Two-stage address resolution against the reference catalogue
//!
//! Province first, then the municipality list scoped to the resolved
//! province code.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{
    address::names_match, Address, AddressPart, AddressProvider, DomainError, DomainResult,
    ReferenceUnavailable,
};

/// What to do when a reference list cannot be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnavailablePolicy {
    /// Fail the request with `AddressUnavailable`.
    #[default]
    Reject,
    /// Skip the stage and carry on without a province code.
    Skip,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedAddress {
    /// `None` when the province stage was skipped.
    pub province_code: Option<String>,
    pub municipality_checked: bool,
}

pub struct AddressResolver {
    provider: Arc<dyn AddressProvider>,
    policy: UnavailablePolicy,
}

impl AddressResolver {
    pub fn new(provider: Arc<dyn AddressProvider>, policy: UnavailablePolicy) -> Self {
        Self { provider, policy }
    }

    pub async fn resolve(&self, address: &Address) -> DomainResult<ResolvedAddress> {
        let province_code = match self.provider.fetch_provinces().await {
            Ok(provinces) => {
                let found = provinces
                    .into_iter()
                    .find(|p| names_match(&p.name, &address.province))
                    .ok_or_else(|| DomainError::AddressNotFound {
                        part: AddressPart::Province,
                        name: address.province.clone(),
                    })?;
                debug!(province = %found.name, code = %found.code, "Province resolved");
                Some(found.code)
            }
            Err(e) => {
                self.on_unavailable(AddressPart::Province, e)?;
                None
            }
        };

        let code = province_code.as_deref().unwrap_or_default();
        let municipality_checked = match self.provider.fetch_municipalities(code).await {
            Ok(municipalities) => {
                municipalities
                    .iter()
                    .find(|m| names_match(&m.name, &address.municipality))
                    .ok_or_else(|| DomainError::AddressNotFound {
                        part: AddressPart::Municipality,
                        name: address.municipality.clone(),
                    })?;
                debug!(municipality = %address.municipality, province_code = code, "Municipality resolved");
                true
            }
            Err(e) => {
                self.on_unavailable(AddressPart::Municipality, e)?;
                false
            }
        };

        Ok(ResolvedAddress {
            province_code,
            municipality_checked,
        })
    }

    fn on_unavailable(&self, part: AddressPart, e: ReferenceUnavailable) -> DomainResult<()> {
        match self.policy {
            UnavailablePolicy::Reject => {
                warn!(%part, reason = %e, "Reference list unavailable, rejecting");
                Err(DomainError::AddressUnavailable(format!("{} list: {}", part, e)))
            }
            UnavailablePolicy::Skip => {
                warn!(%part, reason = %e, "Reference list unavailable, skipping check");
                Ok(())
            }
        }
    }
}
