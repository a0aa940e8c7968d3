use async_trait::async_trait;
use thiserror::Error;

use super::{Municipality, Province};

/// The reference list could not be obtained: no payload, a payload without
/// data, a transport failure or a timeout.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ReferenceUnavailable(pub String);

/// Outbound port to the geographic reference catalogue.
///
/// An empty `Ok` list means the catalogue answered with no entries, which is
/// different from [`ReferenceUnavailable`].
#[async_trait]
pub trait AddressProvider: Send + Sync {
    async fn fetch_provinces(&self) -> Result<Vec<Province>, ReferenceUnavailable>;

    async fn fetch_municipalities(
        &self,
        province_code: &str,
    ) -> Result<Vec<Municipality>, ReferenceUnavailable>;
}
