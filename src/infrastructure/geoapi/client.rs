//! Reqwest-backed catalogue client.
//!
//! Every failure mode (transport error, timeout, non-success status, a body
//! that does not decode or carries no `data`) collapses into
//! [`ReferenceUnavailable`]; the address resolver decides what that means.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{CatalogueResponseDto, MunicipalityDto, ProvinceDto};
use crate::domain::{AddressProvider, Municipality, Province, ReferenceUnavailable};

const BODY_PREVIEW_CHAR_LIMIT: usize = 160;

pub struct GeoApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeoApiClient {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        resource: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, ReferenceUnavailable> {
        let mut query: Vec<(&str, &str)> = filters.to_vec();
        query.push(("type", "JSON"));
        if !self.api_key.is_empty() {
            query.push(("key", self.api_key.as_str()));
        }

        let url = format!("{}/{}", self.base_url, resource);
        debug!(url = %url, "Fetching address catalogue");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: CatalogueResponseDto<T> = serde_json::from_slice(&body).map_err(|e| {
            ReferenceUnavailable(format!("invalid {} payload: {}", resource, e))
        })?;
        decoded
            .data
            .ok_or_else(|| ReferenceUnavailable(format!("{} payload carries no data", resource)))
    }
}

#[async_trait]
impl AddressProvider for GeoApiClient {
    async fn fetch_provinces(&self) -> Result<Vec<Province>, ReferenceUnavailable> {
        let rows: Vec<ProvinceDto> = self.fetch_list("provincias", &[]).await?;
        Ok(rows.into_iter().map(Province::from).collect())
    }

    async fn fetch_municipalities(
        &self,
        province_code: &str,
    ) -> Result<Vec<Municipality>, ReferenceUnavailable> {
        let rows: Vec<MunicipalityDto> = self
            .fetch_list("municipios", &[("CPRO", province_code)])
            .await?;
        Ok(rows.into_iter().map(Municipality::from).collect())
    }
}

fn map_transport_error(error: reqwest::Error) -> ReferenceUnavailable {
    if error.is_timeout() {
        ReferenceUnavailable(format!("timed out: {}", error))
    } else {
        ReferenceUnavailable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ReferenceUnavailable {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(BODY_PREVIEW_CHAR_LIMIT).collect();

    if preview.is_empty() {
        ReferenceUnavailable(format!("status {}", status.as_u16()))
    } else {
        ReferenceUnavailable(format!("status {}: {}", status.as_u16(), preview))
    }
}
