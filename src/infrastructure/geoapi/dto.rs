//! Wire shapes of the geoapi.es catalogue.
//!
//! Both endpoints wrap their rows in a `data` array. A body without `data`
//! is how the catalogue signals a failed lookup, so the field stays optional
//! and its absence is surfaced to the caller.

use serde::Deserialize;

use crate::domain::{Municipality, Province};

#[derive(Debug, Deserialize)]
pub(super) struct CatalogueResponseDto<T> {
    pub(super) data: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProvinceDto {
    #[serde(rename = "PRO")]
    pub(super) name: String,
    #[serde(rename = "CPRO")]
    pub(super) code: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct MunicipalityDto {
    #[serde(rename = "DMUN50")]
    pub(super) name: String,
    #[serde(rename = "CMUM")]
    pub(super) code: String,
}

impl From<ProvinceDto> for Province {
    fn from(dto: ProvinceDto) -> Self {
        Self {
            name: dto.name,
            code: dto.code,
        }
    }
}

impl From<MunicipalityDto> for Municipality {
    fn from(dto: MunicipalityDto) -> Self {
        Self {
            name: dto.name,
            code: dto.code,
        }
    }
}
