//! Outbound adapter for the geoapi.es province/municipality catalogue

pub mod client;
mod dto;

pub use client::GeoApiClient;
