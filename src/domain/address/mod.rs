//! Address reference data and the catalogue port

pub mod model;
pub mod provider;

pub use model::{names_match, Municipality, Province};
pub use provider::{AddressProvider, ReferenceUnavailable};
