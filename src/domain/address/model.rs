//! Geographic reference data

/// A province as listed by the reference catalogue.
///
/// `code` scopes the municipality lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    pub name: String,
    pub code: String,
}

/// A municipality belonging to one province.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    pub name: String,
    pub code: String,
}

/// Case-insensitive name comparison used by the catalogue lookups.
///
/// The catalogue stores names upper-cased, so both sides are upper-cased.
pub fn names_match(catalogue_name: &str, requested: &str) -> bool {
    catalogue_name.to_uppercase() == requested.to_uppercase()
}
