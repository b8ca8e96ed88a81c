//! Shared primitive types used across the generator.

/// A synthetic user identifier, e.g. `U-482913`.
pub type UserId = String;

/// A country name as it appears in the catalog and the output file.
pub type CountryName = String;

/// An ISO-4217 style currency code (`EGP`, `EUR`, ...).
pub type CurrencyCode = String;
