//! Core financial types.
//!
//! This module provides:
//! - `currency`: ISO 4217 currency codes with metadata
//! - `currency_pair`: Ordered currency pairs used to key FX data
//! - `error`: Structured error types for currency parsing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Currency`] from `currency`
//! - [`CurrencyPair`] from `currency_pair`
//! - [`CurrencyError`] from `error`

pub mod currency;
pub mod currency_pair;
pub mod error;

pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use error::CurrencyError;
