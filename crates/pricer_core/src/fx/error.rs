//! FX matrix error types.

use crate::types::{Currency, CurrencyError};
use thiserror::Error;

/// Errors raised while building or querying an [`FxMatrix`](super::FxMatrix).
///
/// # Examples
///
/// ```
/// use pricer_core::fx::FxMatrixError;
/// use pricer_core::types::Currency;
///
/// let err = FxMatrixError::MissingRate { base: Currency::EUR, quote: Currency::JPY };
/// assert_eq!(err.to_string(), "No FX rate available for EUR/JPY");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxMatrixError {
    /// Quoted rate is zero, negative or not finite.
    #[error("Invalid FX rate for {base}/{quote}: {rate}")]
    InvalidRate {
        /// Base currency of the quote
        base: Currency,
        /// Quote currency of the quote
        quote: Currency,
        /// The rejected rate
        rate: f64,
    },

    /// A quoted pair shares no currency with the rest of the matrix.
    #[error("FX rate {base}/{quote} is not connected to the other quoted currencies")]
    Disconnected {
        /// Base currency of the isolated quote
        base: Currency,
        /// Quote currency of the isolated quote
        quote: Currency,
    },

    /// Lookup for a currency the matrix does not contain.
    #[error("No FX rate available for {base}/{quote}")]
    MissingRate {
        /// Requested base currency
        base: Currency,
        /// Requested quote currency
        quote: Currency,
    },

    /// Invalid currency pair.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}
