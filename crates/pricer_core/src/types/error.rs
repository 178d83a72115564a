//! Error types for currency handling.

use thiserror::Error;

/// Currency-related errors.
///
/// # Variants
/// - `UnknownCurrency`: Unknown currency code
/// - `ParseError`: Failed to parse a currency pair string
/// - `SameCurrency`: Base and quote currencies are the same
///
/// # Examples
/// ```
/// use pricer_core::types::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: XYZ");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Failed to parse currency pair string.
    #[error("Currency parse error: {0}")]
    ParseError(String),

    /// Base and quote currencies are the same.
    #[error("Base and quote currencies are the same: {0}")]
    SameCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_error_display() {
        assert_eq!(
            CurrencyError::SameCurrency("USD".to_string()).to_string(),
            "Base and quote currencies are the same: USD"
        );
        assert_eq!(
            CurrencyError::ParseError("EURUSD".to_string()).to_string(),
            "Currency parse error: EURUSD"
        );
    }
}
