//! Ordered currency pairs used to key FX data.
//!
//! The convention is BASE/QUOTE: a rate quoted on the pair is the number
//! of QUOTE units per one unit of BASE.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
//! assert_eq!(pair.code(), "EUR/USD");
//! assert_eq!(pair.inverse().code(), "USD/EUR");
//! ```

use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::error::CurrencyError;

/// An ordered pair of distinct currencies.
///
/// `EUR/USD` and `USD/EUR` are different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyPair {
    base: Currency,
    quote: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::SameCurrency` if base and quote are the same.
    pub fn new(base: Currency, quote: Currency) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        Ok(Self { base, quote })
    }

    /// Returns the base currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the quote currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Returns the pair with base and quote swapped.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }

    /// Returns the currency pair code in standard format (BASE/QUOTE).
    pub fn code(&self) -> String {
        format!("{}/{}", self.base.code(), self.quote.code())
    }

    /// Returns true if either side of the pair is `currency`.
    pub fn contains(&self, currency: Currency) -> bool {
        self.base == currency || self.quote == currency
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyError;

    /// Parses `BASE/QUOTE`, e.g. `"EUR/USD"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| CurrencyError::ParseError(s.to_string()))?;
        CurrencyPair::new(base.parse()?, quote.parse()?)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_currency_pair_new() {
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
        assert_eq!(pair.base(), Currency::EUR);
        assert_eq!(pair.quote(), Currency::USD);
    }

    #[test]
    fn test_currency_pair_same_currency_error() {
        let result = CurrencyPair::new(Currency::USD, Currency::USD);
        assert_eq!(
            result,
            Err(CurrencyError::SameCurrency("USD".to_string()))
        );
    }

    #[test]
    fn test_currency_pair_order_matters() {
        let eurusd = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
        let usdeur = CurrencyPair::new(Currency::USD, Currency::EUR).unwrap();
        assert_ne!(eurusd, usdeur);
        assert_eq!(eurusd.inverse(), usdeur);

        let mut map = HashMap::new();
        map.insert(eurusd, 1);
        map.insert(usdeur, 2);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_currency_pair_from_str() {
        let pair: CurrencyPair = "gbp/jpy".parse().unwrap();
        assert_eq!(pair.code(), "GBP/JPY");
        assert!(pair.contains(Currency::JPY));
        assert!(!pair.contains(Currency::USD));
    }

    #[test]
    fn test_currency_pair_from_str_errors() {
        assert!(matches!(
            "EURUSD".parse::<CurrencyPair>(),
            Err(CurrencyError::ParseError(_))
        ));
        assert!(matches!(
            "EUR/XYZ".parse::<CurrencyPair>(),
            Err(CurrencyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_currency_pair_display() {
        let pair = CurrencyPair::new(Currency::USD, Currency::CHF).unwrap();
        assert_eq!(format!("{}", pair), "USD/CHF");
    }
}
