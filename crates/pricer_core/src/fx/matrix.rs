//! FX matrix construction and lookup.

use std::collections::BTreeMap;

use super::error::FxMatrixError;
use crate::types::{Currency, CurrencyPair};

/// Relative tolerance for redundant quotes before a mismatch is reported.
const CONSISTENCY_TOLERANCE: f64 = 1e-8;

/// A consistent set of exchange rates.
///
/// Each contained currency is stored as its value in units of a single
/// reference currency (the base of the first quoted pair), so any two
/// contained currencies can be converted and triangulated rates always agree.
///
/// # Examples
///
/// ```
/// use pricer_core::fx::FxMatrix;
/// use pricer_core::types::Currency;
///
/// let mut builder = FxMatrix::builder();
/// builder.add_rate(Currency::USD, Currency::JPY, 150.0).unwrap();
/// let matrix = builder.build().unwrap();
///
/// assert!((matrix.rate(Currency::USD, Currency::JPY).unwrap() - 150.0).abs() < 1e-9);
/// assert!((matrix.convert(300.0, Currency::JPY, Currency::USD).unwrap() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FxMatrix {
    values: BTreeMap<Currency, f64>,
}

impl FxMatrix {
    /// Starts an empty builder.
    pub fn builder() -> FxMatrixBuilder {
        FxMatrixBuilder::default()
    }

    /// Number of units of `quote` per one unit of `base`.
    ///
    /// The rate of a currency against itself is 1 even if the matrix
    /// does not contain it.
    ///
    /// # Errors
    ///
    /// `FxMatrixError::MissingRate` if either currency is not in the matrix.
    pub fn rate(&self, base: Currency, quote: Currency) -> Result<f64, FxMatrixError> {
        if base == quote {
            return Ok(1.0);
        }
        match (self.values.get(&base), self.values.get(&quote)) {
            (Some(b), Some(q)) => Ok(b / q),
            _ => Err(FxMatrixError::MissingRate { base, quote }),
        }
    }

    /// Rate for an ordered pair, see [`FxMatrix::rate`].
    pub fn pair_rate(&self, pair: CurrencyPair) -> Result<f64, FxMatrixError> {
        self.rate(pair.base(), pair.quote())
    }

    /// Converts `amount` from `from` into `to`.
    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> Result<f64, FxMatrixError> {
        Ok(amount * self.rate(from, to)?)
    }

    /// Returns true if rates against `currency` are available.
    pub fn contains(&self, currency: Currency) -> bool {
        self.values.contains_key(&currency)
    }

    /// Contained currencies in code order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.values.keys().copied()
    }

    /// Number of contained currencies.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the matrix holds no currencies.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Collects quoted rates and resolves them into an [`FxMatrix`].
#[derive(Debug, Clone, Default)]
pub struct FxMatrixBuilder {
    quotes: Vec<(Currency, Currency, f64)>,
}

impl FxMatrixBuilder {
    /// Adds a quote: one unit of `base` is worth `rate` units of `quote`.
    ///
    /// # Errors
    ///
    /// - `FxMatrixError::Currency` if `base == quote`
    /// - `FxMatrixError::InvalidRate` if `rate` is not a positive finite number
    pub fn add_rate(
        &mut self,
        base: Currency,
        quote: Currency,
        rate: f64,
    ) -> Result<&mut Self, FxMatrixError> {
        CurrencyPair::new(base, quote)?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(FxMatrixError::InvalidRate { base, quote, rate });
        }
        self.quotes.push((base, quote, rate));
        Ok(self)
    }

    /// Number of quotes added so far.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if no quotes have been added.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Resolves every quote against the first one.
    ///
    /// Redundant quotes that disagree with already implied rates are
    /// ignored with a warning; the earlier quote wins.
    ///
    /// # Errors
    ///
    /// `FxMatrixError::Disconnected` if some quote cannot be linked to the
    /// currency of the first quote.
    pub fn build(self) -> Result<FxMatrix, FxMatrixError> {
        let mut values = BTreeMap::new();
        let Some(&(reference, _, _)) = self.quotes.first() else {
            return Ok(FxMatrix { values });
        };
        values.insert(reference, 1.0);

        let mut pending = self.quotes;
        loop {
            let before = pending.len();
            pending.retain(|&(base, quote, rate)| {
                match (values.get(&base).copied(), values.get(&quote).copied()) {
                    (Some(vb), Some(vq)) => {
                        let implied = vb / vq;
                        if ((implied - rate) / implied).abs() > CONSISTENCY_TOLERANCE {
                            tracing::warn!(
                                base = %base,
                                quote = %quote,
                                quoted = rate,
                                implied,
                                "Ignoring FX quote inconsistent with earlier quotes"
                            );
                        }
                        false
                    }
                    (Some(vb), None) => {
                        values.insert(quote, vb / rate);
                        false
                    }
                    (None, Some(vq)) => {
                        values.insert(base, vq * rate);
                        false
                    }
                    (None, None) => true,
                }
            });

            match pending.first() {
                None => break,
                Some(&(base, quote, _)) if pending.len() == before => {
                    return Err(FxMatrixError::Disconnected { base, quote });
                }
                Some(_) => {}
            }
        }

        Ok(FxMatrix { values })
    }
}
