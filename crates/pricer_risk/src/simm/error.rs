//! Calculator error types.

use pricer_core::fx::FxMatrixError;
use pricer_core::types::{Currency, CurrencyError, CurrencyPair};
use thiserror::Error;

/// Errors raised while building a [`SimmCalculator`](super::SimmCalculator)
/// or computing results with it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculatorError {
    /// VaR confidence level outside (0, 1).
    #[error("VaR level must be strictly between 0 and 1, got {0}")]
    InvalidVarLevel(f64),

    /// No risk factor definitions supplied.
    #[error("No risk factors defined")]
    NoRiskFactors,

    /// A defined risk factor has no base level.
    #[error("No base level for risk factor: {0}")]
    MissingBaseLevel(String),

    /// A notional risk factor has a zero base level.
    #[error("Notional risk factor {0} has a zero base level")]
    ZeroNotionalLevel(String),

    /// A defined risk factor has no shock series.
    #[error("No shocks for risk factor: {0}")]
    MissingShocks(String),

    /// Shock series contain no scenarios.
    #[error("Shock series contain no scenarios")]
    NoScenarios,

    /// A shock series length differs from the scenario count.
    #[error("Shock series for {series} has {actual} scenarios, expected {expected}")]
    ScenarioCountMismatch {
        /// Risk factor or currency pair of the series
        series: String,
        /// Scenario count of the other series
        expected: usize,
        /// Length of this series
        actual: usize,
    },

    /// A shock value is unusable.
    #[error("Invalid shock {value} in series for {series}")]
    InvalidShock {
        /// Risk factor or currency pair of the series
        series: String,
        /// The rejected shock
        value: f64,
    },

    /// The FX matrix does not contain the base currency.
    #[error("FX matrix does not contain base currency {0}")]
    BaseCurrencyNotInFxMatrix(Currency),

    /// Exposure against a risk factor the calculator does not know.
    #[error("Exposure references unknown risk factor: {0}")]
    UnknownRiskFactor(String),

    /// No FX shocks for converting an exposure currency to the base currency.
    #[error("No FX shocks for currency pair {0}")]
    MissingFxShocks(CurrencyPair),

    /// FX rate lookup failed.
    #[error(transparent)]
    Fx(#[from] FxMatrixError),

    /// Invalid currency pair.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CalculatorError::InvalidVarLevel(1.5).to_string(),
            "VaR level must be strictly between 0 and 1, got 1.5"
        );
        assert_eq!(
            CalculatorError::ScenarioCountMismatch {
                series: "SPX".to_string(),
                expected: 250,
                actual: 249,
            }
            .to_string(),
            "Shock series for SPX has 249 scenarios, expected 250"
        );
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalculatorError::NoRiskFactors);
        assert!(err.to_string().contains("No risk factors"));
    }
}
