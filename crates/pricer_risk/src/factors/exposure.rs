//! Portfolio exposures.

use pricer_core::types::Currency;

use super::RiskFactor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One line of portfolio sensitivity data tied to a risk factor.
///
/// `amount` is expressed in `currency`; its meaning depends on the
/// factor's [`RiskType`](super::RiskType).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PortfolioExposure {
    /// Risk factor the exposure is held against
    pub risk_factor: RiskFactor,
    /// Sensitivity or notional amount
    pub amount: f64,
    /// Currency of `amount`
    pub currency: Currency,
}

impl PortfolioExposure {
    /// Creates an exposure.
    pub fn new(risk_factor: RiskFactor, amount: f64, currency: Currency) -> Self {
        Self {
            risk_factor,
            amount,
            currency,
        }
    }
}
