//! Risk factor identification and classification.
//!
//! This module provides [`RiskFactor`], the key used for base levels,
//! shocks and exposures, and [`RiskFactorProperties`], which tells the
//! calculator how a factor is grouped and how its shocks are applied.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unknown token for one of the classification enums.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct TokenError {
    /// Which enum was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl TokenError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lower-cases and strips separators so `Interest Rate`, `interest_rate`
/// and `INTEREST-RATE` compare equal.
fn normalise(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Unique identifier for a risk factor (e.g. a curve/tenor/currency triple
/// such as `USD-IRS-5Y`).
///
/// # Examples
///
/// ```rust
/// use pricer_risk::factors::RiskFactor;
///
/// let factor = RiskFactor::new("USD-IRS-5Y");
/// assert_eq!(factor.name(), "USD-IRS-5Y");
/// assert_eq!(format!("{}", factor), "USD-IRS-5Y");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct RiskFactor(String);

impl RiskFactor {
    /// Creates a risk factor from its name.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the risk factor name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RiskFactor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Asset class grouping used to aggregate P&L and VaR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssetClass {
    /// Interest rates
    InterestRate,
    /// Credit spreads
    Credit,
    /// Equity prices and volatilities
    Equity,
    /// Commodity prices
    Commodity,
    /// Foreign exchange
    Fx,
}

impl AssetClass {
    /// All asset classes in reporting order.
    pub const ALL: [AssetClass; 5] = [
        AssetClass::InterestRate,
        AssetClass::Credit,
        AssetClass::Equity,
        AssetClass::Commodity,
        AssetClass::Fx,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            AssetClass::InterestRate => "InterestRate",
            AssetClass::Credit => "Credit",
            AssetClass::Equity => "Equity",
            AssetClass::Commodity => "Commodity",
            AssetClass::Fx => "FX",
        }
    }
}

impl FromStr for AssetClass {
    type Err = TokenError;

    /// Accepts `InterestRate`, `IR`, `Rates`, `Credit`, `Equity`,
    /// `Commodity` and `FX` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "interestrate" | "ir" | "rates" => Ok(AssetClass::InterestRate),
            "credit" => Ok(AssetClass::Credit),
            "equity" => Ok(AssetClass::Equity),
            "commodity" => Ok(AssetClass::Commodity),
            "fx" | "foreignexchange" => Ok(AssetClass::Fx),
            _ => Err(TokenError::new("asset class", s)),
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an exposure amount against the factor represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RiskType {
    /// P&L per unit move of the factor level.
    Sensitivity,
    /// Position value that moves with the relative change of the level.
    Notional,
}

impl FromStr for RiskType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "sensitivity" | "delta" => Ok(RiskType::Sensitivity),
            "notional" => Ok(RiskType::Notional),
            _ => Err(TokenError::new("risk type", s)),
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskType::Sensitivity => f.write_str("Sensitivity"),
            RiskType::Notional => f.write_str("Notional"),
        }
    }
}

/// How a historical shock is applied to a base level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShockType {
    /// `shocked = level + shock`
    Absolute,
    /// `shocked = level * (1 + shock)`
    Relative,
}

impl ShockType {
    /// Applies `shock` to `level`.
    ///
    /// ```rust
    /// use pricer_risk::factors::ShockType;
    ///
    /// assert_eq!(ShockType::Absolute.apply(1.0, 0.5), 1.5);
    /// assert_eq!(ShockType::Relative.apply(100.0, -0.05), 95.0);
    /// ```
    #[inline]
    pub fn apply(&self, level: f64, shock: f64) -> f64 {
        level + self.level_change(level, shock)
    }

    /// Change of `level` under `shock`, computed without the
    /// cancellation of `apply(level, shock) - level`.
    #[inline]
    pub fn level_change(&self, level: f64, shock: f64) -> f64 {
        match self {
            ShockType::Absolute => shock,
            ShockType::Relative => level * shock,
        }
    }
}

impl FromStr for ShockType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "absolute" | "abs" => Ok(ShockType::Absolute),
            "relative" | "rel" => Ok(ShockType::Relative),
            _ => Err(TokenError::new("shock type", s)),
        }
    }
}

impl fmt::Display for ShockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShockType::Absolute => f.write_str("Absolute"),
            ShockType::Relative => f.write_str("Relative"),
        }
    }
}

/// Classification of one risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiskFactorProperties {
    /// Asset class the factor's P&L is reported under
    pub asset_class: AssetClass,
    /// Meaning of exposure amounts against the factor
    pub risk_type: RiskType,
    /// Shock convention of the factor's historical series
    pub shock_type: ShockType,
}

impl RiskFactorProperties {
    /// Creates factor properties.
    pub fn new(asset_class: AssetClass, risk_type: RiskType, shock_type: ShockType) -> Self {
        Self {
            asset_class,
            risk_type,
            shock_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_risk_factor_construction_and_name() {
        let factor = RiskFactor::new("EUR-IRS-10Y");
        assert_eq!(factor.name(), "EUR-IRS-10Y");
        assert_eq!(RiskFactor::from("EUR-IRS-10Y"), factor);
    }

    #[test]
    fn test_risk_factor_hashmap_key() {
        let mut map: HashMap<RiskFactor, f64> = HashMap::new();
        map.insert(RiskFactor::new("USD-IRS-5Y"), 0.025);
        map.insert(RiskFactor::new("SPX"), 4500.0);

        assert_eq!(map.get(&RiskFactor::new("SPX")), Some(&4500.0));
        assert_eq!(map.get(&RiskFactor::new("AAPL")), None);
    }

    #[test]
    fn test_risk_factor_is_case_sensitive() {
        let mut set = HashSet::new();
        set.insert(RiskFactor::new("spx"));
        set.insert(RiskFactor::new("SPX"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_asset_class_parse_aliases() {
        assert_eq!("InterestRate".parse(), Ok(AssetClass::InterestRate));
        assert_eq!("interest rate".parse(), Ok(AssetClass::InterestRate));
        assert_eq!("IR".parse(), Ok(AssetClass::InterestRate));
        assert_eq!("Rates".parse(), Ok(AssetClass::InterestRate));
        assert_eq!("credit".parse(), Ok(AssetClass::Credit));
        assert_eq!("EQUITY".parse(), Ok(AssetClass::Equity));
        assert_eq!("Commodity".parse(), Ok(AssetClass::Commodity));
        assert_eq!("fx".parse(), Ok(AssetClass::Fx));
    }

    #[test]
    fn test_asset_class_parse_unknown() {
        let err = "Weather".parse::<AssetClass>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown asset class: Weather");
    }

    #[test]
    fn test_asset_class_display_roundtrip() {
        for class in AssetClass::ALL {
            assert_eq!(class.to_string().parse::<AssetClass>(), Ok(class));
        }
    }

    #[test]
    fn test_risk_type_and_shock_type_parse() {
        assert_eq!("Sensitivity".parse(), Ok(RiskType::Sensitivity));
        assert_eq!("notional".parse(), Ok(RiskType::Notional));
        assert_eq!("Absolute".parse(), Ok(ShockType::Absolute));
        assert_eq!("rel".parse(), Ok(ShockType::Relative));
        assert!("gamma".parse::<RiskType>().is_err());
        assert!("log".parse::<ShockType>().is_err());
    }

    #[test]
    fn test_shock_application() {
        assert_eq!(ShockType::Absolute.level_change(0.02, 0.001), 0.001);
        assert_eq!(ShockType::Relative.level_change(200.0, 0.1), 20.0);
        assert_eq!(ShockType::Relative.apply(50.0, -0.5), 25.0);
    }
}
