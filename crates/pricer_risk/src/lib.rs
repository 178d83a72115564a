//! # Pricer Risk (L4: Application)
//!
//! Historical-simulation margin calculation over risk-factor sensitivities.
//!
//! This crate provides:
//! - Risk factor identification and classification (`factors`)
//! - Portfolio exposures against risk factors (`factors::PortfolioExposure`)
//! - The SIMM calculator: scenario P&L vectors and VaR by asset class (`simm`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  factors/  - RiskFactor, AssetClass,    │
//! │              RiskFactorProperties,      │
//! │              PortfolioExposure          │
//! │  simm/     - SimmInputs, SimmCalculator │
//! │              historical VaR             │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            pricer_core (L1)             │
//! │  Currency, CurrencyPair, FxMatrix       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use pricer_core::fx::FxMatrix;
//! use pricer_core::types::Currency;
//! use pricer_risk::factors::{
//!     AssetClass, PortfolioExposure, RiskFactor, RiskFactorProperties, RiskType, ShockType,
//! };
//! use pricer_risk::simm::{SimmCalculator, SimmInputs};
//!
//! let rf = RiskFactor::new("USD-IRS-5Y");
//! let props = RiskFactorProperties::new(
//!     AssetClass::InterestRate,
//!     RiskType::Sensitivity,
//!     ShockType::Absolute,
//! );
//!
//! let mut fx = FxMatrix::builder();
//! fx.add_rate(Currency::EUR, Currency::USD, 1.10).unwrap();
//!
//! let calculator = SimmCalculator::build(SimmInputs {
//!     var_level: 0.99,
//!     base_currency: Currency::USD,
//!     risk_factors: HashMap::from([(rf.clone(), props)]),
//!     risk_factor_levels: HashMap::from([(rf.clone(), 0.025)]),
//!     fx_matrix: fx.build().unwrap(),
//!     risk_factor_shocks: HashMap::from([(rf.clone(), vec![0.001, -0.002, 0.0005])]),
//!     fx_shocks: HashMap::new(),
//! })
//! .unwrap();
//!
//! let derivatives = vec![PortfolioExposure::new(rf, 1_000_000.0, Currency::USD)];
//! let var = calculator.var_by_asset_class(&derivatives, &[], &[]).unwrap();
//! assert!((var[&AssetClass::InterestRate] - 2_000.0).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod factors;
pub mod simm;

pub use factors::{
    AssetClass, PortfolioExposure, RiskFactor, RiskFactorProperties, RiskType, ShockType,
    TokenError,
};
pub use simm::{historical_var, CalculatorError, PnlVector, SimmCalculator, SimmInputs};
