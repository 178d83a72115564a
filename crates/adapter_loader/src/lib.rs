//! # adapter_loader
//!
//! File inputs for historical SIMM.
//!
//! - [`loaders`]: CSV readers for risk factor definitions, base levels,
//!   FX rates, shock series and portfolios
//! - [`SimmDataLoader`]: the seam grouping those readers
//! - [`PropertyFileLoader`]: resolves a flat configuration to input files,
//!   builds a [`SimmCalculator`](pricer_risk::SimmCalculator) and runs VaR
//!   and P&L queries on it
//!
//! ## Configuration
//!
//! ```text
//! var-level=0.99
//! base-currency=USD
//! risk-factor-definitions=data/risk_factors.csv
//! risk-factor-base-levels=data/base_levels.csv
//! risk-factor-shocks=data/risk_factor_shocks.csv
//! fx-rates=data/fx_rates.csv
//! fx-rate-shocks=data/fx_shocks.csv
//! portfolio-derivatives=data/derivatives.csv
//! portfolio-initial-margin=data/initial_margin.csv
//! portfolio-variation-margin=data/variation_margin.csv
//! ```

#![warn(missing_docs)]

mod data_loader;
mod error;
pub mod loaders;
mod property_file_loader;

pub use data_loader::{CsvDataLoader, SimmDataLoader};
pub use error::{LoadError, SimmError};
pub use property_file_loader::{keys, PropertyFileLoader, DEFAULT_VAR_LEVEL};
