//! # pricer_core: Currency and FX Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Currency types: `Currency`, `CurrencyPair` (`types`)
//! - A consistent FX rate matrix: `FxMatrix` (`fx`)
//! - Error types: `CurrencyError`, `FxMatrixError`
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - tracing: Diagnostics for inconsistent market data
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::fx::FxMatrix;
//! use pricer_core::types::Currency;
//!
//! let mut builder = FxMatrix::builder();
//! builder.add_rate(Currency::EUR, Currency::USD, 1.10).unwrap();
//! builder.add_rate(Currency::GBP, Currency::USD, 1.25).unwrap();
//! let matrix = builder.build().unwrap();
//!
//! let eurgbp = matrix.rate(Currency::EUR, Currency::GBP).unwrap();
//! assert!((eurgbp - 1.10 / 1.25).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/Deserialize for currency types

#![warn(missing_docs)]

pub mod fx;
pub mod types;

pub use fx::{FxMatrix, FxMatrixBuilder, FxMatrixError};
pub use types::{Currency, CurrencyError, CurrencyPair};
