//! Historical-simulation SIMM calculation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                SimmCalculator                 │
//! ├──────────────────────────────────────────────┤
//! │  SimmInputs  - validated once by build()     │
//! │  P&L vectors - per scenario, per asset class │
//! │  VaR         - historical quantile of P&L    │
//! └──────────────────────────────────────────────┘
//! ```

mod calculator;
mod error;
mod var;

pub use calculator::{PnlVector, SimmCalculator, SimmInputs};
pub use error::CalculatorError;
pub use var::historical_var;
