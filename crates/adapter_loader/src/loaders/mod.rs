//! CSV loaders for SIMM inputs.
//!
//! Each input kind has a `read_*` function over any [`std::io::Read`] and a
//! `load_*` function over a path. Headers are required and matched
//! case-insensitively; fields are trimmed; ragged rows are rejected.
//!
//! | Input | Header |
//! |---|---|
//! | risk factor definitions | `RiskFactor,AssetClass,RiskType,ShockType` |
//! | risk factor base levels | `RiskFactor,BaseLevel` |
//! | FX rates | `Base,Quote,Rate` |
//! | risk factor shocks | `RiskFactor,<scenario labels...>` |
//! | FX shocks | `Base,Quote,<scenario labels...>` |
//! | portfolio | `RiskFactor,Amount,Currency` |

mod fx;
mod portfolio;
mod risk_factors;
mod shocks;
mod table;

pub use fx::{load_fx_rates, read_fx_rates};
pub use portfolio::{load_portfolio, read_portfolio};
pub use risk_factors::{
    load_risk_factor_base_levels, load_risk_factor_definitions, read_risk_factor_base_levels,
    read_risk_factor_definitions,
};
pub use shocks::{load_fx_shocks, load_risk_factor_shocks, read_fx_shocks, read_risk_factor_shocks};
