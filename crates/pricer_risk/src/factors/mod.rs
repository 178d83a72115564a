//! Risk factors and the exposures held against them.
//!
//! - [`RiskFactor`]: opaque identifier of one market risk dimension
//! - [`RiskFactorProperties`]: asset class and shock conventions of a factor
//! - [`PortfolioExposure`]: one portfolio sensitivity line

mod exposure;
mod risk_factor;

pub use exposure::PortfolioExposure;
pub use risk_factor::{
    AssetClass, RiskFactor, RiskFactorProperties, RiskType, ShockType, TokenError,
};
