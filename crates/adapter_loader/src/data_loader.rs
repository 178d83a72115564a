//! The set of input loaders used by the assembly pipeline.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use pricer_core::fx::FxMatrix;
use pricer_core::types::CurrencyPair;
use pricer_risk::{PortfolioExposure, RiskFactor, RiskFactorProperties};

use crate::error::LoadError;
use crate::loaders;

/// Source of SIMM inputs, one method per input kind.
///
/// [`PropertyFileLoader`](crate::PropertyFileLoader) only resolves paths and
/// sequences calls; implementations decide how a file becomes data.
pub trait SimmDataLoader {
    /// Risk factor definitions.
    fn risk_factor_definitions(
        &self,
        path: &Path,
    ) -> Result<HashMap<RiskFactor, RiskFactorProperties>, LoadError>;

    /// Risk factor base levels.
    fn risk_factor_base_levels(&self, path: &Path) -> Result<HashMap<RiskFactor, f64>, LoadError>;

    /// Spot FX matrix.
    fn fx_rates(&self, path: &Path) -> Result<FxMatrix, LoadError>;

    /// Risk factor shock series.
    fn risk_factor_shocks(&self, path: &Path) -> Result<HashMap<RiskFactor, Vec<f64>>, LoadError>;

    /// FX shock series.
    fn fx_shocks(&self, path: &Path) -> Result<HashMap<CurrencyPair, Vec<f64>>, LoadError>;

    /// Portfolio exposures restricted to `risk_factors`.
    fn portfolio(
        &self,
        path: &Path,
        risk_factors: &HashSet<RiskFactor>,
    ) -> Result<Vec<PortfolioExposure>, LoadError>;
}

/// Reads every input from CSV files, see [`loaders`](crate::loaders).
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDataLoader;

impl SimmDataLoader for CsvDataLoader {
    fn risk_factor_definitions(
        &self,
        path: &Path,
    ) -> Result<HashMap<RiskFactor, RiskFactorProperties>, LoadError> {
        loaders::load_risk_factor_definitions(path)
    }

    fn risk_factor_base_levels(&self, path: &Path) -> Result<HashMap<RiskFactor, f64>, LoadError> {
        loaders::load_risk_factor_base_levels(path)
    }

    fn fx_rates(&self, path: &Path) -> Result<FxMatrix, LoadError> {
        loaders::load_fx_rates(path)
    }

    fn risk_factor_shocks(&self, path: &Path) -> Result<HashMap<RiskFactor, Vec<f64>>, LoadError> {
        loaders::load_risk_factor_shocks(path)
    }

    fn fx_shocks(&self, path: &Path) -> Result<HashMap<CurrencyPair, Vec<f64>>, LoadError> {
        loaders::load_fx_shocks(path)
    }

    fn portfolio(
        &self,
        path: &Path,
        risk_factors: &HashSet<RiskFactor>,
    ) -> Result<Vec<PortfolioExposure>, LoadError> {
        loaders::load_portfolio(path, risk_factors)
    }
}

impl<T: SimmDataLoader + ?Sized> SimmDataLoader for &T {
    fn risk_factor_definitions(
        &self,
        path: &Path,
    ) -> Result<HashMap<RiskFactor, RiskFactorProperties>, LoadError> {
        (**self).risk_factor_definitions(path)
    }

    fn risk_factor_base_levels(&self, path: &Path) -> Result<HashMap<RiskFactor, f64>, LoadError> {
        (**self).risk_factor_base_levels(path)
    }

    fn fx_rates(&self, path: &Path) -> Result<FxMatrix, LoadError> {
        (**self).fx_rates(path)
    }

    fn risk_factor_shocks(&self, path: &Path) -> Result<HashMap<RiskFactor, Vec<f64>>, LoadError> {
        (**self).risk_factor_shocks(path)
    }

    fn fx_shocks(&self, path: &Path) -> Result<HashMap<CurrencyPair, Vec<f64>>, LoadError> {
        (**self).fx_shocks(path)
    }

    fn portfolio(
        &self,
        path: &Path,
        risk_factors: &HashSet<RiskFactor>,
    ) -> Result<Vec<PortfolioExposure>, LoadError> {
        (**self).portfolio(path, risk_factors)
    }
}
