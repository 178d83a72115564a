//! Configuration-driven assembly of a [`SimmCalculator`].
//!
//! ## Flow
//!
//! ```text
//! Properties ──new()──▶ PropertyFileLoader (resolved settings, paths checked)
//!                              │
//!      create_simm_calculator  │  definitions, levels, FX, shocks ─▶ SimmCalculator
//!      calculate_var           │  + derivatives, IM, VM            ─▶ VaR by asset class
//!      calculate_pnl_vectors   │  + derivatives, IM, VM            ─▶ P&L by asset class
//! ```
//!
//! Nothing is cached: every query reloads all inputs and rebuilds the
//! calculator.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use infra_config::Properties;
use pricer_core::types::Currency;
use pricer_risk::{
    AssetClass, PnlVector, PortfolioExposure, RiskFactor, SimmCalculator, SimmInputs,
};

use crate::data_loader::{CsvDataLoader, SimmDataLoader};
use crate::error::SimmError;

/// Configuration keys understood by [`PropertyFileLoader`].
pub mod keys {
    /// VaR confidence level (optional)
    pub const VAR_LEVEL: &str = "var-level";
    /// Reporting currency ISO code
    pub const BASE_CURRENCY: &str = "base-currency";
    /// Risk factor definitions file
    pub const RISK_FACTOR_DEFINITIONS: &str = "risk-factor-definitions";
    /// Risk factor base levels file
    pub const RISK_FACTOR_BASE_LEVELS: &str = "risk-factor-base-levels";
    /// Risk factor shocks file
    pub const RISK_FACTOR_SHOCKS: &str = "risk-factor-shocks";
    /// Spot FX rates file
    pub const FX_RATES: &str = "fx-rates";
    /// FX shocks file
    pub const FX_RATE_SHOCKS: &str = "fx-rate-shocks";
    /// Derivatives portfolio file
    pub const PORTFOLIO_DERIVATIVES: &str = "portfolio-derivatives";
    /// Initial margin portfolio file (optional)
    pub const PORTFOLIO_INITIAL_MARGIN: &str = "portfolio-initial-margin";
    /// Variation margin portfolio file (optional)
    pub const PORTFOLIO_VARIATION_MARGIN: &str = "portfolio-variation-margin";

    /// Every key in resolution order.
    pub const ALL: [&str; 10] = [
        VAR_LEVEL,
        BASE_CURRENCY,
        RISK_FACTOR_DEFINITIONS,
        RISK_FACTOR_BASE_LEVELS,
        RISK_FACTOR_SHOCKS,
        FX_RATES,
        FX_RATE_SHOCKS,
        PORTFOLIO_DERIVATIVES,
        PORTFOLIO_INITIAL_MARGIN,
        PORTFOLIO_VARIATION_MARGIN,
    ];
}

/// VaR level used when `var-level` is not configured.
pub const DEFAULT_VAR_LEVEL: f64 = 0.99;

/// Resolves SIMM configuration to input files and runs calculations on them.
///
/// # Examples
///
/// ```no_run
/// use adapter_loader::PropertyFileLoader;
/// use infra_config::Properties;
///
/// let props = Properties::load("simm.properties")?;
/// let loader = PropertyFileLoader::new(&props)?;
/// for (asset_class, var) in loader.calculate_var()? {
///     println!("{asset_class}: {var:.2}");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PropertyFileLoader<L = CsvDataLoader> {
    var_level: f64,
    base_currency: Currency,
    risk_factor_definitions: PathBuf,
    risk_factor_base_levels: PathBuf,
    risk_factor_shocks: PathBuf,
    fx_rates: PathBuf,
    fx_rate_shocks: PathBuf,
    derivatives: PathBuf,
    initial_margin: Option<PathBuf>,
    variation_margin: Option<PathBuf>,
    loader: L,
}

impl PropertyFileLoader<CsvDataLoader> {
    /// Resolves `props` for the CSV loaders.
    ///
    /// # Errors
    ///
    /// - `InvalidNumericValue` if `var-level` or `base-currency` cannot be parsed
    /// - `MissingConfiguration` if a required key is absent
    /// - `FileNotFound` if a configured file does not exist
    pub fn new(props: &Properties) -> Result<Self, SimmError> {
        Self::with_loader(props, CsvDataLoader)
    }
}

impl<L: SimmDataLoader> PropertyFileLoader<L> {
    /// Resolves `props`, reading inputs through `loader`.
    ///
    /// Only file existence is checked here; no file is read.
    pub fn with_loader(props: &Properties, loader: L) -> Result<Self, SimmError> {
        let var_level = match props.get(keys::VAR_LEVEL) {
            Some(text) => parse_var_level(text)?,
            None => DEFAULT_VAR_LEVEL,
        };

        let currency_text = required_value(props, keys::BASE_CURRENCY)?;
        let base_currency = currency_text
            .parse::<Currency>()
            .map_err(|_| SimmError::InvalidNumericValue {
                key: keys::BASE_CURRENCY.to_string(),
                value: currency_text.to_string(),
            })?;

        let resolved = Self {
            var_level,
            base_currency,
            risk_factor_definitions: required_file(props, keys::RISK_FACTOR_DEFINITIONS)?,
            risk_factor_base_levels: required_file(props, keys::RISK_FACTOR_BASE_LEVELS)?,
            risk_factor_shocks: required_file(props, keys::RISK_FACTOR_SHOCKS)?,
            fx_rates: required_file(props, keys::FX_RATES)?,
            fx_rate_shocks: required_file(props, keys::FX_RATE_SHOCKS)?,
            derivatives: required_file(props, keys::PORTFOLIO_DERIVATIVES)?,
            initial_margin: optional_file(props, keys::PORTFOLIO_INITIAL_MARGIN)?,
            variation_margin: optional_file(props, keys::PORTFOLIO_VARIATION_MARGIN)?,
            loader,
        };

        tracing::info!(
            var_level = resolved.var_level,
            base_currency = %resolved.base_currency,
            initial_margin = resolved.initial_margin.is_some(),
            variation_margin = resolved.variation_margin.is_some(),
            "Resolved SIMM configuration"
        );
        Ok(resolved)
    }

    /// Configured VaR level.
    pub fn var_level(&self) -> f64 {
        self.var_level
    }

    /// Configured reporting currency.
    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    /// Initial margin portfolio path, if configured.
    pub fn initial_margin(&self) -> Option<&Path> {
        self.initial_margin.as_deref()
    }

    /// Variation margin portfolio path, if configured.
    pub fn variation_margin(&self) -> Option<&Path> {
        self.variation_margin.as_deref()
    }

    /// The loader inputs are read through.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Loads the market inputs and builds a calculator.
    ///
    /// Inputs are read in this order: definitions, base levels, FX rates,
    /// risk factor shocks, FX shocks.
    pub fn create_simm_calculator(&self) -> Result<SimmCalculator, SimmError> {
        let inputs = SimmInputs {
            var_level: self.var_level,
            base_currency: self.base_currency,
            risk_factors: self
                .loader
                .risk_factor_definitions(&self.risk_factor_definitions)?,
            risk_factor_levels: self
                .loader
                .risk_factor_base_levels(&self.risk_factor_base_levels)?,
            fx_matrix: self.loader.fx_rates(&self.fx_rates)?,
            risk_factor_shocks: self.loader.risk_factor_shocks(&self.risk_factor_shocks)?,
            fx_shocks: self.loader.fx_shocks(&self.fx_rate_shocks)?,
        };
        Ok(SimmCalculator::build(inputs)?)
    }

    /// Historical VaR per asset class over derivatives and margin.
    pub fn calculate_var(&self) -> Result<BTreeMap<AssetClass, f64>, SimmError> {
        let calculator = self.create_simm_calculator()?;
        let (derivatives, initial_margin, variation_margin) =
            self.load_portfolios(calculator.risk_factors())?;

        let var = calculator.var_by_asset_class(&derivatives, &initial_margin, &variation_margin)?;
        tracing::info!(asset_classes = var.len(), "Calculated VaR");
        Ok(var)
    }

    /// Scenario P&L per asset class over derivatives and margin.
    pub fn calculate_pnl_vectors(&self) -> Result<BTreeMap<AssetClass, PnlVector>, SimmError> {
        let calculator = self.create_simm_calculator()?;
        let (derivatives, initial_margin, variation_margin) =
            self.load_portfolios(calculator.risk_factors())?;

        let pnl = calculator.pnl_vectors_by_asset_class(
            &derivatives,
            &initial_margin,
            &variation_margin,
        )?;
        tracing::info!(
            asset_classes = pnl.len(),
            scenarios = calculator.scenario_count(),
            "Calculated P&L vectors"
        );
        Ok(pnl)
    }

    #[allow(clippy::type_complexity)]
    fn load_portfolios(
        &self,
        risk_factors: &HashSet<RiskFactor>,
    ) -> Result<
        (
            Vec<PortfolioExposure>,
            Vec<PortfolioExposure>,
            Vec<PortfolioExposure>,
        ),
        SimmError,
    > {
        let derivatives = self.loader.portfolio(&self.derivatives, risk_factors)?;
        let initial_margin = self.optional_portfolio(self.initial_margin.as_deref(), risk_factors)?;
        let variation_margin =
            self.optional_portfolio(self.variation_margin.as_deref(), risk_factors)?;
        Ok((derivatives, initial_margin, variation_margin))
    }

    fn optional_portfolio(
        &self,
        path: Option<&Path>,
        risk_factors: &HashSet<RiskFactor>,
    ) -> Result<Vec<PortfolioExposure>, SimmError> {
        match path {
            Some(path) => Ok(self.loader.portfolio(path, risk_factors)?),
            None => Ok(Vec::new()),
        }
    }
}

fn parse_var_level(text: &str) -> Result<f64, SimmError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| SimmError::InvalidNumericValue {
            key: keys::VAR_LEVEL.to_string(),
            value: text.to_string(),
        })
}

fn required_value<'a>(props: &'a Properties, key: &str) -> Result<&'a str, SimmError> {
    props
        .get(key)
        .ok_or_else(|| SimmError::MissingConfiguration {
            key: key.to_string(),
        })
}

fn existing_file(key: &str, value: &str) -> Result<PathBuf, SimmError> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err(SimmError::FileNotFound {
            path,
            key: key.to_string(),
        });
    }
    Ok(path)
}

fn required_file(props: &Properties, key: &str) -> Result<PathBuf, SimmError> {
    existing_file(key, required_value(props, key)?)
}

fn optional_file(props: &Properties, key: &str) -> Result<Option<PathBuf>, SimmError> {
    props
        .get(key)
        .map(|value| existing_file(key, value))
        .transpose()
}
