//! SIMM calculator construction and scenario P&L.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

use pricer_core::fx::FxMatrix;
use pricer_core::types::{Currency, CurrencyPair};

use super::error::CalculatorError;
use super::var::historical_var;
use crate::factors::{AssetClass, PortfolioExposure, RiskFactor, RiskFactorProperties, RiskType};

/// Scenario-ordered P&L: `(scenario index, P&L in base currency)`.
pub type PnlVector = Vec<(usize, f64)>;

/// Everything a [`SimmCalculator`] is built from.
///
/// A plain value object: fill every field, then hand it to
/// [`SimmCalculator::build`], which validates it as a whole.
#[derive(Debug, Clone)]
pub struct SimmInputs {
    /// VaR confidence level, strictly between 0 and 1
    pub var_level: f64,
    /// Currency all P&L is reported in
    pub base_currency: Currency,
    /// Risk factor definitions
    pub risk_factors: HashMap<RiskFactor, RiskFactorProperties>,
    /// Base level of each risk factor
    pub risk_factor_levels: HashMap<RiskFactor, f64>,
    /// Spot FX rates
    pub fx_matrix: FxMatrix,
    /// Historical shock series of each risk factor
    pub risk_factor_shocks: HashMap<RiskFactor, Vec<f64>>,
    /// Historical relative shock series of FX rates
    pub fx_shocks: HashMap<CurrencyPair, Vec<f64>>,
}

/// Immutable historical-simulation margin calculator.
///
/// Built once from [`SimmInputs`]; every query takes the portfolio
/// exposures as arguments and leaves the calculator unchanged.
#[derive(Debug, Clone)]
pub struct SimmCalculator {
    var_level: f64,
    base_currency: Currency,
    known: HashSet<RiskFactor>,
    properties: HashMap<RiskFactor, RiskFactorProperties>,
    /// P&L per unit of exposure amount, per scenario, in exposure currency
    unit_pnl: HashMap<RiskFactor, Vec<f64>>,
    fx_matrix: FxMatrix,
    fx_shocks: HashMap<CurrencyPair, Vec<f64>>,
    scenario_count: usize,
}

impl SimmCalculator {
    /// Validates `inputs` and builds a calculator.
    ///
    /// # Errors
    ///
    /// - `InvalidVarLevel` unless `0 < var_level < 1`
    /// - `NoRiskFactors` for an empty definition map
    /// - `MissingBaseLevel` / `MissingShocks` for a defined factor without data
    /// - `ZeroNotionalLevel` for a notional factor at level zero
    /// - `NoScenarios` / `ScenarioCountMismatch` unless every series has the same non-zero length
    /// - `InvalidShock` for non-finite shocks, or FX shocks at or below -100%
    /// - `BaseCurrencyNotInFxMatrix`
    pub fn build(inputs: SimmInputs) -> Result<Self, CalculatorError> {
        let SimmInputs {
            var_level,
            base_currency,
            risk_factors,
            risk_factor_levels,
            fx_matrix,
            risk_factor_shocks,
            fx_shocks,
        } = inputs;

        if !(var_level > 0.0 && var_level < 1.0) {
            return Err(CalculatorError::InvalidVarLevel(var_level));
        }
        if risk_factors.is_empty() {
            return Err(CalculatorError::NoRiskFactors);
        }
        if !fx_matrix.contains(base_currency) {
            return Err(CalculatorError::BaseCurrencyNotInFxMatrix(base_currency));
        }

        let mut names: Vec<&RiskFactor> = risk_factors.keys().collect();
        names.sort();

        let mut scenario_count = None;
        let mut unit_pnl = HashMap::with_capacity(risk_factors.len());
        for factor in names {
            let props = &risk_factors[factor];
            let level = *risk_factor_levels
                .get(factor)
                .ok_or_else(|| CalculatorError::MissingBaseLevel(factor.to_string()))?;
            let shocks = risk_factor_shocks
                .get(factor)
                .ok_or_else(|| CalculatorError::MissingShocks(factor.to_string()))?;
            check_series(factor.name(), shocks, &mut scenario_count, |s| s.is_finite())?;

            if props.risk_type == RiskType::Notional && level == 0.0 {
                return Err(CalculatorError::ZeroNotionalLevel(factor.to_string()));
            }

            let moves = shocks
                .iter()
                .map(|&shock| {
                    let change = props.shock_type.level_change(level, shock);
                    match props.risk_type {
                        RiskType::Sensitivity => change,
                        RiskType::Notional => change / level,
                    }
                })
                .collect();
            unit_pnl.insert(factor.clone(), moves);
        }

        let mut pairs: Vec<&CurrencyPair> = fx_shocks.keys().collect();
        pairs.sort();
        for pair in pairs {
            check_series(&pair.code(), &fx_shocks[pair], &mut scenario_count, |s| {
                s.is_finite() && s > -1.0
            })?;
        }

        let ignored_levels = risk_factor_levels
            .keys()
            .filter(|f| !risk_factors.contains_key(*f))
            .count();
        let ignored_shocks = risk_factor_shocks
            .keys()
            .filter(|f| !risk_factors.contains_key(*f))
            .count();
        if ignored_levels > 0 || ignored_shocks > 0 {
            tracing::debug!(
                ignored_levels,
                ignored_shocks,
                "Ignoring levels and shocks of undefined risk factors"
            );
        }

        let scenario_count = scenario_count.ok_or(CalculatorError::NoScenarios)?;
        tracing::debug!(
            risk_factors = risk_factors.len(),
            fx_pairs = fx_shocks.len(),
            scenarios = scenario_count,
            base_currency = %base_currency,
            var_level,
            "Built SIMM calculator"
        );

        Ok(Self {
            var_level,
            base_currency,
            known: risk_factors.keys().cloned().collect(),
            properties: risk_factors,
            unit_pnl,
            fx_matrix,
            fx_shocks,
            scenario_count,
        })
    }

    /// The risk factors this calculator was built with.
    pub fn risk_factors(&self) -> &HashSet<RiskFactor> {
        &self.known
    }

    /// Classification of a known risk factor.
    pub fn properties(&self, factor: &RiskFactor) -> Option<&RiskFactorProperties> {
        self.properties.get(factor)
    }

    /// VaR confidence level.
    pub fn var_level(&self) -> f64 {
        self.var_level
    }

    /// Reporting currency.
    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    /// Number of historical scenarios.
    pub fn scenario_count(&self) -> usize {
        self.scenario_count
    }

    /// Scenario P&L per asset class over all three exposure sets.
    ///
    /// Only asset classes with at least one exposure appear. Each vector
    /// holds one `(scenario index, P&L)` entry per scenario in scenario order.
    ///
    /// # Errors
    ///
    /// - `UnknownRiskFactor` if an exposure's factor was not defined
    /// - `MissingFxShocks` / `Fx` if an exposure currency cannot be converted
    pub fn pnl_vectors_by_asset_class(
        &self,
        derivatives: &[PortfolioExposure],
        initial_margin: &[PortfolioExposure],
        variation_margin: &[PortfolioExposure],
    ) -> Result<BTreeMap<AssetClass, PnlVector>, CalculatorError> {
        let totals = self.scenario_pnl(derivatives, initial_margin, variation_margin)?;
        Ok(totals
            .into_iter()
            .map(|(class, pnl)| (class, pnl.into_iter().enumerate().collect()))
            .collect())
    }

    /// Historical VaR per asset class over all three exposure sets.
    ///
    /// See [`historical_var`] for the quantile convention.
    pub fn var_by_asset_class(
        &self,
        derivatives: &[PortfolioExposure],
        initial_margin: &[PortfolioExposure],
        variation_margin: &[PortfolioExposure],
    ) -> Result<BTreeMap<AssetClass, f64>, CalculatorError> {
        let totals = self.scenario_pnl(derivatives, initial_margin, variation_margin)?;
        Ok(totals
            .into_iter()
            .map(|(class, pnl)| (class, historical_var(&pnl, self.var_level)))
            .collect())
    }

    fn scenario_pnl(
        &self,
        derivatives: &[PortfolioExposure],
        initial_margin: &[PortfolioExposure],
        variation_margin: &[PortfolioExposure],
    ) -> Result<BTreeMap<AssetClass, Vec<f64>>, CalculatorError> {
        let mut totals: BTreeMap<AssetClass, Vec<f64>> = BTreeMap::new();
        let mut conversions: HashMap<Currency, Vec<f64>> = HashMap::new();

        for exposure in derivatives
            .iter()
            .chain(initial_margin)
            .chain(variation_margin)
        {
            let unknown = || CalculatorError::UnknownRiskFactor(exposure.risk_factor.to_string());
            let props = self.properties.get(&exposure.risk_factor).ok_or_else(unknown)?;
            let moves = self.unit_pnl.get(&exposure.risk_factor).ok_or_else(unknown)?;

            let fx = match conversions.entry(exposure.currency) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(self.conversion_factors(exposure.currency)?),
            };

            let bucket = totals
                .entry(props.asset_class)
                .or_insert_with(|| vec![0.0; self.scenario_count]);
            for ((total, unit), rate) in bucket.iter_mut().zip(moves).zip(fx.iter()) {
                *total += exposure.amount * unit * rate;
            }
        }

        Ok(totals)
    }

    /// Shocked conversion rate from `currency` into the base currency,
    /// per scenario.
    fn conversion_factors(&self, currency: Currency) -> Result<Vec<f64>, CalculatorError> {
        if currency == self.base_currency {
            return Ok(vec![1.0; self.scenario_count]);
        }
        let spot = self.fx_matrix.rate(currency, self.base_currency)?;
        let pair = CurrencyPair::new(currency, self.base_currency)?;

        if let Some(shocks) = self.fx_shocks.get(&pair) {
            Ok(shocks.iter().map(|y| spot * (1.0 + y)).collect())
        } else if let Some(shocks) = self.fx_shocks.get(&pair.inverse()) {
            Ok(shocks.iter().map(|y| spot / (1.0 + y)).collect())
        } else {
            Err(CalculatorError::MissingFxShocks(pair))
        }
    }
}

/// Checks a shock series against the scenario count seen so far and
/// against `valid` for each value.
fn check_series(
    series: &str,
    shocks: &[f64],
    scenario_count: &mut Option<usize>,
    valid: impl Fn(f64) -> bool,
) -> Result<(), CalculatorError> {
    match *scenario_count {
        None if shocks.is_empty() => return Err(CalculatorError::NoScenarios),
        None => *scenario_count = Some(shocks.len()),
        Some(expected) if expected != shocks.len() => {
            return Err(CalculatorError::ScenarioCountMismatch {
                series: series.to_string(),
                expected,
                actual: shocks.len(),
            })
        }
        Some(_) => {}
    }
    if let Some(&value) = shocks.iter().find(|&&s| !valid(s)) {
        return Err(CalculatorError::InvalidShock {
            series: series.to_string(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::ShockType;
    use approx::assert_relative_eq;

    fn ir() -> RiskFactor {
        RiskFactor::new("USD-IRS-5Y")
    }

    fn eq() -> RiskFactor {
        RiskFactor::new("SX5E")
    }

    fn inputs() -> SimmInputs {
        let mut fx = FxMatrix::builder();
        fx.add_rate(Currency::EUR, Currency::USD, 1.10).unwrap();

        SimmInputs {
            var_level: 0.99,
            base_currency: Currency::USD,
            risk_factors: HashMap::from([
                (
                    ir(),
                    RiskFactorProperties::new(
                        AssetClass::InterestRate,
                        RiskType::Sensitivity,
                        ShockType::Absolute,
                    ),
                ),
                (
                    eq(),
                    RiskFactorProperties::new(
                        AssetClass::Equity,
                        RiskType::Notional,
                        ShockType::Relative,
                    ),
                ),
            ]),
            risk_factor_levels: HashMap::from([(ir(), 0.02), (eq(), 4000.0)]),
            fx_matrix: fx.build().unwrap(),
            risk_factor_shocks: HashMap::from([
                (ir(), vec![0.001, -0.002, 0.0005]),
                (eq(), vec![0.01, -0.05, 0.02]),
            ]),
            fx_shocks: HashMap::from([(
                CurrencyPair::new(Currency::EUR, Currency::USD).unwrap(),
                vec![0.0, 0.01, -0.01],
            )]),
        }
    }

    #[test]
    fn test_build_exposes_risk_factors() {
        let calc = SimmCalculator::build(inputs()).unwrap();
        let expected: HashSet<RiskFactor> = [ir(), eq()].into_iter().collect();
        assert_eq!(calc.risk_factors(), &expected);
        assert_eq!(calc.scenario_count(), 3);
        assert_eq!(calc.base_currency(), Currency::USD);
        assert_eq!(calc.var_level(), 0.99);
    }

    #[test]
    fn test_sensitivity_pnl_in_base_currency() {
        let calc = SimmCalculator::build(inputs()).unwrap();
        let derivatives = vec![PortfolioExposure::new(ir(), 1_000_000.0, Currency::USD)];

        let pnl = calc
            .pnl_vectors_by_asset_class(&derivatives, &[], &[])
            .unwrap();
        assert_eq!(pnl.len(), 1);

        let vector = &pnl[&AssetClass::InterestRate];
        let expected = [1000.0, -2000.0, 500.0];
        assert_eq!(vector.len(), 3);
        for (i, (index, value)) in vector.iter().enumerate() {
            assert_eq!(*index, i);
            assert_relative_eq!(*value, expected[i], max_relative = 1e-12);
        }
    }

    #[test]
    fn test_notional_pnl_converted_at_shocked_fx() {
        let calc = SimmCalculator::build(inputs()).unwrap();
        let derivatives = vec![PortfolioExposure::new(eq(), 500.0, Currency::EUR)];

        let pnl = calc
            .pnl_vectors_by_asset_class(&derivatives, &[], &[])
            .unwrap();
        let values: Vec<f64> = pnl[&AssetClass::Equity].iter().map(|(_, v)| *v).collect();

        assert_relative_eq!(values[0], 500.0 * 0.01 * 1.10, max_relative = 1e-12);
        assert_relative_eq!(values[1], 500.0 * -0.05 * 1.10 * 1.01, max_relative = 1e-12);
        assert_relative_eq!(values[2], 500.0 * 0.02 * 1.10 * 0.99, max_relative = 1e-12);
    }

    #[test]
    fn test_inverse_fx_shocks_are_used() {
        let mut inputs = inputs();
        inputs.fx_shocks = HashMap::from([(
            CurrencyPair::new(Currency::USD, Currency::EUR).unwrap(),
            vec![0.0, 0.25, 0.0],
        )]);
        let calc = SimmCalculator::build(inputs).unwrap();
        let derivatives = vec![PortfolioExposure::new(eq(), 100.0, Currency::EUR)];

        let pnl = calc
            .pnl_vectors_by_asset_class(&derivatives, &[], &[])
            .unwrap();
        let (_, second) = pnl[&AssetClass::Equity][1];
        assert_relative_eq!(second, 100.0 * -0.05 * 1.10 / 1.25, max_relative = 1e-12);
    }

    #[test]
    fn test_var_by_asset_class() {
        let calc = SimmCalculator::build(inputs()).unwrap();
        let derivatives = vec![
            PortfolioExposure::new(ir(), 1_000_000.0, Currency::USD),
            PortfolioExposure::new(eq(), 500.0, Currency::EUR),
        ];

        let var = calc.var_by_asset_class(&derivatives, &[], &[]).unwrap();
        assert_eq!(
            var.keys().copied().collect::<Vec<_>>(),
            vec![AssetClass::InterestRate, AssetClass::Equity]
        );
        assert_relative_eq!(var[&AssetClass::InterestRate], 2000.0, max_relative = 1e-12);
        assert_relative_eq!(
            var[&AssetClass::Equity],
            500.0 * 0.05 * 1.10 * 1.01,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_margin_exposures_are_included() {
        let calc = SimmCalculator::build(inputs()).unwrap();
        let derivatives = vec![PortfolioExposure::new(ir(), 1_000_000.0, Currency::USD)];
        let initial_margin = vec![PortfolioExposure::new(ir(), -400_000.0, Currency::USD)];
        let variation_margin = vec![PortfolioExposure::new(eq(), 1_000.0, Currency::USD)];

        let without = calc.var_by_asset_class(&derivatives, &[], &[]).unwrap();
        let with = calc
            .var_by_asset_class(&derivatives, &initial_margin, &variation_margin)
            .unwrap();

        assert_relative_eq!(without[&AssetClass::InterestRate], 2000.0, max_relative = 1e-12);
        assert_relative_eq!(with[&AssetClass::InterestRate], 1200.0, max_relative = 1e-12);
        assert!(with.contains_key(&AssetClass::Equity));
        assert!(!without.contains_key(&AssetClass::Equity));
    }

    #[test]
    fn test_empty_portfolio_gives_empty_results() {
        let calc = SimmCalculator::build(inputs()).unwrap();
        assert!(calc.var_by_asset_class(&[], &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_exposure_factor() {
        let calc = SimmCalculator::build(inputs()).unwrap();
        let derivatives = vec![PortfolioExposure::new(
            RiskFactor::new("GBP-IRS-2Y"),
            1.0,
            Currency::USD,
        )];
        assert_eq!(
            calc.var_by_asset_class(&derivatives, &[], &[]),
            Err(CalculatorError::UnknownRiskFactor("GBP-IRS-2Y".to_string()))
        );
    }

    #[test]
    fn test_missing_fx_shocks() {
        let mut inputs = inputs();
        inputs.fx_shocks.clear();
        let calc = SimmCalculator::build(inputs).unwrap();
        let derivatives = vec![PortfolioExposure::new(eq(), 1.0, Currency::EUR)];
        assert!(matches!(
            calc.var_by_asset_class(&derivatives, &[], &[]),
            Err(CalculatorError::MissingFxShocks(_))
        ));
    }

    #[test]
    fn test_build_rejects_invalid_var_level() {
        for level in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let mut inputs = inputs();
            inputs.var_level = level;
            assert!(matches!(
                SimmCalculator::build(inputs),
                Err(CalculatorError::InvalidVarLevel(_))
            ));
        }
    }

    #[test]
    fn test_build_rejects_missing_data() {
        let mut no_level = inputs();
        no_level.risk_factor_levels.remove(&eq());
        assert_eq!(
            SimmCalculator::build(no_level).unwrap_err(),
            CalculatorError::MissingBaseLevel("SX5E".to_string())
        );

        let mut no_shocks = inputs();
        no_shocks.risk_factor_shocks.remove(&ir());
        assert_eq!(
            SimmCalculator::build(no_shocks).unwrap_err(),
            CalculatorError::MissingShocks("USD-IRS-5Y".to_string())
        );

        let mut no_factors = inputs();
        no_factors.risk_factors.clear();
        assert_eq!(
            SimmCalculator::build(no_factors).unwrap_err(),
            CalculatorError::NoRiskFactors
        );
    }

    #[test]
    fn test_build_rejects_scenario_mismatch() {
        let mut inputs = inputs();
        inputs
            .risk_factor_shocks
            .insert(eq(), vec![0.01, -0.05]);
        assert!(matches!(
            SimmCalculator::build(inputs),
            Err(CalculatorError::ScenarioCountMismatch { .. })
        ));
    }

    #[test]
    fn test_build_rejects_invalid_fx_shock() {
        let mut inputs = inputs();
        inputs.fx_shocks.insert(
            CurrencyPair::new(Currency::EUR, Currency::USD).unwrap(),
            vec![0.0, -1.0, 0.0],
        );
        assert!(matches!(
            SimmCalculator::build(inputs),
            Err(CalculatorError::InvalidShock { .. })
        ));
    }

    #[test]
    fn test_build_rejects_zero_notional_level() {
        let mut inputs = inputs();
        inputs.risk_factor_levels.insert(eq(), 0.0);
        assert_eq!(
            SimmCalculator::build(inputs).unwrap_err(),
            CalculatorError::ZeroNotionalLevel("SX5E".to_string())
        );
    }

    #[test]
    fn test_build_requires_base_currency_in_fx_matrix() {
        let mut inputs = inputs();
        inputs.base_currency = Currency::JPY;
        assert_eq!(
            SimmCalculator::build(inputs).unwrap_err(),
            CalculatorError::BaseCurrencyNotInFxMatrix(Currency::JPY)
        );
    }

    #[test]
    fn test_levels_for_undefined_factors_are_ignored() {
        let mut inputs = inputs();
        inputs
            .risk_factor_levels
            .insert(RiskFactor::new("UNUSED"), 1.0);
        inputs
            .risk_factor_shocks
            .insert(RiskFactor::new("UNUSED"), vec![1.0]);
        let calc = SimmCalculator::build(inputs).unwrap();
        assert!(!calc.risk_factors().contains(&RiskFactor::new("UNUSED")));
    }
}
