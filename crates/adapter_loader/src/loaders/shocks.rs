//! Historical shock series for risk factors and FX rates.
//!
//! Both files carry one scenario per column after the key columns. The
//! scenario labels in the header are informational; column order is the
//! scenario order.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use pricer_core::types::{Currency, CurrencyPair};
use pricer_risk::RiskFactor;

use super::table::{open, Table};
use crate::error::LoadError;

fn require_scenarios(table: &Table) -> Result<(), LoadError> {
    if table.extra_headers().next().is_none() {
        return Err(table.malformed(1, "no scenario columns"));
    }
    Ok(())
}

/// Reads risk factor shock series.
///
/// ```text
/// RiskFactor,2020-01-02,2020-01-03,...
/// USD-IRS-5Y,0.0001,-0.0003,...
/// ```
pub fn read_risk_factor_shocks<R: Read>(
    reader: R,
    file: &str,
) -> Result<HashMap<RiskFactor, Vec<f64>>, LoadError> {
    let table = Table::read(reader, file, &["RiskFactor"])?;
    require_scenarios(&table)?;
    let mut shocks = HashMap::with_capacity(table.len());

    for row in table.rows() {
        let factor = RiskFactor::new(row.required(0)?);
        let series = row.numbers_from(1)?;
        if shocks.contains_key(&factor) {
            return Err(row.duplicate(&factor));
        }
        shocks.insert(factor, series);
    }

    tracing::debug!(
        file = %table.file(),
        risk_factors = shocks.len(),
        scenarios = table.extra_headers().count(),
        "Loaded risk factor shocks"
    );
    Ok(shocks)
}

/// Loads risk factor shock series from `path`.
pub fn load_risk_factor_shocks(path: &Path) -> Result<HashMap<RiskFactor, Vec<f64>>, LoadError> {
    let (handle, file) = open(path)?;
    read_risk_factor_shocks(handle, &file)
}

/// Reads relative FX shock series keyed by ordered currency pair.
///
/// ```text
/// Base,Quote,2020-01-02,2020-01-03,...
/// EUR,USD,0.002,-0.001,...
/// ```
pub fn read_fx_shocks<R: Read>(
    reader: R,
    file: &str,
) -> Result<HashMap<CurrencyPair, Vec<f64>>, LoadError> {
    let table = Table::read(reader, file, &["Base", "Quote"])?;
    require_scenarios(&table)?;
    let mut shocks = HashMap::with_capacity(table.len());

    for row in table.rows() {
        let base: Currency = row.parse(0)?;
        let quote: Currency = row.parse(1)?;
        let pair = CurrencyPair::new(base, quote).map_err(|e| row.malformed(e.to_string()))?;
        let series = row.numbers_from(2)?;
        if shocks.contains_key(&pair) {
            return Err(row.duplicate(pair));
        }
        shocks.insert(pair, series);
    }

    tracing::debug!(
        file = %table.file(),
        pairs = shocks.len(),
        scenarios = table.extra_headers().count(),
        "Loaded FX shocks"
    );
    Ok(shocks)
}

/// Loads FX shock series from `path`.
pub fn load_fx_shocks(path: &Path) -> Result<HashMap<CurrencyPair, Vec<f64>>, LoadError> {
    let (handle, file) = open(path)?;
    read_fx_shocks(handle, &file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_risk_factor_shocks_keeps_column_order() {
        let content = "RiskFactor,d1,d2,d3\nUSD-IRS-5Y,0.001,-0.002,0.0005\nSX5E,0.01,-0.05,0.02\n";
        let shocks = read_risk_factor_shocks(content.as_bytes(), "shocks.csv").unwrap();
        assert_eq!(shocks[&RiskFactor::new("USD-IRS-5Y")], vec![0.001, -0.002, 0.0005]);
        assert_eq!(shocks[&RiskFactor::new("SX5E")], vec![0.01, -0.05, 0.02]);
    }

    #[test]
    fn test_read_risk_factor_shocks_requires_scenarios() {
        let content = "RiskFactor\nSX5E\n";
        assert!(matches!(
            read_risk_factor_shocks(content.as_bytes(), "shocks.csv"),
            Err(LoadError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_read_risk_factor_shocks_bad_value() {
        let content = "RiskFactor,d1,d2\nSX5E,0.01,n/a\n";
        assert!(matches!(
            read_risk_factor_shocks(content.as_bytes(), "shocks.csv"),
            Err(LoadError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_read_fx_shocks() {
        let content = "Base,Quote,d1,d2,d3\nEUR,USD,0,0.01,-0.01\nUSD,JPY,0.002,0.001,0\n";
        let shocks = read_fx_shocks(content.as_bytes(), "fx_shocks.csv").unwrap();
        let eurusd = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
        assert_eq!(shocks[&eurusd], vec![0.0, 0.01, -0.01]);
        assert!(!shocks.contains_key(&eurusd.inverse()));
    }

    #[test]
    fn test_read_fx_shocks_duplicate_pair() {
        let content = "Base,Quote,d1\nEUR,USD,0.01\nEUR,USD,0.02\n";
        assert!(matches!(
            read_fx_shocks(content.as_bytes(), "fx_shocks.csv"),
            Err(LoadError::Duplicate { ref key, .. }) if key == "EUR/USD"
        ));
    }

    #[test]
    fn test_read_fx_shocks_same_currency() {
        let content = "Base,Quote,d1\nUSD,USD,0.01\n";
        assert!(matches!(
            read_fx_shocks(content.as_bytes(), "fx_shocks.csv"),
            Err(LoadError::Malformed { .. })
        ));
    }
}
