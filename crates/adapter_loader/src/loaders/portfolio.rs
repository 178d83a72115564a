//! Portfolio exposures.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use pricer_core::types::Currency;
use pricer_risk::{PortfolioExposure, RiskFactor};

use super::table::{open, Table};
use crate::error::LoadError;

const PORTFOLIO_HEADER: [&str; 3] = ["RiskFactor", "Amount", "Currency"];

/// Reads portfolio exposures in file order.
///
/// Every row must reference a risk factor in `risk_factors`. The same risk
/// factor may appear on several rows.
///
/// ```text
/// RiskFactor,Amount,Currency
/// USD-IRS-5Y,-125000,USD
/// ```
pub fn read_portfolio<R: Read>(
    reader: R,
    file: &str,
    risk_factors: &HashSet<RiskFactor>,
) -> Result<Vec<PortfolioExposure>, LoadError> {
    let table = Table::read(reader, file, &PORTFOLIO_HEADER)?;
    let mut exposures = Vec::with_capacity(table.len());

    for row in table.rows() {
        let factor = RiskFactor::new(row.required(0)?);
        if !risk_factors.contains(&factor) {
            return Err(LoadError::UnknownRiskFactor {
                file: file.to_string(),
                line: row.line(),
                risk_factor: factor.to_string(),
            });
        }
        let amount = row.number(1)?;
        let currency: Currency = row.parse(2)?;
        exposures.push(PortfolioExposure::new(factor, amount, currency));
    }

    tracing::debug!(file = %table.file(), exposures = exposures.len(), "Loaded portfolio");
    Ok(exposures)
}

/// Loads portfolio exposures from `path`.
pub fn load_portfolio(
    path: &Path,
    risk_factors: &HashSet<RiskFactor>,
) -> Result<Vec<PortfolioExposure>, LoadError> {
    let (handle, file) = open(path)?;
    read_portfolio(handle, &file, risk_factors)
}
