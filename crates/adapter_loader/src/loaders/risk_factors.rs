//! Risk factor definitions and base levels.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use pricer_risk::{AssetClass, RiskFactor, RiskFactorProperties, RiskType, ShockType};

use super::table::{open, Table};
use crate::error::LoadError;

const DEFINITION_HEADER: [&str; 4] = ["RiskFactor", "AssetClass", "RiskType", "ShockType"];
const BASE_LEVEL_HEADER: [&str; 2] = ["RiskFactor", "BaseLevel"];

/// Reads risk factor definitions.
///
/// ```text
/// RiskFactor,AssetClass,RiskType,ShockType
/// USD-IRS-5Y,InterestRate,Sensitivity,Absolute
/// SX5E,Equity,Notional,Relative
/// ```
pub fn read_risk_factor_definitions<R: Read>(
    reader: R,
    file: &str,
) -> Result<HashMap<RiskFactor, RiskFactorProperties>, LoadError> {
    let table = Table::read(reader, file, &DEFINITION_HEADER)?;
    let mut definitions = HashMap::with_capacity(table.len());

    for row in table.rows() {
        let factor = RiskFactor::new(row.required(0)?);
        let properties = RiskFactorProperties::new(
            row.parse::<AssetClass>(1)?,
            row.parse::<RiskType>(2)?,
            row.parse::<ShockType>(3)?,
        );
        if definitions.contains_key(&factor) {
            return Err(row.duplicate(&factor));
        }
        definitions.insert(factor, properties);
    }

    tracing::debug!(
        file = %table.file(),
        risk_factors = definitions.len(),
        "Loaded risk factor definitions"
    );
    Ok(definitions)
}

/// Loads risk factor definitions from `path`.
pub fn load_risk_factor_definitions(
    path: &Path,
) -> Result<HashMap<RiskFactor, RiskFactorProperties>, LoadError> {
    let (handle, file) = open(path)?;
    read_risk_factor_definitions(handle, &file)
}

/// Reads risk factor base levels.
///
/// ```text
/// RiskFactor,BaseLevel
/// USD-IRS-5Y,0.025
/// ```
pub fn read_risk_factor_base_levels<R: Read>(
    reader: R,
    file: &str,
) -> Result<HashMap<RiskFactor, f64>, LoadError> {
    let table = Table::read(reader, file, &BASE_LEVEL_HEADER)?;
    let mut levels = HashMap::with_capacity(table.len());

    for row in table.rows() {
        let factor = RiskFactor::new(row.required(0)?);
        let level = row.number(1)?;
        if levels.contains_key(&factor) {
            return Err(row.duplicate(&factor));
        }
        levels.insert(factor, level);
    }

    tracing::debug!(
        file = %table.file(),
        risk_factors = levels.len(),
        "Loaded risk factor base levels"
    );
    Ok(levels)
}

/// Loads risk factor base levels from `path`.
pub fn load_risk_factor_base_levels(path: &Path) -> Result<HashMap<RiskFactor, f64>, LoadError> {
    let (handle, file) = open(path)?;
    read_risk_factor_base_levels(handle, &file)
}
