//! FX rates.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use pricer_core::fx::FxMatrix;
use pricer_core::types::{Currency, CurrencyPair};

use super::table::{open, Table};
use crate::error::LoadError;

const FX_RATE_HEADER: [&str; 3] = ["Base", "Quote", "Rate"];

/// Reads spot FX quotes into an [`FxMatrix`].
///
/// Each row quotes the number of `Quote` units per one `Base` unit. Every
/// currency must be reachable from the first row's base currency.
///
/// ```text
/// Base,Quote,Rate
/// EUR,USD,1.10
/// USD,JPY,150.0
/// ```
pub fn read_fx_rates<R: Read>(reader: R, file: &str) -> Result<FxMatrix, LoadError> {
    let table = Table::read(reader, file, &FX_RATE_HEADER)?;
    let mut builder = FxMatrix::builder();
    let mut seen = HashSet::with_capacity(table.len());

    for row in table.rows() {
        let base: Currency = row.parse(0)?;
        let quote: Currency = row.parse(1)?;
        let pair = CurrencyPair::new(base, quote).map_err(|e| row.malformed(e.to_string()))?;
        if !seen.insert(pair) {
            return Err(row.duplicate(pair));
        }
        let rate = row.number(2)?;
        builder
            .add_rate(base, quote, rate)
            .map_err(|e| row.malformed(e.to_string()))?;
    }

    let matrix = builder.build().map_err(|source| LoadError::Fx {
        file: file.to_string(),
        source,
    })?;
    tracing::debug!(file = %table.file(), currencies = matrix.len(), "Loaded FX rates");
    Ok(matrix)
}

/// Loads spot FX quotes from `path`.
pub fn load_fx_rates(path: &Path) -> Result<FxMatrix, LoadError> {
    let (handle, file) = open(path)?;
    read_fx_rates(handle, &file)
}
