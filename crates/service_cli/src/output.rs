//! Rendering of VaR and P&L results.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use clap::ValueEnum;
use pricer_risk::{AssetClass, PnlVector};

use crate::Result;

/// Output format of the `var` and `pnl` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// Comma separated values with a header row
    Csv,
    /// Pretty-printed JSON object keyed by asset class
    Json,
}

/// Renders VaR by asset class.
///
/// No total row is written: VaR is not additive across asset classes.
pub fn render_var(var: &BTreeMap<AssetClass, f64>, format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Table => {
            let _ = writeln!(out, "{:<14} {:>18}", "Asset Class", "VaR");
            let _ = writeln!(out, "{}", "-".repeat(33));
            for (class, value) in var {
                let _ = writeln!(out, "{:<14} {:>18.2}", class.name(), value);
            }
        }
        OutputFormat::Csv => {
            out.push_str("AssetClass,VaR\n");
            for (class, value) in var {
                let _ = writeln!(out, "{},{}", class.name(), value);
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(var)?;
            out.push('\n');
        }
    }
    Ok(out)
}

/// Renders scenario P&L by asset class.
///
/// Table and CSV output have one row per scenario and one column per asset
/// class.
pub fn render_pnl(pnl: &BTreeMap<AssetClass, PnlVector>, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let mut out = serde_json::to_string_pretty(pnl)?;
        out.push('\n');
        return Ok(out);
    }

    let classes: Vec<&AssetClass> = pnl.keys().collect();
    let scenarios = pnl.values().map(Vec::len).max().unwrap_or(0);
    let mut out = String::new();

    match format {
        OutputFormat::Csv => {
            out.push_str("Scenario");
            for class in &classes {
                let _ = write!(out, ",{}", class.name());
            }
            out.push('\n');
            for s in 0..scenarios {
                let _ = write!(out, "{s}");
                for class in &classes {
                    let value = pnl[*class].get(s).map_or(0.0, |(_, v)| *v);
                    let _ = write!(out, ",{value}");
                }
                out.push('\n');
            }
        }
        _ => {
            let _ = write!(out, "{:>8}", "Scenario");
            for class in &classes {
                let _ = write!(out, " {:>16}", class.name());
            }
            out.push('\n');
            for s in 0..scenarios {
                let _ = write!(out, "{s:>8}");
                for class in &classes {
                    let value = pnl[*class].get(s).map_or(0.0, |(_, v)| *v);
                    let _ = write!(out, " {value:>16.2}");
                }
                out.push('\n');
            }
        }
    }
    Ok(out)
}
