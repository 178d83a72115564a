//! P&L command implementation
//!
//! Writes the scenario P&L vectors per asset class.

use std::io::Write;

use adapter_loader::PropertyFileLoader;
use infra_config::Properties;
use tracing::info;

use crate::output::{render_pnl, OutputFormat};
use crate::Result;

/// Run the pnl command
pub fn run(props: &Properties, format: OutputFormat) -> Result<()> {
    let loader = PropertyFileLoader::new(props)?;
    info!(base_currency = %loader.base_currency(), "Calculating P&L vectors");

    let pnl = loader.calculate_pnl_vectors()?;
    std::io::stdout().write_all(render_pnl(&pnl, format)?.as_bytes())?;
    Ok(())
}
