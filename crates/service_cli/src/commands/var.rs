//! VaR command implementation
//!
//! Computes historical VaR per asset class for the configured portfolios.

use std::io::Write;

use adapter_loader::PropertyFileLoader;
use infra_config::Properties;
use tracing::info;

use crate::output::{render_var, OutputFormat};
use crate::Result;

/// Run the var command
pub fn run(props: &Properties, format: OutputFormat) -> Result<()> {
    let loader = PropertyFileLoader::new(props)?;
    info!(
        var_level = loader.var_level(),
        base_currency = %loader.base_currency(),
        "Calculating VaR"
    );

    let var = loader.calculate_var()?;
    std::io::stdout().write_all(render_var(&var, format)?.as_bytes())?;
    Ok(())
}
