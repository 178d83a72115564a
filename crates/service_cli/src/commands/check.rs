//! Check command implementation
//!
//! Resolves the configuration and builds the calculator without running a
//! portfolio through it.

use adapter_loader::PropertyFileLoader;
use infra_config::Properties;

use crate::Result;

/// Run the check command
pub fn run(props: &Properties) -> Result<()> {
    let loader = PropertyFileLoader::new(props)?;
    let calculator = loader.create_simm_calculator()?;

    println!("Configuration OK");
    println!("  VaR level:          {}", calculator.var_level());
    println!("  Base currency:      {}", calculator.base_currency());
    println!("  Risk factors:       {}", calculator.risk_factors().len());
    println!("  Scenarios:          {}", calculator.scenario_count());
    println!(
        "  Initial margin:     {}",
        loader
            .initial_margin()
            .map_or("not configured".to_string(), |p| p.display().to_string())
    );
    println!(
        "  Variation margin:   {}",
        loader
            .variation_margin()
            .map_or("not configured".to_string(), |p| p.display().to_string())
    );
    Ok(())
}
