//! SIMM CLI - historical VaR and P&L from a properties file
//!
//! # Commands
//!
//! - `simm <config> var` - VaR per asset class
//! - `simm <config> pnl` - scenario P&L vectors per asset class
//! - `simm <config> check` - resolve configuration and build the calculator
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the A-I-P-S architecture, this crate
//! reads configuration through `infra_config`, assembles inputs through
//! `adapter_loader` and renders the results of `pricer_risk`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use infra_config::Properties;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod output;

pub use error::{CliError, Result};
use output::OutputFormat;

/// Historical SIMM calculator
#[derive(Parser)]
#[command(name = "simm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Prefix of environment variables overriding configuration values
    /// (e.g. SIMM_VAR_LEVEL for prefix SIMM)
    #[arg(long, global = true)]
    env_prefix: Option<String>,

    /// Configuration file (.properties or .toml)
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate VaR per asset class
    Var {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Calculate scenario P&L vectors per asset class
    Pnl {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Resolve configuration and build the calculator
    Check,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut props = Properties::load(&cli.config)?;
    if let Some(prefix) = cli.env_prefix.as_deref() {
        props = props.with_env_override(prefix);
    }
    debug!(config = %cli.config.display(), keys = props.len(), "Loaded configuration");

    match cli.command {
        Commands::Var { format } => commands::var::run(&props, format),
        Commands::Pnl { format } => commands::pnl::run(&props, format),
        Commands::Check => commands::check::run(&props),
    }
}
