//! CLI error type.

use thiserror::Error;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] infra_config::ConfigError),

    /// Configuration resolution, input loading or calculation failed.
    #[error(transparent)]
    Simm(#[from] adapter_loader::SimmError),

    /// JSON rendering failed.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
