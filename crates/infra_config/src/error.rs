//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A properties line could not be understood.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// The TOML document is not valid TOML.
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A TOML value has no flat string form (tables, arrays, datetimes).
    #[error("Unsupported value for key {key}: only strings, numbers and booleans are allowed")]
    UnsupportedValue {
        /// Offending key
        key: String,
    },
}
