//! Error types for input loading and SIMM assembly.

use std::path::PathBuf;

use pricer_core::fx::FxMatrixError;
use pricer_risk::CalculatorError;
use thiserror::Error;

/// Failure to read one input file.
///
/// `file` is the display name of the input (its path for file loaders) and
/// `line` is 1-based, counting the header as line 1.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("Failed to open {file}: {source}")]
    Io {
        /// Input name
        file: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Structural CSV failure (bad quoting, ragged rows, invalid UTF-8).
    #[error("Invalid CSV in {file}: {source}")]
    Csv {
        /// Input name
        file: String,
        /// Underlying CSV failure
        #[source]
        source: csv::Error,
    },

    /// A field or header could not be understood.
    #[error("Malformed input in {file} at line {line}: {message}")]
    Malformed {
        /// Input name
        file: String,
        /// 1-based line number
        line: u64,
        /// What was wrong
        message: String,
    },

    /// A key appears on more than one row.
    #[error("Duplicate entry {key} in {file} at line {line}")]
    Duplicate {
        /// Input name
        file: String,
        /// 1-based line number of the repeated row
        line: u64,
        /// Risk factor or currency pair
        key: String,
    },

    /// A portfolio row references a risk factor that is not defined.
    #[error("Unknown risk factor {risk_factor} in {file} at line {line}")]
    UnknownRiskFactor {
        /// Input name
        file: String,
        /// 1-based line number
        line: u64,
        /// The undefined risk factor
        risk_factor: String,
    },

    /// The FX quotes do not form a usable matrix.
    #[error("Invalid FX rates in {file}: {source}")]
    Fx {
        /// Input name
        file: String,
        /// Underlying matrix failure
        #[source]
        source: FxMatrixError,
    },
}

/// Errors raised by [`PropertyFileLoader`](crate::PropertyFileLoader).
#[derive(Debug, Error)]
pub enum SimmError {
    /// A required configuration key is absent.
    #[error("No property found for: {key}")]
    MissingConfiguration {
        /// The absent key
        key: String,
    },

    /// A configured file path does not exist.
    #[error("Could not find file: {} defined for property: {key}", .path.display())]
    FileNotFound {
        /// The configured path
        path: PathBuf,
        /// Key the path was configured under
        key: String,
    },

    /// A configuration value cannot be interpreted.
    #[error("Invalid value for property {key}: {value}")]
    InvalidNumericValue {
        /// Key of the value
        key: String,
        /// The rejected text
        value: String,
    },

    /// An input file could not be loaded.
    #[error(transparent)]
    MalformedInput(#[from] LoadError),

    /// The calculator rejected the loaded inputs.
    #[error(transparent)]
    Calculation(#[from] CalculatorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_message() {
        let err = SimmError::MissingConfiguration {
            key: "base-currency".to_string(),
        };
        assert_eq!(err.to_string(), "No property found for: base-currency");
    }

    #[test]
    fn test_file_not_found_message() {
        let err = SimmError::FileNotFound {
            path: PathBuf::from("data/fx.csv"),
            key: "fx-rates".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not find file: data/fx.csv defined for property: fx-rates"
        );
    }

    #[test]
    fn test_load_error_converts() {
        let err: SimmError = LoadError::Duplicate {
            file: "levels.csv".to_string(),
            line: 3,
            key: "SPX".to_string(),
        }
        .into();
        assert!(matches!(err, SimmError::MalformedInput(_)));
        assert_eq!(err.to_string(), "Duplicate entry SPX in levels.csv at line 3");
    }
}
