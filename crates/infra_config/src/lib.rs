//! # infra_config
//!
//! Flat key/value configuration for the margin workspace.
//!
//! A [`Properties`] value is an immutable-by-convention map from string keys
//! to string values. It is read from either a `.properties` file
//! or a flat `.toml` table, and can be overlaid with environment variables.
//!
//! ```
//! use infra_config::Properties;
//!
//! let props = Properties::parse("var-level = 0.95\nbase-currency: USD\n").unwrap();
//! assert_eq!(props.get("var-level"), Some("0.95"));
//! assert_eq!(props.get_or("missing", "fallback"), "fallback");
//! ```

#![warn(missing_docs)]

mod error;
mod properties;

pub use error::ConfigError;
pub use properties::Properties;
