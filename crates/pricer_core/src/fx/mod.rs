//! FX rate data.
//!
//! - [`FxMatrix`]: consistent exchange rates between a set of currencies
//! - [`FxMatrixBuilder`]: accumulates quoted pairs and resolves them into a matrix
//! - [`FxMatrixError`]: construction and lookup failures

mod error;
mod matrix;

pub use error::FxMatrixError;
pub use matrix::{FxMatrix, FxMatrixBuilder};
