//! The module contains the errors the engine can return.
//!
//! Aggregations never fail: they degrade to `0` on degenerate configuration.
//! Errors only come out of the boundary helpers that turn caller input into
//! engine values:
//!
//! - [`UnknownCategory`] when a category string matches no known category.
//! - [`InvalidAmount`] when a monetary amount cannot be parsed.
//! - [`InvalidQuantity`] when a weight/quantity cannot be parsed.
//! - [`InvalidPeriod`] when a reporting period is malformed.
//!
//!  [`UnknownCategory`]: EngineError::UnknownCategory
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidQuantity`]: EngineError::InvalidQuantity
//!  [`InvalidPeriod`]: EngineError::InvalidPeriod
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown category: \"{0}\"")]
    UnknownCategory(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
}
