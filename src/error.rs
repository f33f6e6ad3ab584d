//! Error types
//!
//! Only vector division is a hard failure. Level resource problems are
//! reported through `LevelError` and downgraded to an empty level by the
//! infallible loader entry point.

use thiserror::Error;

/// Programming errors raised by the simulation math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// A vector was divided by a zero scalar
    #[error("division by zero")]
    DivisionByZero,
}

/// Failures while fetching or looking up level data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The level text could not be fetched or read
    #[error("level resource unavailable: {0}")]
    ResourceUnavailable(String),
    /// The catalog loaded but holds no header for the requested level
    #[error("level {0} not found in catalog")]
    LevelNotFound(u32),
    /// The catalog loaded but contains no level headers at all
    #[error("level catalog contains no levels")]
    EmptyCatalog,
}
