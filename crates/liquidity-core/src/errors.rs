//! # Core Error Types
//!
//! Every failure aborts the whole computation; no partial result is returned
//! alongside an error.

use thiserror::Error;

/// Errors produced by the pricing and valuation math
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid price")]
    InvalidPrice,

    #[error("Tick out of range")]
    TickOutOfRange,

    // ========================================================================
    // Liquidity Errors
    // ========================================================================
    #[error("Liquidity underflow")]
    LiquidityUnderflow,

    #[error("Liquidity overflow")]
    LiquidityOverflow,

    // ========================================================================
    // Traversal Errors
    // ========================================================================
    #[error("Liquidity lookup failed at tick {tick}: {reason}")]
    LookupFailure { tick: i32, reason: String },

    #[error("Target unreachable after {crossings} tick crossings (stopped at tick {tick})")]
    UnreachableTarget { crossings: u32, tick: i32 },
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Create a lookup failure for a boundary tick
    pub fn lookup_failure(tick: i32, reason: impl ToString) -> Self {
        Self::LookupFailure {
            tick,
            reason: reason.to_string(),
        }
    }
}
