//! # Mathematical Functions
//!
//! Price, tick and token-amount helpers used by the traversal engine and the
//! range valuation.

pub mod liquidity_math;
pub mod price_math;
pub mod tick_math;

// Re-export commonly used functions
pub use liquidity_math::*;
pub use price_math::*;
pub use tick_math::*;
