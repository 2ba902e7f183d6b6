//! # Quote Types
//!
//! Results of the traversal engine and the range valuation.

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_TICK_CROSSINGS;

/// Which asset has to be bought to reach a target price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum PurchasedAsset {
    /// Price goes up: token0 leaves the pool
    Token0,
    /// Price goes down: token1 leaves the pool
    Token1,
    /// Target equals the current price
    None,
}

/// Bounds on a single traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct TraversalLimits {
    /// Maximum boundary crossings before giving up; `None` walks until the
    /// tick bounds
    pub max_crossings: Option<u32>,
}

impl TraversalLimits {
    /// No cap besides the tick bounds
    pub fn unbounded() -> Self {
        Self {
            max_crossings: None,
        }
    }

    /// Cap the walk at `max_crossings` boundary crossings
    pub fn with_max_crossings(max_crossings: u32) -> Self {
        Self {
            max_crossings: Some(max_crossings),
        }
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self::with_max_crossings(DEFAULT_MAX_TICK_CROSSINGS)
    }
}

/// Outcome of walking the pool to a target sqrt price
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct TargetPriceQuote {
    /// Amount of the purchased asset, in the raw unit of liquidity
    pub amount: f64,
    /// Asset being bought
    pub asset: PurchasedAsset,
    /// Number of tick boundaries crossed
    pub ticks_crossed: u32,
    /// Lower bound of the range the target falls in
    pub final_tick_lower: i32,
    /// Upper bound of the range the target falls in
    pub final_tick_upper: i32,
    /// In-range liquidity at the target
    pub final_liquidity: u128,
}

/// Token amounts held by a liquidity position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct RangeAmounts {
    /// Token0 in raw units
    pub amount0: f64,
    /// Token1 in raw units
    pub amount1: f64,
    /// Token0 divided by 10^decimals0
    pub amount0_adjusted: f64,
    /// Token1 divided by 10^decimals1
    pub amount1_adjusted: f64,
}

impl RangeAmounts {
    /// Build amounts, deriving the decimal-adjusted values
    pub fn new(amount0: f64, amount1: f64, decimals0: u8, decimals1: u8) -> Self {
        Self {
            amount0,
            amount1,
            amount0_adjusted: amount0 / 10f64.powi(decimals0 as i32),
            amount1_adjusted: amount1 / 10f64.powi(decimals1 as i32),
        }
    }
}
