//! # Liquidity Math
//!
//! Token amounts along the constant-liquidity curve `x * y = L^2`,
//! parametrized by sqrt price, and checked application of `liquidity_net`.

use crate::errors::{CoreError, CoreResult};

/// Amount of token0 needed to move the price from `current` up to `high`
///
/// `current` is clamped into `[low, high]` first:
/// `L * (high - c) / (c * high)`.
pub fn amount0_delta(
    liquidity: u128,
    sqrt_price_current: f64,
    sqrt_price_low: f64,
    sqrt_price_high: f64,
) -> f64 {
    let current = clamp_sqrt_price(sqrt_price_current, sqrt_price_low, sqrt_price_high);
    liquidity as f64 * (sqrt_price_high - current) / (current * sqrt_price_high)
}

/// Amount of token1 needed to move the price from `low` up to `current`
///
/// `current` is clamped into `[low, high]` first: `L * (c - low)`.
pub fn amount1_delta(
    liquidity: u128,
    sqrt_price_current: f64,
    sqrt_price_low: f64,
    sqrt_price_high: f64,
) -> f64 {
    let current = clamp_sqrt_price(sqrt_price_current, sqrt_price_low, sqrt_price_high);
    liquidity as f64 * (current - sqrt_price_low)
}

/// Apply a signed liquidity delta
pub fn add_liquidity_delta(liquidity: u128, delta: i128) -> CoreResult<u128> {
    if delta < 0 {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(CoreError::LiquidityUnderflow)
    } else {
        liquidity
            .checked_add(delta as u128)
            .ok_or(CoreError::LiquidityOverflow)
    }
}

// Unlike f64::clamp, never panics on NaN bounds
fn clamp_sqrt_price(current: f64, low: f64, high: f64) -> f64 {
    current.min(high).max(low)
}
