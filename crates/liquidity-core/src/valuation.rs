//! # Range Valuation
//!
//! Token amounts represented by a liquidity amount over a tick range at the
//! pool's current price.

use alloy_primitives::U256;

use crate::errors::{CoreError, CoreResult};
use crate::math::{price_to_tick, sqrt_x96_to_price, sqrt_x96_to_sqrt_price, tick_to_sqrt_price};
use crate::types::RangeAmounts;

/// Amounts of token0 and token1 held by `liquidity` over `[tick_lower, tick_upper)`
///
/// - current tick below `tick_lower`: everything is token0
/// - current tick at or above `tick_upper`: everything is token1
/// - otherwise the position is split at the current sqrt price
///
/// The lower bound is inclusive and the upper bound exclusive.
pub fn token_amounts_for_range(
    liquidity: u128,
    sqrt_price_x96: U256,
    tick_lower: i32,
    tick_upper: i32,
    decimals0: u8,
    decimals1: u8,
) -> CoreResult<RangeAmounts> {
    if tick_lower >= tick_upper {
        return Err(CoreError::invalid_input(format!(
            "tick_lower {} must be below tick_upper {}",
            tick_lower, tick_upper
        )));
    }

    let sqrt_ratio_low = tick_to_sqrt_price(tick_lower);
    let sqrt_ratio_high = tick_to_sqrt_price(tick_upper);
    let current_tick = price_to_tick(sqrt_x96_to_price(sqrt_price_x96))?;
    let liquidity = liquidity as f64;

    let (amount0, amount1) = if current_tick < tick_lower {
        (
            liquidity * (sqrt_ratio_high - sqrt_ratio_low) / (sqrt_ratio_low * sqrt_ratio_high),
            0.0,
        )
    } else if current_tick >= tick_upper {
        (0.0, liquidity * (sqrt_ratio_high - sqrt_ratio_low))
    } else {
        let sqrt_price = sqrt_x96_to_sqrt_price(sqrt_price_x96);
        (
            liquidity * (sqrt_ratio_high - sqrt_price) / (sqrt_price * sqrt_ratio_high),
            liquidity * (sqrt_price - sqrt_ratio_low),
        )
    };

    Ok(RangeAmounts::new(amount0, amount1, decimals0, decimals1))
}
