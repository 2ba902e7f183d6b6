//! # Tick Math
//!
//! Conversions between ticks and prices on the 1.0001 geometric grid, tick
//! spacing alignment, and tick bitmap addressing.
//!
//! Boundary prices use the direct convention `sqrt_price(tick) = 1.0001^(tick/2)`
//! everywhere: the traversal engine and the range valuation agree on it.

use crate::constants::{MAX_TICK, MIN_TICK, TICKS_PER_WORD, TICK_BASE, TICK_SNAP_TOLERANCE};
use crate::errors::{CoreError, CoreResult};

/// Price represented by a tick: 1.0001^tick
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powf(tick as f64)
}

/// Sqrt price represented by a tick: 1.0001^(tick/2)
pub fn tick_to_sqrt_price(tick: i32) -> f64 {
    TICK_BASE.powf(tick as f64 / 2.0)
}

/// Tick containing a price: floor(log_1.0001(price))
///
/// A logarithm within [`TICK_SNAP_TOLERANCE`] of an integer is taken to be that
/// integer, so a price decoded from the tick's own X96 encoding maps back to it.
pub fn price_to_tick(price: f64) -> CoreResult<i32> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CoreError::InvalidPrice);
    }

    let exact = price.ln() / TICK_BASE.ln();
    let nearest = exact.round();
    let tick = if (exact - nearest).abs() < TICK_SNAP_TOLERANCE {
        nearest
    } else {
        exact.floor()
    };

    if tick < MIN_TICK as f64 || tick > MAX_TICK as f64 {
        return Err(CoreError::TickOutOfRange);
    }

    Ok(tick as i32)
}

/// Check if a tick is within the supported range
pub fn is_tick_valid(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Spacing-aligned boundaries around a tick: `lower <= tick < upper`
///
/// Rounds toward negative infinity, so `-5` with spacing `10` lies in `[-10, 0)`.
pub fn nearest_ticks(tick: i32, tick_spacing: i32) -> CoreResult<(i32, i32)> {
    if tick_spacing <= 0 {
        return Err(CoreError::invalid_input(format!(
            "tick spacing must be positive, got {}",
            tick_spacing
        )));
    }

    let lower = tick.div_euclid(tick_spacing) * tick_spacing;
    Ok((lower, lower + tick_spacing))
}

/// Word index and bit index of a tick in a tick bitmap
pub fn tick_bitmap_position(tick: i32) -> (i16, u8) {
    (
        (tick >> 8) as i16,
        tick.rem_euclid(TICKS_PER_WORD) as u8,
    )
}

/// Bitmap position of a tick after compressing it by the pool's spacing
///
/// With spacing 60, tick 600 is the 11th spaced tick from zero and sits at
/// word 0, bit 10.
pub fn compressed_tick_bitmap_position(tick: i32, tick_spacing: i32) -> CoreResult<(i16, u8)> {
    if tick_spacing <= 0 {
        return Err(CoreError::invalid_input(format!(
            "tick spacing must be positive, got {}",
            tick_spacing
        )));
    }

    Ok(tick_bitmap_position(tick.div_euclid(tick_spacing)))
}
