//! # Price Math
//!
//! Conversions between X96 fixed-point sqrt prices and floating prices.
//! Floats are IEEE doubles; the X96 side is exact up to uint160.

use alloy_primitives::U256;

use crate::constants::Q96_F64;
use crate::errors::{CoreError, CoreResult};

/// 2^64, the weight of one limb
const LIMB_F64: f64 = 18_446_744_073_709_551_616.0;

/// Upper bound (exclusive) of an X96 sqrt price: 2^160
const MAX_SQRT_PRICE_X96_F64: f64 = 1_461_501_637_330_902_918_203_684_832_716_283_019_655_932_542_976.0;

/// Convert an X96 sqrt price to a plain price: (x / 2^96)^2
pub fn sqrt_x96_to_price(sqrt_price_x96: U256) -> f64 {
    let sqrt_price = sqrt_x96_to_sqrt_price(sqrt_price_x96);
    sqrt_price * sqrt_price
}

/// Convert an X96 sqrt price to a plain sqrt price: x / 2^96
pub fn sqrt_x96_to_sqrt_price(sqrt_price_x96: U256) -> f64 {
    u256_to_f64(sqrt_price_x96) / Q96_F64
}

/// Encode a plain sqrt price as X96, truncating the fractional part
pub fn sqrt_price_to_x96(sqrt_price: f64) -> CoreResult<U256> {
    if !sqrt_price.is_finite() || sqrt_price < 0.0 {
        return Err(CoreError::InvalidPrice);
    }

    let scaled = sqrt_price * Q96_F64;
    if scaled >= MAX_SQRT_PRICE_X96_F64 {
        return Err(CoreError::InvalidPrice);
    }

    Ok(f64_to_u256(scaled))
}

/// Approximate a 256-bit integer as a double
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * LIMB_F64 + limb as f64)
}

/// Truncate a finite, non-negative double below 2^160 into a 256-bit integer
fn f64_to_u256(value: f64) -> U256 {
    if value < 1.0 {
        return U256::ZERO;
    }

    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);

    // value == mantissa * 2^(exponent - 1075)
    let shift = exponent - 1075;
    if shift >= 0 {
        U256::from(mantissa) << (shift as usize)
    } else {
        U256::from(mantissa >> shift.unsigned_abs())
    }
}
