//! # Pool Types
//!
//! The read-only pool state a traversal starts from.

use alloy_primitives::U256;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};
use crate::math::{is_tick_valid, nearest_ticks, sqrt_x96_to_price, sqrt_x96_to_sqrt_price};

/// Pool state at the moment a query is made
///
/// The engine never mutates a snapshot; it walks a local copy of the price,
/// liquidity and active range instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PoolSnapshot {
    /// Current sqrt price in X96 fixed point
    pub sqrt_price_x96: U256,
    /// In-range liquidity of the active tick range
    pub liquidity: u128,
    /// Current tick
    pub tick: i32,
    /// Distance between initializable ticks
    pub tick_spacing: i32,
}

impl PoolSnapshot {
    /// Create a snapshot
    pub fn new(sqrt_price_x96: U256, liquidity: u128, tick: i32, tick_spacing: i32) -> Self {
        Self {
            sqrt_price_x96,
            liquidity,
            tick,
            tick_spacing,
        }
    }

    /// Current sqrt price as a float
    pub fn sqrt_price(&self) -> f64 {
        sqrt_x96_to_sqrt_price(self.sqrt_price_x96)
    }

    /// Current price as a float
    pub fn price(&self) -> f64 {
        sqrt_x96_to_price(self.sqrt_price_x96)
    }

    /// Spacing-aligned bounds of the active range
    pub fn active_range(&self) -> CoreResult<(i32, i32)> {
        nearest_ticks(self.tick, self.tick_spacing)
    }

    /// Validate snapshot invariants
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_spacing <= 0 {
            return Err(CoreError::invalid_input(format!(
                "tick spacing must be positive, got {}",
                self.tick_spacing
            )));
        }
        if !is_tick_valid(self.tick) {
            return Err(CoreError::TickOutOfRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_accessors() {
        let snapshot = PoolSnapshot::new(U256::from(1u128 << 96), 1_000, -5, 10);
        assert_eq!(snapshot.sqrt_price(), 1.0);
        assert_eq!(snapshot.price(), 1.0);
        assert_eq!(snapshot.active_range().unwrap(), (-10, 0));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_snapshot_rejects_bad_spacing() {
        let snapshot = PoolSnapshot::new(U256::from(1u128 << 96), 1_000, 0, 0);
        assert!(matches!(
            snapshot.validate(),
            Err(CoreError::InvalidInput(_))
        ));

        let snapshot = PoolSnapshot::new(U256::from(1u128 << 96), 1_000, 900_000, 10);
        assert_eq!(snapshot.validate(), Err(CoreError::TickOutOfRange));
    }
}
