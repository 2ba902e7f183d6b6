//! # Tick Traversal
//!
//! Prices a move of the pool to a target sqrt price by walking tick ranges.
//!
//! Within one range liquidity is constant and the token amount follows the
//! constant-liquidity curve. At each spacing boundary the in-range liquidity
//! changes by that boundary's `liquidity_net`, which the caller supplies:
//! crossing upward adds it, crossing downward subtracts it.

use std::collections::{BTreeMap, HashMap};

use crate::constants::{MAX_TICK, MIN_TICK};
use crate::errors::{CoreError, CoreResult};
use crate::math::{add_liquidity_delta, amount0_delta, amount1_delta, tick_to_sqrt_price};
use crate::types::{PoolSnapshot, PurchasedAsset, TargetPriceQuote, TraversalLimits};

/// Per-boundary `liquidity_net` lookup
///
/// Must return zero for an uninitialized boundary. A failure aborts the
/// traversal that asked for it.
pub trait LiquidityNetSource {
    fn liquidity_net(&mut self, tick: i32) -> CoreResult<i128>;
}

impl<F> LiquidityNetSource for F
where
    F: FnMut(i32) -> CoreResult<i128>,
{
    fn liquidity_net(&mut self, tick: i32) -> CoreResult<i128> {
        self(tick)
    }
}

impl LiquidityNetSource for BTreeMap<i32, i128> {
    fn liquidity_net(&mut self, tick: i32) -> CoreResult<i128> {
        Ok(self.get(&tick).copied().unwrap_or(0))
    }
}

impl LiquidityNetSource for HashMap<i32, i128> {
    fn liquidity_net(&mut self, tick: i32) -> CoreResult<i128> {
        Ok(self.get(&tick).copied().unwrap_or(0))
    }
}

/// Amount of the purchased asset needed to move the pool to `target_sqrt_price`
///
/// Uses [`TraversalLimits::default`]. Returns `0.0` when the target equals the
/// current sqrt price.
pub fn tokens_to_target_price<S>(
    snapshot: &PoolSnapshot,
    target_sqrt_price: f64,
    source: &mut S,
) -> CoreResult<f64>
where
    S: LiquidityNetSource + ?Sized,
{
    quote_to_target_price(snapshot, target_sqrt_price, source, TraversalLimits::default())
        .map(|quote| quote.amount)
}

/// Walk the pool from its current price to `target_sqrt_price`
///
/// Price up means token0 is bought and each crossed upper boundary adds its
/// `liquidity_net`. Price down means token1 is bought and each crossed lower
/// boundary subtracts its `liquidity_net`.
pub fn quote_to_target_price<S>(
    snapshot: &PoolSnapshot,
    target_sqrt_price: f64,
    source: &mut S,
    limits: TraversalLimits,
) -> CoreResult<TargetPriceQuote>
where
    S: LiquidityNetSource + ?Sized,
{
    snapshot.validate()?;
    if !target_sqrt_price.is_finite() || target_sqrt_price < 0.0 {
        return Err(CoreError::invalid_input(format!(
            "target sqrt price must be finite and non-negative, got {}",
            target_sqrt_price
        )));
    }

    let mut walk = RangeWalk::new(snapshot)?;

    let asset = if target_sqrt_price > walk.sqrt_price {
        while target_sqrt_price > walk.sqrt_price {
            if target_sqrt_price > walk.sqrt_price_upper {
                walk.amount += amount0_delta(
                    walk.liquidity,
                    walk.sqrt_price,
                    walk.sqrt_price_lower,
                    walk.sqrt_price_upper,
                );
                walk.cross_up(source, &limits)?;
            } else {
                walk.amount += amount0_delta(
                    walk.liquidity,
                    walk.sqrt_price,
                    walk.sqrt_price_lower,
                    target_sqrt_price,
                );
                walk.sqrt_price = target_sqrt_price;
            }
        }
        PurchasedAsset::Token0
    } else if target_sqrt_price < walk.sqrt_price {
        while target_sqrt_price < walk.sqrt_price {
            if target_sqrt_price < walk.sqrt_price_lower {
                walk.amount += amount1_delta(
                    walk.liquidity,
                    walk.sqrt_price,
                    walk.sqrt_price_lower,
                    walk.sqrt_price_upper,
                );
                walk.cross_down(source, &limits)?;
            } else {
                walk.amount += amount1_delta(
                    walk.liquidity,
                    walk.sqrt_price,
                    target_sqrt_price,
                    walk.sqrt_price_upper,
                );
                walk.sqrt_price = target_sqrt_price;
            }
        }
        PurchasedAsset::Token1
    } else {
        PurchasedAsset::None
    };

    Ok(TargetPriceQuote {
        amount: walk.amount,
        asset,
        ticks_crossed: walk.crossings,
        final_tick_lower: walk.tick_lower,
        final_tick_upper: walk.tick_upper,
        final_liquidity: walk.liquidity,
    })
}

/// Working copy of the pool state, advanced one range at a time
struct RangeWalk {
    sqrt_price: f64,
    liquidity: u128,
    tick_spacing: i32,
    tick_lower: i32,
    tick_upper: i32,
    sqrt_price_lower: f64,
    sqrt_price_upper: f64,
    amount: f64,
    crossings: u32,
}

impl RangeWalk {
    fn new(snapshot: &PoolSnapshot) -> CoreResult<Self> {
        let (tick_lower, tick_upper) = snapshot.active_range()?;
        Ok(Self {
            sqrt_price: snapshot.sqrt_price(),
            liquidity: snapshot.liquidity,
            tick_spacing: snapshot.tick_spacing,
            tick_lower,
            tick_upper,
            sqrt_price_lower: tick_to_sqrt_price(tick_lower),
            sqrt_price_upper: tick_to_sqrt_price(tick_upper),
            amount: 0.0,
            crossings: 0,
        })
    }

    /// Cross `tick_upper`, making it the new lower bound
    fn cross_up<S>(&mut self, source: &mut S, limits: &TraversalLimits) -> CoreResult<()>
    where
        S: LiquidityNetSource + ?Sized,
    {
        self.check_crossing(self.tick_upper >= MAX_TICK, self.tick_upper, limits)?;

        let liquidity_net = source.liquidity_net(self.tick_upper)?;
        self.liquidity = add_liquidity_delta(self.liquidity, liquidity_net)?;
        self.crossings += 1;

        self.sqrt_price = self.sqrt_price_upper;
        self.tick_lower = self.tick_upper;
        self.tick_upper += self.tick_spacing;
        self.sqrt_price_lower = self.sqrt_price_upper;
        self.sqrt_price_upper = tick_to_sqrt_price(self.tick_upper);
        Ok(())
    }

    /// Cross `tick_lower`, making it the new upper bound
    fn cross_down<S>(&mut self, source: &mut S, limits: &TraversalLimits) -> CoreResult<()>
    where
        S: LiquidityNetSource + ?Sized,
    {
        self.check_crossing(self.tick_lower <= MIN_TICK, self.tick_lower, limits)?;

        let liquidity_net = source.liquidity_net(self.tick_lower)?;
        let delta = liquidity_net
            .checked_neg()
            .ok_or(CoreError::LiquidityOverflow)?;
        self.liquidity = add_liquidity_delta(self.liquidity, delta)?;
        self.crossings += 1;

        self.sqrt_price = self.sqrt_price_lower;
        self.tick_upper = self.tick_lower;
        self.tick_lower -= self.tick_spacing;
        self.sqrt_price_upper = self.sqrt_price_lower;
        self.sqrt_price_lower = tick_to_sqrt_price(self.tick_lower);
        Ok(())
    }

    fn check_crossing(
        &self,
        out_of_bounds: bool,
        boundary: i32,
        limits: &TraversalLimits,
    ) -> CoreResult<()> {
        let capped = limits
            .max_crossings
            .is_some_and(|max| self.crossings >= max);

        if out_of_bounds || capped {
            return Err(CoreError::UnreachableTarget {
                crossings: self.crossings,
                tick: boundary,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Q96_F64;
    use alloy_primitives::U256;
    use approx::assert_relative_eq;

    fn unit_snapshot(liquidity: u128, tick_spacing: i32) -> PoolSnapshot {
        PoolSnapshot::new(U256::from(1u128 << 96), liquidity, 0, tick_spacing)
    }

    fn no_liquidity_net(_tick: i32) -> CoreResult<i128> {
        Ok(0)
    }

    #[test]
    fn test_target_equal_to_current() {
        let snapshot = unit_snapshot(10u128.pow(21), 10);
        let quote =
            quote_to_target_price(&snapshot, 1.0, &mut no_liquidity_net, TraversalLimits::default())
                .unwrap();

        assert_eq!(quote.amount, 0.0);
        assert_eq!(quote.asset, PurchasedAsset::None);
        assert_eq!(quote.ticks_crossed, 0);
        assert_eq!((quote.final_tick_lower, quote.final_tick_upper), (0, 10));
    }

    #[test]
    fn test_partial_range_up() {
        let snapshot = unit_snapshot(1_000_000, 10);
        let target = tick_to_sqrt_price(4);
        let quote =
            quote_to_target_price(&snapshot, target, &mut no_liquidity_net, TraversalLimits::default())
                .unwrap();

        assert_eq!(quote.asset, PurchasedAsset::Token0);
        assert_eq!(quote.ticks_crossed, 0);
        assert_relative_eq!(
            quote.amount,
            1_000_000.0 * (target - 1.0) / target,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_partial_range_down() {
        // Current price sits at tick 5, halfway through [0, 10)
        let sqrt_price = tick_to_sqrt_price(5);
        let snapshot = PoolSnapshot::new(
            U256::from((sqrt_price * Q96_F64) as u128),
            1_000_000,
            5,
            10,
        );
        let target = tick_to_sqrt_price(1);
        let quote =
            quote_to_target_price(&snapshot, target, &mut no_liquidity_net, TraversalLimits::default())
                .unwrap();

        assert_eq!(quote.asset, PurchasedAsset::Token1);
        assert_eq!(quote.ticks_crossed, 0);
        assert_relative_eq!(
            quote.amount,
            1_000_000.0 * (snapshot.sqrt_price() - target),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_liquidity_net_map_source() {
        let mut nets = BTreeMap::new();
        nets.insert(10, 500i128);

        let snapshot = unit_snapshot(1_000, 10);
        let quote = quote_to_target_price(
            &snapshot,
            tick_to_sqrt_price(15),
            &mut nets,
            TraversalLimits::default(),
        )
        .unwrap();

        assert_eq!(quote.ticks_crossed, 1);
        assert_eq!(quote.final_liquidity, 1_500);
        assert_eq!((quote.final_tick_lower, quote.final_tick_upper), (10, 20));
    }

    #[test]
    fn test_invalid_inputs() {
        let snapshot = unit_snapshot(1_000, 10);
        assert!(matches!(
            tokens_to_target_price(&snapshot, -1.0, &mut no_liquidity_net),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            tokens_to_target_price(&snapshot, f64::NAN, &mut no_liquidity_net),
            Err(CoreError::InvalidInput(_))
        ));

        let bad_spacing = unit_snapshot(1_000, 0);
        assert!(matches!(
            tokens_to_target_price(&bad_spacing, 1.1, &mut no_liquidity_net),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_downward_crossing_underflow() {
        // Crossing tick 0 downward removes more liquidity than is in range
        let mut lookup = |tick: i32| -> CoreResult<i128> { Ok(if tick == 0 { 2_000 } else { 0 }) };
        let snapshot = unit_snapshot(1_000, 10);
        let result = tokens_to_target_price(&snapshot, 0.99, &mut lookup);
        assert_eq!(result, Err(CoreError::LiquidityUnderflow));
    }
}
