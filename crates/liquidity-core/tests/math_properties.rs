//! Property-based tests for the conversion library, the traversal engine and
//! the range valuation.

use approx::assert_relative_eq;
use liquidity_core::math::*;
use liquidity_core::*;
use proptest::prelude::*;

// ============================================================================
// Test Strategies
// ============================================================================

/// Ticks well inside the supported range
fn tick() -> impl Strategy<Value = i32> {
    -400_000i32..400_000
}

/// Realistic tick spacings
fn tick_spacing() -> impl Strategy<Value = i32> {
    prop_oneof![Just(1), Just(10), Just(60), Just(200), 1i32..500]
}

/// In-range liquidity up to 10^24
fn liquidity() -> impl Strategy<Value = u128> {
    0u128..1_000_000_000_000_000_000_000_000
}

fn snapshot_at(tick: i32, liquidity: u128, tick_spacing: i32) -> PoolSnapshot {
    let sqrt_price_x96 = sqrt_price_to_x96(tick_to_sqrt_price(tick)).unwrap();
    PoolSnapshot::new(sqrt_price_x96, liquidity, tick, tick_spacing)
}

/// Non-negative liquidity_net derived from the tick, so upward walks never
/// drain liquidity
fn growing_liquidity_net(tick: i32) -> CoreResult<i128> {
    Ok(tick.rem_euclid(7) as i128 * 1_000_000)
}

fn no_liquidity_net(_tick: i32) -> CoreResult<i128> {
    Ok(0)
}

// ============================================================================
// Tick Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_nearest_ticks_bracket_tick(tick in -887_272i32..=887_272, spacing in 1i32..20_000) {
        let (lower, upper) = nearest_ticks(tick, spacing).unwrap();
        prop_assert!(lower <= tick);
        prop_assert!(tick < upper);
        prop_assert_eq!(upper - lower, spacing);
        prop_assert_eq!(lower.rem_euclid(spacing), 0);
    }

    #[test]
    fn prop_bitmap_position_recomposes_tick(tick in -887_272i32..=887_272) {
        let (word, bit) = tick_bitmap_position(tick);
        prop_assert_eq!(word as i32 * 256 + bit as i32, tick);
    }

    #[test]
    fn prop_boundary_prices_increase(tick in tick()) {
        prop_assert!(tick_to_sqrt_price(tick + 1) > tick_to_sqrt_price(tick));
        prop_assert!(tick_to_price(tick + 1) > tick_to_price(tick));
    }

    #[test]
    fn prop_price_to_tick_inverts_tick_to_price(tick in tick()) {
        prop_assert_eq!(price_to_tick(tick_to_price(tick)).unwrap(), tick);
    }
}

// ============================================================================
// Conversion Properties
// ============================================================================

#[test]
fn test_unit_x96_is_price_one() {
    let q96 = U256::from(1u128 << 96);
    assert_eq!(sqrt_x96_to_price(q96), 1.0);
    assert_eq!(sqrt_x96_to_sqrt_price(q96), 1.0);
}

proptest! {
    #[test]
    fn prop_sqrt_price_squared_matches_price(tick in tick()) {
        let x96 = sqrt_price_to_x96(tick_to_sqrt_price(tick)).unwrap();
        let sqrt_price = sqrt_x96_to_sqrt_price(x96);
        assert_relative_eq!(sqrt_price * sqrt_price, sqrt_x96_to_price(x96), max_relative = 1e-12);
        assert_relative_eq!(sqrt_x96_to_price(x96), tick_to_price(tick), max_relative = 1e-9);
    }
}

// ============================================================================
// Traversal Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_target_at_current_price_costs_nothing(
        tick in tick(),
        liquidity in liquidity(),
        spacing in tick_spacing(),
    ) {
        let snapshot = snapshot_at(tick, liquidity, spacing);
        let quote = quote_to_target_price(
            &snapshot,
            snapshot.sqrt_price(),
            &mut growing_liquidity_net,
            TraversalLimits::default(),
        )
        .unwrap();

        prop_assert_eq!(quote.amount, 0.0);
        prop_assert_eq!(quote.ticks_crossed, 0);
        prop_assert_eq!(quote.asset, PurchasedAsset::None);
    }

    #[test]
    fn prop_higher_target_never_costs_less(
        tick in -100_000i32..100_000,
        liquidity in 1u128..1_000_000_000_000_000_000_000,
        spacing in tick_spacing(),
        step in 0.0001f64..0.2,
        extra in 0.0f64..0.2,
    ) {
        let snapshot = snapshot_at(tick, liquidity, spacing);
        let near = snapshot.sqrt_price() * (1.0 + step);
        let far = snapshot.sqrt_price() * (1.0 + step + extra);

        let near_amount = tokens_to_target_price(&snapshot, near, &mut growing_liquidity_net).unwrap();
        let far_amount = tokens_to_target_price(&snapshot, far, &mut growing_liquidity_net).unwrap();

        prop_assert!(near_amount >= 0.0);
        prop_assert!(far_amount >= near_amount * (1.0 - 1e-12));
    }

    #[test]
    fn prop_lower_target_never_costs_less(
        tick in -100_000i32..100_000,
        liquidity in 1u128..1_000_000_000_000_000_000_000,
        spacing in tick_spacing(),
        step in 0.0001f64..0.2,
        extra in 0.0f64..0.2,
    ) {
        let snapshot = snapshot_at(tick, liquidity, spacing);
        let near = snapshot.sqrt_price() * (1.0 - step);
        let far = snapshot.sqrt_price() * (1.0 - step - extra);

        let near_amount = tokens_to_target_price(&snapshot, near, &mut no_liquidity_net).unwrap();
        let far_amount = tokens_to_target_price(&snapshot, far, &mut no_liquidity_net).unwrap();

        prop_assert!(near_amount >= 0.0);
        prop_assert!(far_amount >= near_amount * (1.0 - 1e-12));
    }

    #[test]
    fn prop_flat_liquidity_telescopes(
        tick in -100_000i32..100_000,
        liquidity in 1u128..1_000_000_000_000_000_000_000,
        spacing in tick_spacing(),
        factor in 0.5f64..2.0,
    ) {
        let snapshot = snapshot_at(tick, liquidity, spacing);
        let current = snapshot.sqrt_price();
        let target = current * factor;
        let amount = tokens_to_target_price(&snapshot, target, &mut no_liquidity_net).unwrap();

        let expected = if target >= current {
            liquidity as f64 * (1.0 / current - 1.0 / target)
        } else {
            liquidity as f64 * (current - target)
        };
        prop_assert!((amount - expected).abs() <= expected.abs() * 1e-7 + 1e-6);
    }
}

// ============================================================================
// Valuation Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_range_amounts_are_dual_under_inversion(
        tick_lower in -100_000i32..100_000,
        width in 1i32..5_000,
        below in 1i32..5_000,
        liquidity in 1u128..1_000_000_000_000_000_000,
    ) {
        let tick_upper = tick_lower + width;
        let current = tick_lower - below;
        let x96 = sqrt_price_to_x96(tick_to_sqrt_price(current)).unwrap();
        let below_range = token_amounts_for_range(liquidity, x96, tick_lower, tick_upper, 18, 18).unwrap();

        // Swapping token roles inverts the price and mirrors the tick range
        let inverted_x96 = sqrt_price_to_x96(tick_to_sqrt_price(-current)).unwrap();
        let above_range =
            token_amounts_for_range(liquidity, inverted_x96, -tick_upper, -tick_lower, 18, 18).unwrap();

        prop_assert_eq!(below_range.amount1, 0.0);
        prop_assert_eq!(above_range.amount0, 0.0);
        assert_relative_eq!(below_range.amount0, above_range.amount1, max_relative = 1e-9);
    }
}

#[test]
fn test_upper_bound_tick_is_all_token1() {
    let x96 = sqrt_price_to_x96(tick_to_sqrt_price(100)).unwrap();
    assert_eq!(price_to_tick(sqrt_x96_to_price(x96)).unwrap(), 100);

    let amounts = token_amounts_for_range(10u128.pow(18), x96, 0, 100, 18, 18).unwrap();
    assert_eq!(amounts.amount0, 0.0);
    assert!(amounts.amount1 > 0.0);
}
