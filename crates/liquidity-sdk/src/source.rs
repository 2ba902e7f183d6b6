//! Read interface to the external pool state provider.
//!
//! Implementations do the fetching (RPC, a forked node, a fixture file). The
//! pricing math only ever sees the values returned here.

use liquidity_core::PoolSnapshot;
use serde::{Deserialize, Serialize};

use crate::SdkResult;

/// Pool state as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub token0: String,
    pub token1: String,
    /// Fee tier in hundredths of a basis point
    pub fee: u32,
    pub snapshot: PoolSnapshot,
}

impl PoolState {
    /// Whether price or in-range liquidity differs from `other`
    pub fn differs_from(&self, other: &PoolState) -> bool {
        self.snapshot.sqrt_price_x96 != other.snapshot.sqrt_price_x96
            || self.snapshot.tick != other.snapshot.tick
            || self.snapshot.liquidity != other.snapshot.liquidity
    }
}

/// An initialized tick as returned by a word-level tick lens query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickLiquidity {
    pub tick: i32,
    pub liquidity_net: i128,
    pub liquidity_gross: u128,
}

/// Synchronous pool state provider
///
/// Every call reads the provider's latest observed state. Retrying failed
/// reads is up to the implementation.
pub trait PoolStateSource {
    /// Current price, liquidity, tick and static pool parameters
    fn pool_state(&self, pool: &str) -> SdkResult<PoolState>;

    /// Net liquidity change when crossing `tick`; zero when uninitialized
    fn liquidity_net(&self, pool: &str, tick: i32) -> SdkResult<i128>;

    /// All initialized ticks in one bitmap word, queried through `tick_lens`
    fn populated_ticks_in_word(
        &self,
        tick_lens: &str,
        pool: &str,
        word: i16,
    ) -> SdkResult<Vec<TickLiquidity>>;
}

impl<S: PoolStateSource + ?Sized> PoolStateSource for &S {
    fn pool_state(&self, pool: &str) -> SdkResult<PoolState> {
        (**self).pool_state(pool)
    }

    fn liquidity_net(&self, pool: &str, tick: i32) -> SdkResult<i128> {
        (**self).liquidity_net(pool, tick)
    }

    fn populated_ticks_in_word(
        &self,
        tick_lens: &str,
        pool: &str,
        word: i16,
    ) -> SdkResult<Vec<TickLiquidity>> {
        (**self).populated_ticks_in_word(tick_lens, pool, word)
    }
}
