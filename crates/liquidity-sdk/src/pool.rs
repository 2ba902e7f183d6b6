//! Pool client
//!
//! Wraps a [`PoolStateSource`] for one pool. Initialized ticks are fetched a
//! bitmap word at a time through the tick lens and cached, so a traversal
//! over many boundaries costs one query per word instead of one per tick.

use std::collections::{HashMap, HashSet};

use liquidity_core::math::compressed_tick_bitmap_position;
use liquidity_core::{
    quote_to_target_price, token_amounts_for_range, CoreError, CoreResult, PoolSnapshot,
    RangeAmounts, TargetPriceQuote, TraversalLimits,
};
use tracing::{debug, info, trace};

use crate::config::{CacheConfig, SdkConfig};
use crate::source::{PoolState, PoolStateSource, TickLiquidity};
use crate::SdkResult;

/// Client-side view of one concentrated-liquidity pool
#[derive(Debug)]
pub struct LiquidityPool<S> {
    source: S,
    address: String,
    tick_lens_address: String,
    state: PoolState,
    tick_data: HashMap<i32, TickLiquidity>,
    loaded_words: HashSet<i16>,
    cache: CacheConfig,
    limits: TraversalLimits,
}

impl<S: PoolStateSource> LiquidityPool<S> {
    /// Load the configured pool from `source`
    pub fn new(source: S, config: &SdkConfig) -> SdkResult<Self> {
        config.validate()?;

        let state = source.pool_state(&config.pool_address)?;
        state.snapshot.validate()?;

        info!(
            pool = %config.pool_address,
            token0 = %state.token0,
            token1 = %state.token1,
            fee = state.fee,
            tick = state.snapshot.tick,
            liquidity = state.snapshot.liquidity,
            "loaded pool"
        );

        let mut pool = Self {
            source,
            address: config.pool_address.clone(),
            tick_lens_address: config.tick_lens_address.clone(),
            state,
            tick_data: HashMap::new(),
            loaded_words: HashSet::new(),
            cache: config.cache.clone(),
            limits: config.limits(),
        };
        pool.prefetch_current_word()?;

        Ok(pool)
    }

    /// Fetch and cache all initialized ticks in one compressed bitmap word
    ///
    /// Returns the number of initialized ticks found.
    pub fn load_word(&mut self, word: i16) -> SdkResult<usize> {
        let ticks =
            self.source
                .populated_ticks_in_word(&self.tick_lens_address, &self.address, word)?;
        let populated = ticks.len();

        self.tick_data
            .extend(ticks.into_iter().map(|tick| (tick.tick, tick)));
        self.loaded_words.insert(word);

        debug!(word, populated, "loaded tick word");
        Ok(populated)
    }

    /// Net liquidity change when crossing `tick`
    ///
    /// Served from the word cache when enabled; a tick missing from a loaded
    /// word is uninitialized.
    pub fn liquidity_net(&mut self, tick: i32) -> SdkResult<i128> {
        if !self.cache.enabled {
            return self.source.liquidity_net(&self.address, tick);
        }

        if let Some(data) = self.tick_data.get(&tick) {
            trace!(tick, "tick cache hit");
            return Ok(data.liquidity_net);
        }

        let (word, _) = compressed_tick_bitmap_position(tick, self.state.snapshot.tick_spacing)?;
        if self.loaded_words.contains(&word) {
            return Ok(0);
        }

        trace!(tick, word, "tick cache miss");
        self.load_word(word)?;
        Ok(self
            .tick_data
            .get(&tick)
            .map(|data| data.liquidity_net)
            .unwrap_or(0))
    }

    /// Re-read pool state, dropping cached ticks when it changed
    ///
    /// Returns whether the state changed along with the state now held.
    pub fn refresh(&mut self) -> SdkResult<(bool, PoolState)> {
        let state = self.source.pool_state(&self.address)?;
        state.snapshot.validate()?;

        let changed = state.differs_from(&self.state);
        if changed {
            info!(
                pool = %self.address,
                old_tick = self.state.snapshot.tick,
                new_tick = state.snapshot.tick,
                liquidity = state.snapshot.liquidity,
                "pool state changed"
            );
            self.state = state;
            self.clear_cache();
            self.prefetch_current_word()?;
        } else {
            debug!(pool = %self.address, "pool state unchanged");
            self.state = state;
        }

        Ok((changed, self.state.clone()))
    }

    /// Amount of the purchased asset needed to move the pool to `target_sqrt_price`
    ///
    /// Failures of the state source surface as [`CoreError::LookupFailure`].
    pub fn tokens_to_target_price(&mut self, target_sqrt_price: f64) -> SdkResult<TargetPriceQuote> {
        let snapshot = self.state.snapshot;
        let limits = self.limits;

        let mut lookup = |tick: i32| -> CoreResult<i128> {
            self.liquidity_net(tick)
                .map_err(|e| CoreError::lookup_failure(tick, e))
        };
        let quote = quote_to_target_price(&snapshot, target_sqrt_price, &mut lookup, limits)?;

        debug!(
            target_sqrt_price,
            amount = quote.amount,
            asset = ?quote.asset,
            ticks_crossed = quote.ticks_crossed,
            "computed target price quote"
        );
        Ok(quote)
    }

    /// Same as [`LiquidityPool::tokens_to_target_price`] for a plain target price
    pub fn tokens_to_price(&mut self, target_price: f64) -> SdkResult<TargetPriceQuote> {
        if !target_price.is_finite() || target_price < 0.0 {
            return Err(CoreError::invalid_input(format!(
                "target price must be finite and non-negative, got {}",
                target_price
            ))
            .into());
        }
        self.tokens_to_target_price(target_price.sqrt())
    }

    /// Token amounts of a position over `[tick_lower, tick_upper)` at the current price
    pub fn position_amounts(
        &self,
        liquidity: u128,
        tick_lower: i32,
        tick_upper: i32,
        decimals0: u8,
        decimals1: u8,
    ) -> SdkResult<RangeAmounts> {
        Ok(token_amounts_for_range(
            liquidity,
            self.state.snapshot.sqrt_price_x96,
            tick_lower,
            tick_upper,
            decimals0,
            decimals1,
        )?)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn state(&self) -> &PoolState {
        &self.state
    }

    pub fn snapshot(&self) -> &PoolSnapshot {
        &self.state.snapshot
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn limits(&self) -> TraversalLimits {
        self.limits
    }

    /// Number of initialized ticks held in the cache
    pub fn cached_ticks(&self) -> usize {
        self.tick_data.len()
    }

    /// Whether `word` has been fetched since the last state change
    pub fn is_word_loaded(&self, word: i16) -> bool {
        self.loaded_words.contains(&word)
    }

    fn clear_cache(&mut self) {
        self.tick_data.clear();
        self.loaded_words.clear();
    }

    fn prefetch_current_word(&mut self) -> SdkResult<()> {
        if !(self.cache.enabled && self.cache.prefetch_current_word) {
            return Ok(());
        }

        let snapshot = self.state.snapshot;
        let (word, _) = compressed_tick_bitmap_position(snapshot.tick, snapshot.tick_spacing)?;
        self.load_word(word)?;
        Ok(())
    }
}
