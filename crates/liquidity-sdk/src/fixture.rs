//! Pool state source backed by a JSON fixture.
//!
//! Stands in for a live provider in offline analysis and tests. The fixture
//! can be reloaded from disk or edited in place to simulate state changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

use liquidity_core::math::compressed_tick_bitmap_position;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::source::{PoolState, PoolStateSource, TickLiquidity};
use crate::{SdkError, SdkResult};

/// Fixture file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Tick lens that word queries must name; any lens is accepted when unset
    #[serde(default)]
    pub tick_lens: Option<String>,
    /// Pools keyed by address
    pub pools: BTreeMap<String, PoolFixture>,
}

/// One pool's state and its initialized ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolFixture {
    pub state: PoolState,
    #[serde(default)]
    pub ticks: Vec<TickLiquidity>,
}

/// `PoolStateSource` serving fixture data
#[derive(Debug, Default)]
pub struct FixtureSource {
    fixture: RwLock<Fixture>,
    path: Option<PathBuf>,
    liquidity_net_calls: AtomicUsize,
    word_queries: AtomicUsize,
}

impl FixtureSource {
    /// Create a source from fixture data
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: RwLock::new(normalize(fixture)),
            ..Self::default()
        }
    }

    /// Parse a fixture from a JSON string
    pub fn from_json(json: &str) -> SdkResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a fixture file, remembering the path for [`FixtureSource::reload`]
    pub fn from_path(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let fixture = read_fixture(path)?;
        debug!(path = %path.display(), pools = fixture.pools.len(), "loaded pool fixture");

        Ok(Self {
            fixture: RwLock::new(normalize(fixture)),
            path: Some(path.to_path_buf()),
            ..Self::default()
        })
    }

    /// Re-read the fixture file this source was loaded from
    pub fn reload(&self) -> SdkResult<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| SdkError::SourceFailure("fixture was not loaded from a file".to_string()))?;

        let fixture = normalize(read_fixture(path)?);
        *self
            .fixture
            .write()
            .map_err(|_| SdkError::SourceFailure("fixture lock poisoned".to_string()))? = fixture;
        Ok(())
    }

    /// Replace the state of one pool, keeping its ticks
    pub fn set_pool_state(&self, pool: &str, state: PoolState) -> SdkResult<()> {
        let mut fixture = self
            .fixture
            .write()
            .map_err(|_| SdkError::SourceFailure("fixture lock poisoned".to_string()))?;
        let entry = fixture
            .pools
            .get_mut(&pool.to_ascii_lowercase())
            .ok_or_else(|| SdkError::PoolNotFound(pool.to_string()))?;
        entry.state = state;
        Ok(())
    }

    /// Number of single-tick `liquidity_net` reads served
    pub fn liquidity_net_calls(&self) -> usize {
        self.liquidity_net_calls.load(Ordering::Relaxed)
    }

    /// Number of word-level tick lens queries served
    pub fn word_queries(&self) -> usize {
        self.word_queries.load(Ordering::Relaxed)
    }

    fn read(&self) -> SdkResult<RwLockReadGuard<'_, Fixture>> {
        self.fixture
            .read()
            .map_err(|_| SdkError::SourceFailure("fixture lock poisoned".to_string()))
    }
}

impl PoolStateSource for FixtureSource {
    fn pool_state(&self, pool: &str) -> SdkResult<PoolState> {
        let fixture = self.read()?;
        fixture
            .pools
            .get(&pool.to_ascii_lowercase())
            .map(|entry| entry.state.clone())
            .ok_or_else(|| SdkError::PoolNotFound(pool.to_string()))
    }

    fn liquidity_net(&self, pool: &str, tick: i32) -> SdkResult<i128> {
        self.liquidity_net_calls.fetch_add(1, Ordering::Relaxed);

        let fixture = self.read()?;
        let entry = fixture
            .pools
            .get(&pool.to_ascii_lowercase())
            .ok_or_else(|| SdkError::PoolNotFound(pool.to_string()))?;

        Ok(entry
            .ticks
            .iter()
            .find(|t| t.tick == tick)
            .map(|t| t.liquidity_net)
            .unwrap_or(0))
    }

    fn populated_ticks_in_word(
        &self,
        tick_lens: &str,
        pool: &str,
        word: i16,
    ) -> SdkResult<Vec<TickLiquidity>> {
        self.word_queries.fetch_add(1, Ordering::Relaxed);

        let fixture = self.read()?;
        if let Some(expected) = &fixture.tick_lens {
            if !expected.eq_ignore_ascii_case(tick_lens) {
                return Err(SdkError::SourceFailure(format!(
                    "unknown tick lens {}",
                    tick_lens
                )));
            }
        }

        let entry = fixture
            .pools
            .get(&pool.to_ascii_lowercase())
            .ok_or_else(|| SdkError::PoolNotFound(pool.to_string()))?;
        let spacing = entry.state.snapshot.tick_spacing;

        let mut populated = Vec::new();
        for tick in &entry.ticks {
            let (tick_word, _) = compressed_tick_bitmap_position(tick.tick, spacing)?;
            if tick_word == word {
                populated.push(*tick);
            }
        }
        Ok(populated)
    }
}

fn read_fixture(path: &Path) -> SdkResult<Fixture> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        SdkError::Parse(format!(
            "failed to parse fixture {}: {}",
            path.display(),
            e
        ))
    })
}

// Addresses are matched case-insensitively
fn normalize(fixture: Fixture) -> Fixture {
    Fixture {
        tick_lens: fixture.tick_lens,
        pools: fixture
            .pools
            .into_iter()
            .map(|(address, pool)| (address.to_ascii_lowercase(), pool))
            .collect(),
    }
}
