use std::fs;
use std::path::{Path, PathBuf};

use liquidity_core::TraversalLimits;
use serde::{Deserialize, Serialize};

use crate::{SdkError, SdkResult};

/// DAI/WETH 0.05% pool on Ethereum mainnet
pub const EXAMPLE_POOL_ADDRESS: &str = "0x60594a405d53811d3BC4766596EFD80fd545A270";

/// Uniswap V3 TickLens on Ethereum mainnet
pub const EXAMPLE_TICK_LENS_ADDRESS: &str = "0xbfd8137f7d1516D3ea5cA83523914859ec47F573";

/// Pool client configuration loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SdkConfig {
    /// Address of the pool to analyze
    pub pool_address: String,

    /// Address of the tick lens used for word-level tick queries
    pub tick_lens_address: String,

    /// Offline pool state fixture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<PathBuf>,

    /// Tick data cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Traversal bounds
    #[serde(default)]
    pub traversal: TraversalConfig,
}

/// Tick data cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Serve `liquidity_net` from word-level tick lens queries
    pub enabled: bool,

    /// Load the word holding the current tick when the pool is opened
    pub prefetch_current_word: bool,
}

/// Traversal configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TraversalConfig {
    /// Boundary crossings allowed per query; unset walks until the tick bounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_crossings: Option<u32>,
}

impl SdkConfig {
    /// Configuration for one pool with default cache and traversal settings
    pub fn new(pool_address: impl Into<String>, tick_lens_address: impl Into<String>) -> Self {
        Self {
            pool_address: pool_address.into(),
            tick_lens_address: tick_lens_address.into(),
            fixture_path: None,
            cache: CacheConfig::default(),
            traversal: TraversalConfig::default(),
        }
    }

    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SdkError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            SdkError::Parse(reason) => SdkError::Parse(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                reason
            )),
            other => other,
        })?;

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> SdkResult<Self> {
        let config: SdkConfig =
            toml::from_str(content).map_err(|e| SdkError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> SdkResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| SdkError::Parse(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            SdkError::Config(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SdkResult<()> {
        if self.pool_address.trim().is_empty() {
            return Err(SdkError::invalid_parameter(
                "pool_address",
                "empty",
                "a pool address",
            ));
        }

        if self.tick_lens_address.trim().is_empty() {
            return Err(SdkError::invalid_parameter(
                "tick_lens_address",
                "empty",
                "a tick lens address",
            ));
        }

        self.traversal.validate()?;

        Ok(())
    }

    /// Traversal limits for the engine
    pub fn limits(&self) -> TraversalLimits {
        TraversalLimits {
            max_crossings: self.traversal.max_crossings,
        }
    }
}

impl TraversalConfig {
    fn validate(&self) -> SdkResult<()> {
        if self.max_crossings == Some(0) {
            return Err(SdkError::invalid_parameter(
                "max_crossings",
                "0",
                "greater than 0, or unset for no cap",
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefetch_current_word: true,
        }
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_crossings: TraversalLimits::default().max_crossings,
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: impl AsRef<Path>) -> SdkResult<()> {
    let example_config = SdkConfig {
        fixture_path: Some(PathBuf::from("fixtures/dai_weth.json")),
        ..SdkConfig::new(EXAMPLE_POOL_ADDRESS, EXAMPLE_TICK_LENS_ADDRESS)
    };

    example_config.save(path)?;
    Ok(())
}
