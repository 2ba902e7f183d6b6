/// Liquidity SDK
///
/// Client-side access to concentrated-liquidity pool state. Provides:
/// - The `PoolStateSource` read interface to an external state provider
/// - A JSON fixture source for offline analysis and tests
/// - `LiquidityPool`, which caches populated ticks per bitmap word and feeds
///   them to the tick-walking engine
/// - TOML configuration

pub mod config;
pub mod errors;
pub mod fixture;
pub mod pool;
pub mod source;

pub use config::*;
pub use errors::*;
pub use fixture::FixtureSource;
pub use pool::LiquidityPool;
pub use source::*;

// Re-export shared types and math from liquidity-core
pub use liquidity_core::errors::*;
pub use liquidity_core::math::*;
pub use liquidity_core::types::*;
pub use liquidity_core::U256;
