//! # Liquidity Core - Concentrated Liquidity Math
//!
//! Pure functions over already-fetched pool state. This crate provides:
//!
//! - Conversions between X96 sqrt prices, plain prices and ticks
//! - The tick-walking engine that prices a move to a target sqrt price
//! - Valuation of a liquidity amount over an arbitrary tick range
//!
//! Nothing here touches the network. Per-boundary `liquidity_net` values are
//! supplied by the caller through [`LiquidityNetSource`].
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization for off-chain clients

pub mod constants;
pub mod errors;
pub mod math;
pub mod traversal;
pub mod types;
pub mod valuation;

// Re-export commonly used items
pub use alloy_primitives::U256;
pub use constants::*;
pub use errors::{CoreError, CoreResult};
pub use traversal::{quote_to_target_price, tokens_to_target_price, LiquidityNetSource};
pub use types::*;
pub use valuation::token_amounts_for_range;
