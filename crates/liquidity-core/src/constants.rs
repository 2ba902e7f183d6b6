//! # Constants
//!
//! Fixed-point scales and tick bounds shared by every module.

// ============================================================================
// Fixed-Point Constants
// ============================================================================

/// Number of fractional bits in an X96 sqrt price
pub const RESOLUTION: u32 = 96;

/// Q96 scale factor as a float: 2^96
pub const Q96_F64: f64 = 79_228_162_514_264_337_593_543_950_336.0;

// ============================================================================
// Tick Constants
// ============================================================================

/// Geometric base of the tick grid: price(tick) = 1.0001^tick
pub const TICK_BASE: f64 = 1.0001;

/// Minimum tick
pub const MIN_TICK: i32 = -887_272;

/// Maximum tick
pub const MAX_TICK: i32 = 887_272;

/// Ticks tracked by one bitmap word
pub const TICKS_PER_WORD: i32 = 256;

/// Distance to the nearest integer below which a computed tick snaps onto it
pub const TICK_SNAP_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Traversal Constants
// ============================================================================

/// Default cap on boundary crossings during a single traversal
pub const DEFAULT_MAX_TICK_CROSSINGS: u32 = 100_000;
