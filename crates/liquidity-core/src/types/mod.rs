//! # Core Type Definitions
//!
//! Pool state consumed by the engine and the results it produces.

pub mod pool;
pub mod quote;

// Re-export all types
pub use pool::*;
pub use quote::*;
