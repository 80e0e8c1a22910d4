//! Infrastructure - Shared utilities and types
//! Foundation layer for all other modules

pub mod config;
pub mod constants;
pub mod errors;
pub mod host;
pub mod math;
pub mod stable_storage;


// Re-export commonly used items
pub use config::{EngineConfig, FeeSettings};
pub use constants::*;
pub use errors::{
    CalculationError, ConfigError, ErrorKind, FeeError, HostError, HostResult, MarketOrderError,
    OrderError, Result, StorageError, SwapLeg, TradingError,
};
pub use host::{AmmRouter, AssetLedger, Environment, Host};
pub use math::{apply_bps, checked_sub, is_zero, multiply_and_divide, saturating_sub, zero};
