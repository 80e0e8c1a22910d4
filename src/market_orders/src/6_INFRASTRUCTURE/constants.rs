//! Engine-wide constants
//!
//! Fee magnitudes are deliberately absent: the fee rate is always supplied
//! through `FeeSettings`.

/// Denominator for every basis-point quantity
pub const BASIS_POINTS: u32 = 10_000;

/// Upper bound accepted for `fee_rate_bps` (10%)
pub const MAX_FEE_RATE_BPS: u32 = 1_000;

/// Default share of distributed fees forwarded to the burn sink (60%)
pub const DEFAULT_BURN_SHARE_BPS: u32 = 6_000;

/// Default share of distributed fees forwarded to the staking sink (40%)
pub const DEFAULT_STAKE_SHARE_BPS: u32 = 4_000;

/// Deadline passed to every router call. Swaps never expire mid-block.
pub const NO_DEADLINE: u64 = u64::MAX;

/// Default number of execution records kept in memory
pub const DEFAULT_MAX_EXECUTION_HISTORY: u64 = 100;

/// Schema version written into exported engine state
pub const STATE_SCHEMA_VERSION: u32 = 1;
