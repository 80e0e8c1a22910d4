//! Market Orders - fee-skimming order execution in front of an AMM router
//!
//! Architecture:
//! 1_ORDER_EXECUTION - Per-order state machine (validate, receive, split, route, report)
//! 2_FEE_ACCOUNTING - Fee slice arithmetic, native accumulation, burn/stake flush
//! 3_BALANCE_TRACKING - Balance-delta measurement for fee-on-transfer assets
//! 4_ROUTER_ADAPTER - Approvals, swaps, minimum-output checks
//! 5_INFORMATIONAL - Execution history and fee statistics
//! 6_INFRASTRUCTURE - Math, errors, constants, config, host interface, storage
//!
//! The engine is host-agnostic: balances, swaps, journaling and events are
//! reached through the [`Host`] traits, and every public operation runs inside
//! a host checkpoint that is reverted on failure.

// Import numbered modules with explicit paths
#[path = "1_ORDER_EXECUTION/mod.rs"]
mod order_execution_1;
use order_execution_1 as _1_ORDER_EXECUTION;

#[path = "2_FEE_ACCOUNTING/mod.rs"]
mod fee_accounting_2;
use fee_accounting_2 as _2_FEE_ACCOUNTING;

#[path = "3_BALANCE_TRACKING/mod.rs"]
mod balance_tracking_3;
use balance_tracking_3 as _3_BALANCE_TRACKING;

#[path = "4_ROUTER_ADAPTER/mod.rs"]
mod router_adapter_4;
use router_adapter_4 as _4_ROUTER_ADAPTER;

#[path = "5_INFORMATIONAL/mod.rs"]
mod informational_5;
use informational_5 as _5_INFORMATIONAL;

#[path = "6_INFRASTRUCTURE/mod.rs"]
mod infrastructure_6;
use infrastructure_6 as infrastructure;

mod types;

// ===== PUBLIC API =====

pub use candid::{Nat, Principal};

pub use _1_ORDER_EXECUTION::{MarketOrderEngine, OrderStage};
pub use _2_FEE_ACCOUNTING::{Distribution, FeeAccumulator, FeePolicy, FeeSplit, FlushReport};
pub use _5_INFORMATIONAL::{ExecutionHistory, FeeStats};
pub use infrastructure::{
    AmmRouter, AssetLedger, CalculationError, ConfigError, EngineConfig, Environment, ErrorKind,
    FeeError, FeeSettings, Host, HostError, HostResult, MarketOrderError, OrderError, Result,
    StorageError, SwapLeg, TradingError,
};
pub use infrastructure::constants::{
    BASIS_POINTS, DEFAULT_BURN_SHARE_BPS, DEFAULT_MAX_EXECUTION_HISTORY, DEFAULT_STAKE_SHARE_BPS,
    MAX_FEE_RATE_BPS, NO_DEADLINE,
};
pub use types::{
    Asset, EngineEvent, ExecutionResult, FeesDistributed, Order, OrderExecuted, OrderType,
};
