//! Error types for the market order engine
//!
//! Every public operation returns [`Result`]. Errors are grouped by the zone
//! that raises them, and [`MarketOrderError::kind`] collapses them onto the
//! caller-facing taxonomy (invalid order, transfer mismatch, slippage,
//! insufficient proceeds, distribution failure).

use candid::{CandidType, Deserialize, Nat, Principal};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketOrderError>;

/// Result type returned by host (ledger, router, environment) calls
pub type HostResult<T> = std::result::Result<T, HostError>;

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketOrderError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Trading error: {0}")]
    Trading(#[from] TradingError),

    #[error("Fee error: {0}")]
    Fee(#[from] FeeError),

    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Host call failed: {0}")]
    Host(#[from] HostError),
}

/// Caller-facing error classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidOrder,
    TransferMismatch,
    SlippageExceeded,
    InsufficientProceeds,
    DistributionFailure,
    NoLiquidity,
    Other,
}

impl MarketOrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketOrderError::Order(OrderError::InvalidOrder { .. }) => ErrorKind::InvalidOrder,
            MarketOrderError::Order(OrderError::TransferMismatch { .. }) => ErrorKind::TransferMismatch,
            MarketOrderError::Order(OrderError::InsufficientProceeds { .. }) => {
                ErrorKind::InsufficientProceeds
            }
            MarketOrderError::Trading(TradingError::SlippageExceeded { .. }) => {
                ErrorKind::SlippageExceeded
            }
            MarketOrderError::Trading(TradingError::NoLiquidityPool { .. }) => ErrorKind::NoLiquidity,
            MarketOrderError::Fee(FeeError::DistributionFailure { .. }) => {
                ErrorKind::DistributionFailure
            }
            _ => ErrorKind::Other,
        }
    }
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Invalid order: {reason}")]
    InvalidOrder { reason: String },

    #[error("Transfer mismatch on {asset}: expected {expected}, received {received} ({reason})")]
    TransferMismatch {
        asset: String,
        expected: Nat,
        received: Nat,
        reason: String,
    },

    #[error("Swap proceeds {proceeds} are below the fee {fee}")]
    InsufficientProceeds { proceeds: Nat, fee: Nat },

    #[error("Failed to forward {amount} native to {recipient}: {reason}")]
    ProceedsTransferFailed {
        recipient: Principal,
        amount: Nat,
        reason: String,
    },

    #[error("Engine balance of {asset} changed from {before} to {after}")]
    TrappedBalance {
        asset: String,
        before: Nat,
        after: Nat,
    },
}

/// Which hop of an order a router call belongs to
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapLeg {
    /// Proceeds owed to the trader
    Main,
    /// Protocol fee conversion into native coin
    Fee,
}

impl fmt::Display for SwapLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapLeg::Main => write!(f, "main leg"),
            SwapLeg::Fee => write!(f, "fee leg"),
        }
    }
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Error)]
pub enum TradingError {
    #[error("Slippage exceeded on {leg}: minimum {minimum}, received {received}")]
    SlippageExceeded {
        leg: SwapLeg,
        minimum: Nat,
        received: Nat,
    },

    #[error("No liquidity pool for {token_a} / {token_b}")]
    NoLiquidityPool {
        token_a: Principal,
        token_b: Principal,
    },

    #[error("Swap failed on {leg} for amount {amount}: {reason}")]
    SwapFailed {
        leg: SwapLeg,
        amount: Nat,
        reason: String,
    },

    #[error("Approval of {amount} on {token} failed: {reason}")]
    ApprovalFailed {
        token: Principal,
        amount: Nat,
        reason: String,
    },
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("Distribution of {amount} to sink {sink} failed: {reason}")]
    DistributionFailure {
        sink: Principal,
        amount: Nat,
        reason: String,
    },
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: String },

    #[error("Underflow in {operation}")]
    Underflow { operation: String },
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Fee rate {fee_rate_bps} bps exceeds maximum {maximum_bps} bps")]
    InvalidFeeRate { fee_rate_bps: u32, maximum_bps: u32 },

    #[error("Burn share {burn_share_bps} bps + stake share {stake_share_bps} bps must equal 10000")]
    InvalidShareSplit {
        burn_share_bps: u32,
        stake_share_bps: u32,
    },

    #[error("Invalid principal for {field}: {reason}")]
    InvalidPrincipal { field: String, reason: String },
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Failed to encode engine state: {reason}")]
    EncodeFailed { reason: String },

    #[error("Failed to decode engine state: {reason}")]
    DecodeFailed { reason: String },

    #[error("Incompatible state version {found}, expected {expected}")]
    IncompatibleVersion { found: u32, expected: u32 },
}

/// Failures reported by the execution environment
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Insufficient {asset} balance for {owner}: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        owner: Principal,
        required: Nat,
        available: Nat,
    },

    #[error("Insufficient allowance on {token} for spender {spender}: required {required}, approved {approved}")]
    InsufficientAllowance {
        token: Principal,
        spender: Principal,
        required: Nat,
        approved: Nat,
    },

    #[error("Insufficient output amount: minimum {minimum}, received {received}")]
    InsufficientOutputAmount { minimum: Nat, received: Nat },

    #[error("No pair for {token_a} / {token_b}")]
    PairNotFound {
        token_a: Principal,
        token_b: Principal,
    },

    #[error("Invalid swap path: {reason}")]
    InvalidPath { reason: String },

    #[error("Call rejected by {party}: {reason}")]
    Rejected { party: Principal, reason: String },
}
