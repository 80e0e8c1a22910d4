//! Stable storage for engine state that must survive a host upgrade
//!
//! Only engine-side bookkeeping lives here. Balances belong to the host ledger
//! and are never serialized by the engine.

use candid::{CandidType, Deserialize};
use tracing::{info, warn};
use crate::_2_FEE_ACCOUNTING::FeeAccumulator;
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::constants::STATE_SCHEMA_VERSION;
use crate::infrastructure::errors::{MarketOrderError, Result, StorageError};
use crate::types::OrderExecuted;

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StableState {
    pub version: u32,
    pub config: EngineConfig,
    pub accumulator: FeeAccumulator,
    pub history: Vec<OrderExecuted>,
}

pub fn save_state(state: &StableState) -> Result<Vec<u8>> {
    info!("💾 Saving engine state with {} execution records", state.history.len());

    candid::encode_one(state).map_err(|e| {
        warn!("⚠️ Failed to encode engine state: {}", e);
        MarketOrderError::Storage(StorageError::EncodeFailed { reason: e.to_string() })
    })
}

pub fn restore_state(bytes: &[u8]) -> Result<StableState> {
    let state: StableState = candid::decode_one(bytes).map_err(|e| {
        MarketOrderError::Storage(StorageError::DecodeFailed { reason: e.to_string() })
    })?;

    if state.version != STATE_SCHEMA_VERSION {
        return Err(MarketOrderError::Storage(StorageError::IncompatibleVersion {
            found: state.version,
            expected: STATE_SCHEMA_VERSION,
        }));
    }

    info!("✅ Restored engine state with {} execution records", state.history.len());
    Ok(state)
}
