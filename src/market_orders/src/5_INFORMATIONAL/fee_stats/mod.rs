//! Fee statistics snapshot

use candid::{CandidType, Deserialize, Nat};
use serde::Serialize;
use crate::_2_FEE_ACCOUNTING::{FeeAccumulator, FeePolicy};

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FeeStats {
    pub fee_rate_bps: u32,
    /// Human-readable rate, e.g. "0.2" for 20 bps
    pub fee_rate_percent: String,
    pub burn_share_bps: u32,
    pub stake_share_bps: u32,
    pub pending_native: Nat,
    pub total_accrued_native: Nat,
    pub total_burned: Nat,
    pub total_staked: Nat,
    pub flush_count: u64,
    pub last_flush_at: Option<u64>,
    pub orders_recorded: u64,
}

pub fn fee_stats(policy: &FeePolicy, accumulator: &FeeAccumulator, orders_recorded: u64) -> FeeStats {
    FeeStats {
        fee_rate_bps: policy.fee_rate_bps(),
        fee_rate_percent: policy.fee_rate_percent().normalize().to_string(),
        burn_share_bps: policy.burn_share_bps(),
        stake_share_bps: policy.stake_share_bps(),
        pending_native: accumulator.pending_native.clone(),
        total_accrued_native: accumulator.total_accrued_native.clone(),
        total_burned: accumulator.total_burned.clone(),
        total_staked: accumulator.total_staked.clone(),
        flush_count: accumulator.flush_count,
        last_flush_at: accumulator.last_flush_at,
        orders_recorded,
    }
}
