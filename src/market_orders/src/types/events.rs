use candid::{CandidType, Deserialize, Nat, Principal};
use serde::Serialize;
use super::orders::{ExecutionResult, OrderType};

/// Record emitted for every completed order. Consumed by indexers, never read back
/// by the engine itself.
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderExecuted {
    pub trader: Principal,
    pub order_type: OrderType,
    pub token_in: Principal,
    pub token_out: Principal,
    pub amounts: ExecutionResult,
    /// Fee slice skimmed from the gross input, in input units
    pub fee_charged: Nat,
    /// Native coin added to the accumulator by this order
    pub fee_accrued_native: Nat,
    pub timestamp: u64,
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FeesDistributed {
    pub burned: Nat,
    pub staked: Nat,
    pub burn_sink: Principal,
    pub stake_sink: Principal,
    pub timestamp: u64,
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    OrderExecuted(OrderExecuted),
    FeesDistributed(FeesDistributed),
}
