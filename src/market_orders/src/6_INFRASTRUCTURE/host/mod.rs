//! Host interface - the execution environment the engine runs inside
//!
//! ## Collaborators
//! - **AssetLedger**: native coin and fungible token balances, transfers, approvals
//! - **AmmRouter**: pair lookup plus the three fee-on-transfer-tolerant swaps
//! - **Environment**: journaling, event emission, clock
//!
//! ## Atomicity
//! The engine opens a checkpoint around every public operation. On failure it
//! reverts to that checkpoint, which must undo every balance, allowance and
//! event change made since. Checkpoints nest: committing or reverting an inner
//! checkpoint leaves outer ones intact.

use candid::{Nat, Principal};
use crate::infrastructure::errors::HostResult;
use crate::types::EngineEvent;

pub trait AssetLedger {
    fn native_balance(&self, owner: Principal) -> HostResult<Nat>;

    fn token_balance(&self, token: Principal, owner: Principal) -> HostResult<Nat>;

    /// Move native coin. Never subject to a transfer fee.
    fn transfer_native(&mut self, from: Principal, to: Principal, amount: &Nat) -> HostResult<()>;

    /// Pull `amount` of `token` from `from` to `to` using `spender`'s allowance.
    /// The recipient may be credited less than `amount`.
    fn transfer_from(
        &mut self,
        token: Principal,
        spender: Principal,
        from: Principal,
        to: Principal,
        amount: &Nat,
    ) -> HostResult<()>;

    /// Set `spender`'s allowance over `owner`'s `token` to exactly `amount`
    fn approve(&mut self, token: Principal, owner: Principal, spender: Principal, amount: &Nat) -> HostResult<()>;
}

/// Call contract of a Uniswap-V2-style router and its factory.
///
/// Each swap fails with `HostError::InsufficientOutputAmount` when the
/// recipient's balance delta of the last path asset is below `amount_out_min`.
pub trait AmmRouter {
    fn get_pair(&self, token_a: Principal, token_b: Principal) -> Option<Principal>;

    /// `value` native coin is taken from `caller`; `path[0]` must be the wrapped native asset
    fn swap_exact_eth_for_tokens_supporting_fee_on_transfer_tokens(
        &mut self,
        caller: Principal,
        value: &Nat,
        amount_out_min: &Nat,
        path: &[Principal],
        to: Principal,
        deadline: u64,
    ) -> HostResult<()>;

    /// Output is unwrapped and delivered as native coin; the last path entry must be
    /// the wrapped native asset
    fn swap_exact_tokens_for_eth_supporting_fee_on_transfer_tokens(
        &mut self,
        caller: Principal,
        amount_in: &Nat,
        amount_out_min: &Nat,
        path: &[Principal],
        to: Principal,
        deadline: u64,
    ) -> HostResult<()>;

    fn swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
        &mut self,
        caller: Principal,
        amount_in: &Nat,
        amount_out_min: &Nat,
        path: &[Principal],
        to: Principal,
        deadline: u64,
    ) -> HostResult<()>;
}

pub trait Environment {
    type Checkpoint;

    fn checkpoint(&mut self) -> Self::Checkpoint;

    fn commit(&mut self, checkpoint: Self::Checkpoint);

    fn revert_to(&mut self, checkpoint: Self::Checkpoint);

    fn emit_event(&mut self, emitter: Principal, event: EngineEvent);

    /// Nanoseconds since epoch
    fn timestamp(&self) -> u64;
}

/// Everything the engine needs from its environment
pub trait Host: AssetLedger + AmmRouter + Environment {}

impl<T: AssetLedger + AmmRouter + Environment> Host for T {}
