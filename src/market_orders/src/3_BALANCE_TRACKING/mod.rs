//! Balance Tracking - measure what actually arrived, never trust nominal amounts
//!
//! Every transfer and swap the engine performs is bracketed by a before/after
//! balance read of the party that should be credited. Fee-on-transfer tokens
//! are therefore reported accurately on both the input and output side.

use candid::{Nat, Principal};
use tracing::warn;
use crate::infrastructure::{saturating_sub, Host, Result};
use crate::types::Asset;

pub fn balance_of<H: Host>(host: &H, asset: Asset, holder: Principal) -> Result<Nat> {
    let balance = match asset {
        Asset::Native => host.native_balance(holder)?,
        Asset::Token(token) => host.token_balance(token, holder)?,
    };
    Ok(balance)
}

/// Runs `op` and returns how much `holder`'s balance of `asset` grew.
///
/// A decrease is clamped to zero and logged; callers compare the result
/// against their own expectations and reject.
pub fn measure_delta<H, F>(host: &mut H, asset: Asset, holder: Principal, op: F) -> Result<Nat>
where
    H: Host,
    F: FnOnce(&mut H) -> Result<()>,
{
    let before = balance_of(host, asset, holder)?;
    op(host)?;
    let after = balance_of(host, asset, holder)?;

    if after < before {
        warn!("⚠️ Balance of {} for {} decreased from {} to {}", asset, holder, before, after);
    }
    Ok(saturating_sub(&after, &before))
}

/// Input-side measurement.
///
/// Native coin arrives as attached call value with no transfer fee, so the
/// expected amount is taken as-is and `op` is not invoked.
pub fn measure_received<H, F>(host: &mut H, asset: Asset, holder: Principal, expected: &Nat, op: F) -> Result<Nat>
where
    H: Host,
    F: FnOnce(&mut H) -> Result<()>,
{
    match asset {
        Asset::Native => Ok(expected.clone()),
        Asset::Token(_) => measure_delta(host, asset, holder, op),
    }
}
