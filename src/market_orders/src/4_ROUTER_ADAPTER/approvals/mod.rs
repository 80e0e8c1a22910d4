//! # Router Approval Module
//!
//! The router pulls token inputs with `transfer_from`, so the engine grants it
//! an allowance for exactly the amount of the hop about to run. Approval is a
//! set, not an increment: a stale allowance from an earlier hop is overwritten.

use candid::{Nat, Principal};
use tracing::{debug, warn};
use crate::infrastructure::{errors::TradingError, Host, MarketOrderError, Result};

pub fn approve_router<H: Host>(
    host: &mut H,
    token: Principal,
    owner: Principal,
    router: Principal,
    amount: &Nat,
) -> Result<()> {
    debug!("📝 Approving {} of token {} for router {}", amount, token, router);

    host.approve(token, owner, router, amount).map_err(|e| {
        warn!("❌ Router approval failed: {}", e);
        MarketOrderError::Trading(TradingError::ApprovalFailed {
            token,
            amount: amount.clone(),
            reason: e.to_string(),
        })
    })
}
