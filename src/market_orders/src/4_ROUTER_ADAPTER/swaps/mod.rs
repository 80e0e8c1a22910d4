//! # Swap Execution Module
//!
//! One method per order shape, each a thin pass-through to the router's
//! fee-on-transfer-tolerant swap. Every method returns the amount the
//! recipient actually gained, measured by balance delta.
//!
//! ## Error Mapping
//! - `InsufficientOutputAmount` → `TradingError::SlippageExceeded`
//! - `PairNotFound` → `TradingError::NoLiquidityPool`
//! - anything else → `TradingError::SwapFailed`

use candid::{Nat, Principal};
use tracing::{debug, info};
use crate::_3_BALANCE_TRACKING::measure_delta;
use crate::infrastructure::{
    errors::{SwapLeg, TradingError},
    EngineConfig, Host, HostError, MarketOrderError, Result, NO_DEADLINE,
};
use crate::types::Asset;
use super::approvals::approve_router;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterAdapter {
    router: Principal,
    engine: Principal,
    wrapped_native: Principal,
}

impl RouterAdapter {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            router: config.router,
            engine: config.engine_id,
            wrapped_native: config.wrapped_native,
        }
    }

    /// Factory lookup; fails with `NoLiquidityPool` when the pair was never created
    pub fn ensure_pool<H: Host>(&self, host: &H, token_a: Principal, token_b: Principal) -> Result<Principal> {
        host.get_pair(token_a, token_b).ok_or_else(|| {
            MarketOrderError::Trading(TradingError::NoLiquidityPool { token_a, token_b })
        })
    }

    /// Spend `amount_in` of the engine's native coin on `token_out`, credited to `recipient`
    pub fn swap_native_for_tokens<H: Host>(
        &self,
        host: &mut H,
        amount_in: &Nat,
        amount_out_min: &Nat,
        token_out: Principal,
        recipient: Principal,
    ) -> Result<Nat> {
        let path = [self.wrapped_native, token_out];
        debug!("🔄 Swapping {} native → {} (min {})", amount_in, token_out, amount_out_min);

        let received = measure_delta(host, Asset::Token(token_out), recipient, |host| {
            host.swap_exact_eth_for_tokens_supporting_fee_on_transfer_tokens(
                self.engine,
                amount_in,
                amount_out_min,
                &path,
                recipient,
                NO_DEADLINE,
            )
            .map_err(|e| swap_error(SwapLeg::Main, amount_in, e))
        })?;

        info!("✅ Native swap delivered {} of {} to {}", received, token_out, recipient);
        Ok(received)
    }

    /// Sell `amount_in` of the engine's `token_in` for native coin credited to `recipient`
    pub fn swap_tokens_for_native<H: Host>(
        &self,
        host: &mut H,
        leg: SwapLeg,
        token_in: Principal,
        amount_in: &Nat,
        amount_out_min: &Nat,
        recipient: Principal,
    ) -> Result<Nat> {
        let path = [token_in, self.wrapped_native];
        approve_router(host, token_in, self.engine, self.router, amount_in)?;
        debug!("🔄 {}: swapping {} of {} → native (min {})", leg, amount_in, token_in, amount_out_min);

        let received = measure_delta(host, Asset::Native, recipient, |host| {
            host.swap_exact_tokens_for_eth_supporting_fee_on_transfer_tokens(
                self.engine,
                amount_in,
                amount_out_min,
                &path,
                recipient,
                NO_DEADLINE,
            )
            .map_err(|e| swap_error(leg, amount_in, e))
        })?;

        info!("✅ {} delivered {} native to {}", leg, received, recipient);
        Ok(received)
    }

    /// Sell `amount_in` of the engine's `token_in` for `token_out` credited to `recipient`
    pub fn swap_tokens_for_tokens<H: Host>(
        &self,
        host: &mut H,
        token_in: Principal,
        token_out: Principal,
        amount_in: &Nat,
        amount_out_min: &Nat,
        recipient: Principal,
    ) -> Result<Nat> {
        let path = [token_in, token_out];
        approve_router(host, token_in, self.engine, self.router, amount_in)?;
        debug!("🔄 Swapping {} of {} → {} (min {})", amount_in, token_in, token_out, amount_out_min);

        let received = measure_delta(host, Asset::Token(token_out), recipient, |host| {
            host.swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
                self.engine,
                amount_in,
                amount_out_min,
                &path,
                recipient,
                NO_DEADLINE,
            )
            .map_err(|e| swap_error(SwapLeg::Main, amount_in, e))
        })?;

        info!("✅ Token swap delivered {} of {} to {}", received, token_out, recipient);
        Ok(received)
    }
}

fn swap_error(leg: SwapLeg, amount: &Nat, error: HostError) -> MarketOrderError {
    let trading = match error {
        HostError::InsufficientOutputAmount { minimum, received } => {
            TradingError::SlippageExceeded { leg, minimum, received }
        }
        HostError::PairNotFound { token_a, token_b } => TradingError::NoLiquidityPool { token_a, token_b },
        other => TradingError::SwapFailed {
            leg,
            amount: amount.clone(),
            reason: other.to_string(),
        },
    };
    MarketOrderError::Trading(trading)
}
