//! # Slippage Module
//!
//! The only price protection the engine offers is the caller's own floor.
//! The router enforces it first; the measured balance delta is then checked
//! again so fee-on-transfer output tokens cannot slip under the floor.

use candid::Nat;
use tracing::warn;
use crate::infrastructure::{errors::{SwapLeg, TradingError}, MarketOrderError, Result};

pub fn validate_min_output(leg: SwapLeg, measured: &Nat, minimum: &Nat) -> Result<()> {
    if measured < minimum {
        warn!("⚠️ {} delivered {} below minimum {}", leg, measured, minimum);
        return Err(MarketOrderError::Trading(TradingError::SlippageExceeded {
            leg,
            minimum: minimum.clone(),
            received: measured.clone(),
        }));
    }
    Ok(())
}
