//! Fee Accumulator - native-coin fee balance held by the engine between flushes
//!
//! The ledger is the source of truth: `flush` always distributes the engine's
//! full native balance. `pending_native` is a bookkeeping mirror used for
//! statistics and is reconciled on every flush.

use candid::{CandidType, Deserialize, Nat};
use serde::Serialize;
use tracing::{debug, info, warn};
use crate::infrastructure::{is_zero, zero, EngineConfig, FeeError, Host, MarketOrderError, Result};
use crate::types::{EngineEvent, FeesDistributed};
use super::fee_policy::FeePolicy;

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FeeAccumulator {
    pub pending_native: Nat,
    pub total_accrued_native: Nat,
    pub total_burned: Nat,
    pub total_staked: Nat,
    pub flush_count: u64,
    pub last_flush_at: Option<u64>,
}

impl Default for FeeAccumulator {
    fn default() -> Self {
        Self {
            pending_native: zero(),
            total_accrued_native: zero(),
            total_burned: zero(),
            total_staked: zero(),
            flush_count: 0,
            last_flush_at: None,
        }
    }
}

impl FeeAccumulator {
    pub fn record_accrual(&mut self, amount: &Nat) {
        self.pending_native.0 += &amount.0;
        self.total_accrued_native.0 += &amount.0;
    }

    pub fn record_flush(&mut self, report: &FlushReport) {
        if report.distributed.is_none() {
            return;
        }
        self.total_burned.0 += &report.burned.0;
        self.total_staked.0 += &report.staked.0;
        self.pending_native = zero();
        self.flush_count += 1;
        self.last_flush_at = Some(report.timestamp);
    }
}

/// Outcome of a single `flush`. `distributed` is `None` when there was nothing to send.
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FlushReport {
    pub distributed: Option<Nat>,
    pub burned: Nat,
    pub staked: Nat,
    pub timestamp: u64,
}

impl FlushReport {
    fn empty(timestamp: u64) -> Self {
        Self {
            distributed: None,
            burned: zero(),
            staked: zero(),
            timestamp,
        }
    }
}

/// Send the engine's whole native balance to the burn and staking sinks.
///
/// All-or-nothing: both transfers land or the host is reverted and
/// `DistributionFailure` names the sink that refused payment. Calling again
/// with a zero balance is a no-op. Engine-side statistics are left to the
/// caller via [`FeeAccumulator::record_flush`] once its own unit commits.
pub fn flush<H: Host>(
    host: &mut H,
    config: &EngineConfig,
    policy: &FeePolicy,
    accumulator: &FeeAccumulator,
) -> Result<FlushReport> {
    let timestamp = host.timestamp();
    let balance = host.native_balance(config.engine_id)?;

    if balance != accumulator.pending_native {
        warn!(
            "⚠️ Engine native balance {} differs from recorded pending fees {}",
            balance, accumulator.pending_native
        );
    }

    if is_zero(&balance) {
        debug!("Fee flush skipped: no native balance accrued");
        return Ok(FlushReport::empty(timestamp));
    }

    let checkpoint = host.checkpoint();
    match distribute(host, config, policy, &balance, timestamp) {
        Ok(report) => {
            host.commit(checkpoint);
            info!(
                "✅ Distributed {} native: {} burned, {} staked",
                balance, report.burned, report.staked
            );
            Ok(report)
        }
        Err(e) => {
            host.revert_to(checkpoint);
            warn!("❌ Fee distribution reverted: {}", e);
            Err(e)
        }
    }
}

fn distribute<H: Host>(
    host: &mut H,
    config: &EngineConfig,
    policy: &FeePolicy,
    balance: &Nat,
    timestamp: u64,
) -> Result<FlushReport> {
    let shares = policy.distribute(balance)?;
    debug!("Step 1: Split {} native into burn {} / stake {}", balance, shares.burn, shares.stake);

    for (sink, amount) in [(config.burn_sink, &shares.burn), (config.stake_sink, &shares.stake)] {
        if is_zero(amount) {
            continue;
        }
        host.transfer_native(config.engine_id, sink, amount)
            .map_err(|e| {
                MarketOrderError::Fee(FeeError::DistributionFailure {
                    sink,
                    amount: amount.clone(),
                    reason: e.to_string(),
                })
            })?;
        debug!("Step 2: Sent {} native to sink {}", amount, sink);
    }

    let remaining = host.native_balance(config.engine_id)?;
    if !is_zero(&remaining) {
        return Err(MarketOrderError::Fee(FeeError::DistributionFailure {
            sink: config.engine_id,
            amount: remaining.clone(),
            reason: format!("engine still holds {} native after distribution", remaining),
        }));
    }

    host.emit_event(
        config.engine_id,
        EngineEvent::FeesDistributed(FeesDistributed {
            burned: shares.burn.clone(),
            staked: shares.stake.clone(),
            burn_sink: config.burn_sink,
            stake_sink: config.stake_sink,
            timestamp,
        }),
    );

    Ok(FlushReport {
        distributed: Some(balance.clone()),
        burned: shares.burn,
        staked: shares.stake,
        timestamp,
    })
}
