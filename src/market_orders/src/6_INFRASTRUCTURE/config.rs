//! Engine configuration, injected at construction
//!
//! Nothing here is ambient: router, sinks and fee policy all travel with the
//! engine instance so tests can run arbitrary policies against mock routers.

use candid::{CandidType, Deserialize, Principal};
use serde::Serialize;
use crate::infrastructure::constants::{
    BASIS_POINTS, DEFAULT_BURN_SHARE_BPS, DEFAULT_MAX_EXECUTION_HISTORY, DEFAULT_STAKE_SHARE_BPS,
    MAX_FEE_RATE_BPS,
};
use crate::infrastructure::errors::{ConfigError, MarketOrderError, Result};

/// Fee rate skimmed from every order and the split applied when distributing
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSettings {
    pub fee_rate_bps: u32,
    pub burn_share_bps: u32,
    pub stake_share_bps: u32,
}

impl FeeSettings {
    /// Fee rate with the default 60/40 burn/stake split
    pub fn new(fee_rate_bps: u32) -> Self {
        Self {
            fee_rate_bps,
            burn_share_bps: DEFAULT_BURN_SHARE_BPS,
            stake_share_bps: DEFAULT_STAKE_SHARE_BPS,
        }
    }

    pub fn with_split(mut self, burn_share_bps: u32, stake_share_bps: u32) -> Self {
        self.burn_share_bps = burn_share_bps;
        self.stake_share_bps = stake_share_bps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.fee_rate_bps > MAX_FEE_RATE_BPS {
            return Err(MarketOrderError::Config(ConfigError::InvalidFeeRate {
                fee_rate_bps: self.fee_rate_bps,
                maximum_bps: MAX_FEE_RATE_BPS,
            }));
        }

        // Summed in u64: two u32 shares may not wrap
        let share_total = u64::from(self.burn_share_bps) + u64::from(self.stake_share_bps);
        if share_total != u64::from(BASIS_POINTS) {
            return Err(MarketOrderError::Config(ConfigError::InvalidShareSplit {
                burn_share_bps: self.burn_share_bps,
                stake_share_bps: self.stake_share_bps,
            }));
        }

        Ok(())
    }
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Account the engine holds balances under
    pub engine_id: Principal,
    /// AMM router granted spending approval before token-input hops
    pub router: Principal,
    /// Wrapped-native asset identifying the native coin in paths and orders
    pub wrapped_native: Principal,
    pub burn_sink: Principal,
    pub stake_sink: Principal,
    pub fees: FeeSettings,
    /// Distribute fees inside every order instead of waiting for `stake_and_burn`
    pub flush_on_execute: bool,
    /// Execution records kept for informational queries
    pub max_history: u64,
}

impl EngineConfig {
    pub fn new(
        engine_id: Principal,
        router: Principal,
        wrapped_native: Principal,
        burn_sink: Principal,
        stake_sink: Principal,
        fees: FeeSettings,
    ) -> Self {
        Self {
            engine_id,
            router,
            wrapped_native,
            burn_sink,
            stake_sink,
            fees,
            flush_on_execute: false,
            max_history: DEFAULT_MAX_EXECUTION_HISTORY,
        }
    }

    pub fn with_flush_on_execute(mut self, flush_on_execute: bool) -> Self {
        self.flush_on_execute = flush_on_execute;
        self
    }

    pub fn with_max_history(mut self, max_history: u64) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.fees.validate()?;

        let principals = [
            ("engine_id", self.engine_id),
            ("router", self.router),
            ("wrapped_native", self.wrapped_native),
            ("burn_sink", self.burn_sink),
            ("stake_sink", self.stake_sink),
        ];
        for (field, principal) in principals {
            if principal == Principal::anonymous() {
                return Err(invalid_principal(field, "anonymous principal not allowed"));
            }
        }

        // Counterparties must be distinct from the engine account
        for (field, principal) in [
            ("burn_sink", self.burn_sink),
            ("stake_sink", self.stake_sink),
            ("wrapped_native", self.wrapped_native),
            ("router", self.router),
        ] {
            if principal == self.engine_id {
                return Err(invalid_principal(field, "must differ from engine_id"));
            }
        }

        Ok(())
    }
}

fn invalid_principal(field: &str, reason: &str) -> MarketOrderError {
    MarketOrderError::Config(ConfigError::InvalidPrincipal {
        field: field.to_string(),
        reason: reason.to_string(),
    })
}
