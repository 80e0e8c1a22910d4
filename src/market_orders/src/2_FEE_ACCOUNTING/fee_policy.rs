//! Fee Policy - exact-integer fee slice and distribution split
//!
//! ## Formulas
//! - `fee = floor(gross × fee_rate_bps ÷ 10000)`, `net = gross − fee`
//! - `burn = floor(fee × burn_share_bps ÷ 10000)`, `stake = fee − burn`
//!
//! Truncation always favours the trader's net amount. Orders small enough to
//! produce a zero fee are accepted as-is. The distribution remainder lands on the
//! stake share so the two shares always sum exactly to the fee.

use candid::Nat;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use crate::infrastructure::{apply_bps, checked_sub, FeeSettings, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSplit {
    pub net: Nat,
    pub fee: Nat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub burn: Nat,
    pub stake: Nat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeePolicy {
    fee_rate_bps: u32,
    burn_share_bps: u32,
    stake_share_bps: u32,
}

impl FeePolicy {
    pub fn from_settings(settings: &FeeSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            fee_rate_bps: settings.fee_rate_bps,
            burn_share_bps: settings.burn_share_bps,
            stake_share_bps: settings.stake_share_bps,
        })
    }

    pub fn fee_rate_bps(&self) -> u32 {
        self.fee_rate_bps
    }

    pub fn burn_share_bps(&self) -> u32 {
        self.burn_share_bps
    }

    pub fn stake_share_bps(&self) -> u32 {
        self.stake_share_bps
    }

    /// Fee rate as a percentage, e.g. 20 bps → 0.20
    pub fn fee_rate_percent(&self) -> Decimal {
        Decimal::from(self.fee_rate_bps) / dec!(100)
    }

    pub fn split(&self, gross: &Nat) -> Result<FeeSplit> {
        let fee = apply_bps(gross, self.fee_rate_bps)?;
        let net = checked_sub(gross, &fee, "fee split")?;
        Ok(FeeSplit { net, fee })
    }

    pub fn distribute(&self, fee: &Nat) -> Result<Distribution> {
        let burn = apply_bps(fee, self.burn_share_bps)?;
        let stake = checked_sub(fee, &burn, "fee distribution")?;
        Ok(Distribution { burn, stake })
    }
}
